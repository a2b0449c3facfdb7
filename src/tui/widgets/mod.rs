pub mod color;
pub mod day_column;
pub mod editor;
pub mod form;
pub mod help;
pub mod stats_panel;
pub mod status_bar;
pub mod tabs;
pub mod task_card;
