pub mod board;
pub mod cli;
pub mod config;
pub mod drag;
pub mod i18n;
pub mod logging;
pub mod models;
pub mod sample;
pub mod stats;
pub mod tui;
pub mod utils;

pub use board::Board;
pub use config::Config;
pub use drag::{DragController, DragState, DropOutcome, DropTarget};
pub use i18n::Locale;
pub use models::{Day, DayId, Priority, Subject, Task, TaskDraft, TaskId, ViewMode};
pub use stats::BoardStats;
pub use utils::Profile;
