use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;

use crate::board::Board;
use crate::i18n::{Locale, Text};
use crate::models::{Day, ViewMode};
use crate::stats::{BoardStats, display_percent, format_minutes, format_subject_counts};
use crate::utils::parse_date;

#[derive(Parser)]
#[command(name = "weekplan")]
#[command(about = "Weekly study planner - a kanban board with one column per day")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (separate dev config and log directory)
    #[arg(long)]
    pub dev: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Print statistics for the seeded week
    Stats {
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
        /// Date used as "today" (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Print the seeded board
    Board {
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
        /// Which days to print
        #[arg(long, value_enum, default_value_t = BoardView::All)]
        view: BoardView,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BoardView {
    Weekdays,
    Weekend,
    All,
}

impl BoardView {
    fn includes(&self, day: &Day) -> bool {
        match self {
            BoardView::Weekdays => ViewMode::Weekdays.includes(day.id),
            BoardView::Weekend => ViewMode::Weekend.includes(day.id),
            BoardView::All => true,
        }
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Failed to serialize output: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct StatsReport<'a> {
    date: NaiveDate,
    today_percent: u32,
    weekly_percent: u32,
    #[serde(flatten)]
    stats: &'a BoardStats,
}

/// Resolve the `--today` argument, falling back to `default`
pub fn resolve_today(arg: Option<&str>, default: NaiveDate) -> Result<NaiveDate, CliError> {
    match arg {
        Some(s) => parse_date(s)
            .map_err(|e| CliError::DateParseError(format!("Invalid date format '{}': {}", s, e))),
        None => Ok(default),
    }
}

pub fn format_stats(
    board: &Board,
    today: NaiveDate,
    json: bool,
    locale: Locale,
) -> Result<String, CliError> {
    let stats = BoardStats::compute(board, today);
    if json {
        let report = StatsReport {
            date: today,
            today_percent: display_percent(stats.today_percent()),
            weekly_percent: display_percent(stats.weekly_percent()),
            stats: &stats,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", locale.text(Text::Progress)));
    out.push_str(&format!(
        "  {}: {}/{} ({}%)\n",
        locale.text(Text::Today),
        stats.today.completed,
        stats.today.tasks,
        display_percent(stats.today_percent())
    ));
    out.push_str(&format!(
        "  {}: {}/{} ({}%)\n",
        locale.text(Text::Week),
        stats.completed_tasks,
        stats.total_tasks,
        display_percent(stats.weekly_percent())
    ));
    out.push_str(&format!("{}\n", locale.text(Text::TotalTime)));
    out.push_str(&format!(
        "  {}: {}\n",
        locale.text(Text::Today),
        format_minutes(stats.today.minutes)
    ));
    out.push_str(&format!(
        "  {}: {}\n",
        locale.text(Text::WholeWeek),
        format_minutes(stats.total_minutes)
    ));
    out.push_str(&format!("{}\n", locale.text(Text::Subjects)));
    out.push_str(&format!("  {}:\n", locale.text(Text::Today)));
    for line in format_subject_counts(&stats.today_subjects, locale) {
        out.push_str(&format!("    {}\n", line));
    }
    out.push_str(&format!("  {}:\n", locale.text(Text::WholeWeek)));
    for line in format_subject_counts(&stats.weekly_subjects, locale) {
        out.push_str(&format!("    {}\n", line));
    }
    Ok(out)
}

pub fn format_board(
    board: &Board,
    view: BoardView,
    json: bool,
    locale: Locale,
) -> Result<String, CliError> {
    let days: Vec<&Day> = board.days().iter().filter(|d| view.includes(d)).collect();
    if json {
        return Ok(serde_json::to_string_pretty(&days)?);
    }

    let mut out = String::new();
    for day in days {
        out.push_str(&format!(
            "{} ({}) - {}/{} {}\n",
            locale.day_name(day.id),
            locale.short_date(day.date),
            day.completed_count(),
            day.tasks.len(),
            locale.text(Text::Done)
        ));
        if day.tasks.is_empty() {
            out.push_str(&format!("  {}\n", locale.text(Text::NoTasks)));
        }
        for task in &day.tasks {
            out.push_str(&format!(
                "  [{}] {} ({}, {}min, {})\n",
                if task.completed { "x" } else { " " },
                task.title,
                locale.subject(task.subject),
                task.duration,
                locale.priority(task.priority)
            ));
        }
    }
    Ok(out)
}

/// Handle the stats command
pub fn handle_stats(
    board: &Board,
    today: Option<String>,
    default_today: NaiveDate,
    json: bool,
    locale: Locale,
) -> Result<(), CliError> {
    let today = resolve_today(today.as_deref(), default_today)?;
    print!("{}", format_stats(board, today, json, locale)?);
    Ok(())
}

/// Handle the board command
pub fn handle_board(board: &Board, view: BoardView, json: bool, locale: Locale) -> Result<(), CliError> {
    print!("{}", format_board(board, view, json, locale)?);
    Ok(())
}
