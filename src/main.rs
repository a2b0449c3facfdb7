use clap::Parser;
use color_eyre::Result;
use tracing::info;
use weekplan::{
    Config, Profile,
    cli::{Cli, Commands},
    logging,
    sample::sample_board,
    utils::{self, today, week_start},
};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // --dev keeps config and logs apart from the regular install
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(&utils::expand_path(path))?,
        None => Config::load_with_profile(profile)?,
    };

    let _log_guard = logging::init_logging(profile, &config.log_level, cli.verbose)?;
    info!(?profile, locale = ?config.locale, "starting weekplan");

    let today = today();
    let board = sample_board(week_start(today));
    let locale = config.locale;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = weekplan::tui::App::new(config, board, today);
            weekplan::tui::run_event_loop(app)?;
        }
        Commands::Stats { json, today: date } => {
            weekplan::cli::handle_stats(&board, date, today, json, locale)?;
        }
        Commands::Board { json, view } => {
            weekplan::cli::handle_board(&board, view, json, locale)?;
        }
    }

    Ok(())
}
