// src/main.rs

mod charts;
mod config;
mod dashboard;
mod error;
mod logging;
mod sample_data;
mod tui_app;
mod virtual_table;

use config::{Args, DashboardConfig};
use error::DashboardError;
use sample_data::get_source;
use tui_app::TuiApp;

use std::error::Error;
use std::io::{self, Stdout};

use clap::Parser;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

fn setup_terminal() -> Result<DashboardTerminal, DashboardError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut DashboardTerminal) -> Result<(), DashboardError> {
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        default_hook(panic_info);
    }));
}

/// The loop error wins over a failed restore; both get logged.
fn finish(
    result: Result<(), DashboardError>,
    restored: Result<(), DashboardError>,
) -> Result<(), DashboardError> {
    if let Err(e) = &restored {
        error!(error = %e, "terminal restore failed");
    }
    result.and(restored)
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = DashboardConfig::from_args(Args::parse())?;
    let _guard = logging::init(&config.log_dir)?;
    info!(
        rows = config.initial_rows,
        seed = ?config.seed,
        tick_ms = config.tick_rate.as_millis() as u64,
        "starting dashboard"
    );

    let mut app = TuiApp::new(config.initial_rows, get_source(config.seed));

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = app.main_loop(&mut terminal, config.tick_rate);
    if let Err(e) = &result {
        error!(error = %e, "dashboard stopped with an error");
    }
    let restored = restore_terminal(&mut terminal);
    finish(result, restored)?;

    info!(passes = app.passes, "dashboard closed");
    Ok(())
}
