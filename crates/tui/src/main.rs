mod app;
mod catalog;
mod clipboard;
mod config;
mod links;
mod logging;
#[cfg(test)]
mod testing;

use crate::app::handlers::{handle_key, handle_mouse, handle_paste};
use crate::app::view::draw_ui;
use crate::app::AppState;
use crate::catalog::Catalog;
use crate::clipboard::SystemClipboard;
use crate::config::LaunchConfig;
use crate::links::SystemLinkOpener;
use crossterm::cursor::Show;
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::process::ExitCode;
use tracing::{error, info};

struct TerminalRestoreGuard {
    mouse_capture: bool,
}

impl TerminalRestoreGuard {
    fn new(mouse_capture: bool) -> Self {
        Self { mouse_capture }
    }
}

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = stdout.execute(DisableBracketedPaste);
        if self.mouse_capture {
            let _ = stdout.execute(DisableMouseCapture);
        }
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = stdout.execute(Show);
    }
}

fn load_catalog(config: &LaunchConfig) -> Result<Catalog, catalog::CatalogError> {
    match &config.catalog_path {
        Some(path) => Catalog::load(path),
        None => Catalog::builtin(),
    }
}

fn run(config: &LaunchConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(config)?;
    info!(
        root = %catalog.root(),
        panels = catalog.panels().len(),
        "catalog loaded"
    );
    let mut app = AppState::new(
        catalog,
        Box::new(SystemLinkOpener),
        Box::new(SystemClipboard::default()),
        config.asset_dir.clone(),
    )?;

    let mut stdout = std::io::stdout();
    let _restore_guard = TerminalRestoreGuard::new(config.mouse_capture);
    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let _ = stdout.execute(EnableBracketedPaste);
    if config.mouse_capture {
        stdout.execute(EnableMouseCapture)?;
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let mut needs_redraw = true;
    while !app.should_quit {
        if needs_redraw {
            terminal.draw(|f| draw_ui(f, &mut app))?;
        }
        needs_redraw = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(&mut app, key),
            Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
            Event::Paste(text) => handle_paste(&mut app, &text),
            Event::Resize(_, _) => true,
            _ => false,
        };
    }
    info!("event loop finished");
    Ok(())
}

fn main() -> ExitCode {
    let config = LaunchConfig::from_env();
    let _log_guard = logging::init_logging(&config);
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "studyhub exited with an error");
            eprintln!("studyhub: {error}");
            ExitCode::FAILURE
        }
    }
}
