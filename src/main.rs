mod action;
mod app;
mod auth;
mod cli;
mod config;
mod error;
mod event;
mod forge;
mod github;
mod loader;
mod pagination;
mod tui;
mod types;
mod ui;
mod views;

use std::fs::OpenOptions;
use std::panic;
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::action::Action;
use crate::app::App;
use crate::auth::resolve_credential;
use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::event::Event;
use crate::forge::Forge;
use crate::github::GitHub;
use crate::loader::Loader;
use crate::tui::EventHandler;

const RENDER_RATE: Duration = Duration::from_millis(16);

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match start(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ghnav: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: Cli) -> Result<()> {
    init_logging(cli.log_file.as_deref())?;

    let config = Config::load(cli.config.as_deref());
    let page_size = cli.page_size.unwrap_or(config.ui.page_size).max(1);

    // Resolved before the terminal is touched so auth failures print normally
    let credential = resolve_credential(&config.github)?;
    let github = GitHub::new(&credential, config.github.api_url.as_deref())?;
    info!(forge = github.name(), page_size, "starting");

    let mut app = App::new(page_size, credential.masked());
    app.debug = cli.debug;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let result = run(app, Arc::new(github), &config).await;

    tui::restore()?;

    result
}

async fn run(mut app: App, source: Arc<dyn Forge>, config: &Config) -> Result<()> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let loader = Loader::new(source, action_tx.clone(), config.timeout());

    let size = terminal.size()?;
    app.update(Action::Resize(size.width, size.height));

    let mut events = EventHandler::new(config.tick_rate(), RENDER_RATE);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action).ok();
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                for effect in app.update(action) {
                    debug!(?effect, "dispatching");
                    loader.dispatch(effect);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
