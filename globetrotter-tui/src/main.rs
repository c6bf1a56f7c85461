mod api;
mod app;
mod cli;
mod config;
mod logging;
mod login;
mod runtime;
mod session_store;
mod ui;

use anyhow::{Context, Result};
use app::{App, View};
use clap::Parser;
use cli::{Cli, Commands};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use globetrotter::share::parse_share_target;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::TripConfig::load()?;
    logging::init(&config::TripConfig::root_dir()?, &cfg.log_level)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::ConfigPath => {
            let path = config::TripConfig::config_path()?;
            if !path.exists() {
                config::TripConfig::default().save()?;
                println!("Created default config at: {}", path.display());
            } else {
                println!("{}", path.display());
            }
        }
        Commands::Login => {
            let mut client = remote_client(&cfg)?;
            login::run_login(&mut client).await?;
        }
        Commands::Logout => {
            let mut client = remote_client(&cfg)?;
            client.forget_session()?;
            println!("Logged out. Session cleared.");
        }
        Commands::Dev => {
            let mut client = api::ApiClient::dev()?;
            let session = client.restore_session()?;
            let mut app = App::new(session, cfg.share_base_url.clone());
            app.dev_mode = true;
            run_tui(&mut app, &mut client).await?;
        }
        Commands::Shared { target } => {
            let trip_id = parse_share_target(&target)
                .with_context(|| format!("Not a trip id or share link: {}", target))?;
            let mut client = remote_client(&cfg)?;
            let session = client.restore_session()?;
            let mut app = App::new(session, cfg.share_base_url.clone());
            app.shared_trip_id = Some(trip_id);
            app.navigate_to(View::Shared);
            run_tui(&mut app, &mut client).await?;
        }
        Commands::Run => {
            let mut client = remote_client(&cfg)?;
            let session = client.restore_session()?;
            let mut app = App::new(session, cfg.share_base_url.clone());
            run_tui(&mut app, &mut client).await?;
        }
    }

    Ok(())
}

fn remote_client(cfg: &config::TripConfig) -> Result<api::ApiClient> {
    api::ApiClient::new(
        &cfg.api_url,
        session_store::SessionStore::default_location()?,
    )
}

async fn run_tui(app: &mut App, client: &mut api::ApiClient) -> Result<()> {
    tracing::info!(api_url = client.base_url(), dev = client.is_dev(), "starting TUI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, app, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "TUI exited with an error");
        eprintln!("Error: {:?}", err);
    }

    println!("\nSafe travels!");
    res
}
