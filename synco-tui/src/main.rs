mod api;
mod app;
mod bootstrap;
mod cli;
mod config;
mod groups;
mod logging;
mod login;
mod runtime;
mod session_store;
mod sync;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::SyncoConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use session_store::SessionStore;
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = SyncoConfig::load()?;

    match SyncoConfig::root_dir() {
        Ok(dir) => {
            if let Err(e) = logging::init(&dir, &config.log_level) {
                eprintln!("Warning: logging disabled: {:#}", e);
            }
        }
        Err(e) => eprintln!("Warning: logging disabled: {:#}", e),
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let client = remote_client(&config)?;
            if client.session().get().await?.is_none() {
                println!("Not signed in. Run `synco login` first.");
                return Ok(());
            }
            run_tui(client, false).await
        }
        Commands::Dev => {
            let client = api::ApiClient::dev().await?;
            run_tui(client, true).await
        }
        Commands::Login => {
            let client = remote_client(&config)?;
            login::run_login(&client).await
        }
        Commands::Register => {
            let client = remote_client(&config)?;
            login::run_register(&client).await
        }
        Commands::Logout => {
            let client = remote_client(&config)?;
            client.logout().await?;
            println!("Signed out.");
            Ok(())
        }
        Commands::Groups { command } => {
            let client = remote_client(&config)?;
            groups::run_group_command(&client, command).await
        }
        Commands::ConfigPath => {
            let path = SyncoConfig::config_path()?;
            if !path.exists() {
                SyncoConfig::default().save()?;
            }
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn remote_client(config: &SyncoConfig) -> Result<api::ApiClient> {
    let session = SessionStore::persistent()?;
    api::ApiClient::new(&config.api_url, session)
        .with_context(|| format!("Invalid api_url in config: {}", config.api_url))
}

async fn run_tui(client: api::ApiClient, dev_mode: bool) -> Result<()> {
    tracing::info!(dev_mode, "starting synco");

    let mut app = App::new(dev_mode);
    bootstrap::initialize_app_state(&mut app, &client).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("synco exited with error: {:?}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
