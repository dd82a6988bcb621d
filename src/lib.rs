pub mod api;
pub mod chat;
pub mod cli;
mod commands;
pub mod config;
pub mod draft;
pub mod error;
pub mod models;
pub mod personas;
pub mod secret;
pub mod settings;
pub mod sync;
pub mod timeline;
pub mod utils;
pub mod view;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use api::HttpApi;
use cli::{Cli, Commands};
use config::ClientConfig;
use draft::local_clock;
use view::ViewController;

pub fn run() -> Result<()> {
    utils::logging::init();

    let cli = Cli::parse();
    let config_path = ClientConfig::default_path();
    let config = ClientConfig::load(config_path.as_deref())?.with_base_url(cli.api_url.clone());

    log::debug!("Noty client starting against {}", config.base_url);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let api = HttpApi::new(&config).context("Failed to build the HTTP client")?;
    let views = ViewController::new(Arc::new(api), local_clock());

    runtime.block_on(async move {
        let result = dispatch(&views, cli.command).await;
        views.unmount();
        result
    })
}

async fn dispatch(views: &ViewController, command: Commands) -> Result<()> {
    match command {
        Commands::Timeline { date } => commands::handle_timeline(views, date).await,
        Commands::New {
            content,
            tags,
            category,
            mood,
            date,
            time,
            polish,
        } => {
            commands::handle_new(views, content, tags, category, mood, date, time, polish).await
        }
        Commands::Delete { id, yes } => commands::handle_delete(views, id, yes).await,
        Commands::Personas => commands::handle_personas(views).await,
        Commands::Activate { id } => commands::handle_activate(views, id).await,
        Commands::Settings => commands::handle_settings(views).await,
        Commands::SetSettings {
            username,
            model,
            api_key,
        } => commands::handle_set_settings(views, username, model, api_key).await,
        Commands::Github => commands::handle_github(views).await,
        Commands::SetGithub {
            repo,
            token,
            active,
            inactive,
        } => {
            let active = match (active, inactive) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::handle_set_github(views, repo, token, active).await
        }
        Commands::Chat { message } => commands::handle_chat(views, message).await,
        Commands::Models => {
            commands::handle_models();
            Ok(())
        }
    }
}
