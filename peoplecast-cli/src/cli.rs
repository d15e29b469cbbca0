use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use peoplecast_core::{Config, LoadError, Notify, UserLoader};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "peoplecast", version, about = "Random people, their local weather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a fresh batch of users and their local weather.
    Fetch {
        /// Override the configured batch size for this run.
        #[arg(long)]
        count: Option<usize>,

        /// Print the working set as JSON instead of cards.
        #[arg(long)]
        json: bool,
    },

    /// Interactively edit batch size and service endpoints.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Fetch { count, json } => fetch(count, json).await,
            Command::Configure => configure(),
        }
    }
}

/// Stand-in for the surrounding UI's toast area: every failure event
/// becomes one stderr warning, as it happens.
#[derive(Debug)]
struct StderrNotify;

impl Notify for StderrNotify {
    fn failure(&self, error: &LoadError) {
        eprintln!("warning: {error}");
    }
}

async fn fetch(count: Option<usize>, json: bool) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(count) = count {
        config.batch_size = count;
    }

    let mut loader = UserLoader::from_config(&config, Arc::new(StderrNotify));
    loader.load_users().await;

    if loader.users().is_empty() {
        bail!("no users could be loaded");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(loader.users())?);
    } else {
        output::print_users(loader.users());
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let batch_size = CustomType::<usize>::new("Users per fetch:")
        .with_default(config.batch_size)
        .prompt()?;
    let users = Text::new("User service URL:")
        .with_initial_value(&config.endpoints.users)
        .prompt()?;
    let weather = Text::new("Weather service URL:")
        .with_initial_value(&config.endpoints.weather)
        .prompt()?;

    config.batch_size = batch_size;
    config.endpoints.users = users;
    config.endpoints.weather = weather;

    config.save()?;
    println!("Saved to {}", Config::config_file_path()?.display());

    Ok(())
}
