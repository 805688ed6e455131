use std::{process::ExitCode, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{CitiesEndpoint, CityListController, FormInput, HttpCityApi};
use shared::domain::CityId;
use tracing::info;

mod commands;
mod config;
mod interactive;
mod terminal;

use commands::{dispatch, UiCommand};
use config::load_settings;
use terminal::{TerminalForm, TerminalPrompt, TerminalView};

#[derive(Parser, Debug)]
#[command(name = "cities", about = "List, add and delete cities on a remote cities API")]
struct Args {
    /// Collection URL of the cities API; overrides cities.toml and env.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the current list.
    List,
    /// Create a city, then print the refreshed list.
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        population: String,
        /// Collected for parity with the form; never sent.
        #[arg(long, default_value = "")]
        country: String,
    },
    /// Delete a city by id, then print the refreshed list.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Read commands from stdin (the default).
    Interactive,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let settings = load_settings(args.api_url.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let endpoint = CitiesEndpoint::parse(&settings.api_url)?;
    info!(endpoint = %endpoint.collection(), "using cities api");

    let command = args.command.unwrap_or(Command::Interactive);
    let assume_yes = matches!(command, Command::Delete { yes: true, .. });
    let form = match &command {
        Command::Add {
            name,
            population,
            country,
        } => TerminalForm::prefilled(FormInput {
            name: name.clone(),
            population: population.clone(),
            country: country.clone(),
        }),
        _ => TerminalForm::interactive(),
    };

    let view = Arc::new(TerminalView::default());
    let controller = CityListController::new(
        Arc::new(HttpCityApi::new(endpoint)),
        view.clone(),
        Arc::new(TerminalPrompt::new(assume_yes)),
        Arc::new(form),
    );

    let outcome = match command {
        Command::List => dispatch(&controller, UiCommand::Refresh).await,
        Command::Add { .. } => dispatch(&controller, UiCommand::Submit).await,
        Command::Delete { id, .. } => {
            dispatch(&controller, UiCommand::Delete { id: CityId(id) }).await
        }
        Command::Interactive => {
            interactive::run(&controller, &view).await;
            Ok(())
        }
    };

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
