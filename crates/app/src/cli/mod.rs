use clap::{Parser, Subcommand};

mod db;
mod offers;
mod profile;
mod token;

#[derive(Debug, Parser)]
#[command(name = "tradein-app", about = "Trade-in marketplace CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Profile(profile::ProfileCommand),
    Token(token::TokenCommand),
    Offers(offers::OffersCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Profile(command) => profile::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Offers(command) => offers::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

/// Parse an optional RFC 3339 timestamp argument.
pub(crate) fn parse_timestamp(
    name: &str,
    raw: Option<&str>,
) -> Result<Option<jiff::Timestamp>, String> {
    raw.map(|value| {
        value
            .parse::<jiff::Timestamp>()
            .map_err(|error| format!("invalid {name} timestamp: {error}"))
    })
    .transpose()
}
