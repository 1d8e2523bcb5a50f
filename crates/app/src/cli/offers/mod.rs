use clap::{Args, Subcommand};

mod expire;

#[derive(Debug, Args)]
pub(crate) struct OffersCommand {
    #[command(subcommand)]
    command: OffersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OffersSubcommand {
    /// Mark every open offer past its expiry as expired
    Expire(expire::ExpireOffersArgs),
}

pub(crate) async fn run(command: OffersCommand) -> Result<(), String> {
    match command.command {
        OffersSubcommand::Expire(args) => expire::run(args).await,
    }
}
