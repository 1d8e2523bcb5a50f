use clap::Args;
use jiff::Timestamp;
use tradein::{offers::ExpiryPolicy, pricing::PricingRules};
use tradein_app::{
    database::{self, Db},
    domain::offers::{OffersService, PgOffersService},
};

use crate::cli::parse_timestamp;

#[derive(Debug, Args)]
pub(crate) struct ExpireOffersArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Sweep as of this moment (RFC 3339); defaults to now
    #[arg(long)]
    at: Option<String>,
}

pub(crate) async fn run(args: ExpireOffersArgs) -> Result<(), String> {
    let now = parse_timestamp("at", args.at.as_deref())?.unwrap_or_else(Timestamp::now);

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let offers = PgOffersService::new(
        Db::new(pool),
        PricingRules::default(),
        ExpiryPolicy::default(),
    );

    let expired = offers
        .expire_due_offers(now)
        .await
        .map_err(|error| format!("failed to expire offers: {error}"))?;

    for offer in &expired {
        println!("expired offer {} (expires_at {})", offer.uuid, offer.expires_at);
    }

    println!("{} offer(s) expired as of {now}", expired.len());

    Ok(())
}
