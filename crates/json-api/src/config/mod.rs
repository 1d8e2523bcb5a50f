//! Server configuration module

use clap::Parser;
use tradein::tradein_box::SessionStore;
use tradein_app::context::AppSettings;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    pricing::PricingConfig,
    server::ServerRuntimeConfig,
    session::SessionConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod pricing;
pub(crate) mod server;
pub(crate) mod session;

/// Trade-in JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "tradein-json", about = "Trade-in JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Trace export settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Quote pricing and offer expiry settings.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Trade-in box session settings.
    #[command(flatten)]
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Business rules handed to the application services.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        self.pricing.app_settings()
    }

    /// Session box store shared by every request.
    #[must_use]
    pub fn box_store(&self) -> SessionStore {
        self.session.box_store()
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_when_only_the_database_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "tradein-json",
            "--database-url",
            "postgres://localhost/tradein",
        ])?;

        let settings = config.app_settings();

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(settings.expiry.days(), 14);
        assert_eq!(settings.pricing.box_bonus, 500);
        assert_eq!(settings.pricing.charger_bonus, 500);
        assert_eq!(settings.pricing.currency, "USD");
        assert_eq!(config.box_store().idle_ttl(), SignedDuration::from_hours(2));

        Ok(())
    }

    #[test]
    fn pricing_flags_override_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "tradein-json",
            "--database-url",
            "postgres://localhost/tradein",
            "--offer-expiry-days",
            "7",
            "--box-bonus-minor",
            "1000",
            "--pricing-currency",
            "GBP",
        ])?;

        let settings = config.app_settings();

        assert_eq!(settings.expiry.days(), 7);
        assert_eq!(settings.pricing.box_bonus, 1000);
        assert_eq!(settings.pricing.currency, "GBP");

        Ok(())
    }

    #[test]
    fn box_idle_ttl_is_configurable() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "tradein-json",
            "--database-url",
            "postgres://localhost/tradein",
            "--box-idle-ttl-minutes",
            "15",
        ])?;

        assert_eq!(config.box_store().idle_ttl(), SignedDuration::from_mins(15));

        Ok(())
    }
}
