//! Session Config

use clap::Args;
use jiff::SignedDuration;
use tradein::tradein_box::SessionStore;

/// Lifetime of anonymous trade-in boxes.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Minutes a box may sit untouched before it is dropped
    #[arg(long, env = "BOX_IDLE_TTL_MINUTES", default_value_t = 120)]
    pub box_idle_ttl_minutes: u32,
}

impl SessionConfig {
    /// Empty box store honouring the configured idle TTL.
    #[must_use]
    pub fn box_store(&self) -> SessionStore {
        let minutes = i64::from(self.box_idle_ttl_minutes);

        SessionStore::with_idle_ttl(SignedDuration::from_mins(minutes))
    }
}
