//! Offer lifecycle
//!
//! ```text
//! pending ──accept──▶ accepted
//!    │  ╲──decline──▶ declined
//!    │   ╲──expire──▶ expired
//!    └─revise─▶ revised ─(accept | decline | expire | revise)─▶ …
//! ```

use std::{fmt, str::FromStr};

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of days an offer stays open.
pub const DEFAULT_EXPIRY_DAYS: u32 = 14;

/// Status of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    /// Submitted and awaiting review.
    Pending,

    /// Accepted by an administrator; an order exists.
    Accepted,

    /// Declined by an administrator.
    Declined,

    /// The expiry window passed before a decision.
    Expired,

    /// An administrator changed the quoted price before deciding.
    Revised,
}

impl OfferStatus {
    /// Stable string form used in storage and on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Expired => "expired",
            Self::Revised => "revised",
        }
    }

    /// Terminal states accept no further actions.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Declined | Self::Expired)
    }

    /// Status reached by applying `action`, ignoring time.
    ///
    /// # Errors
    ///
    /// Returns [`OfferTransitionError::Terminal`] when the offer is already decided.
    pub const fn apply(self, action: OfferAction) -> Result<Self, OfferTransitionError> {
        if self.is_terminal() {
            return Err(OfferTransitionError::Terminal(self));
        }

        Ok(match action {
            OfferAction::Accept => Self::Accepted,
            OfferAction::Decline => Self::Declined,
            OfferAction::Revise => Self::Revised,
            OfferAction::Expire => Self::Expired,
        })
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognised status strings.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown status \"{0}\"")]
pub struct UnknownStatus(pub String);

impl FromStr for OfferStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            // Older rows used "rejected" for declined offers.
            "declined" | "rejected" => Ok(Self::Declined),
            "expired" => Ok(Self::Expired),
            "revised" => Ok(Self::Revised),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Something that moves an offer between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferAction {
    /// Administrator accepts the offer.
    Accept,

    /// Administrator declines the offer.
    Decline,

    /// Administrator changes the quoted price.
    Revise,

    /// The expiry window elapsed.
    Expire,
}

/// Reasons an offer transition is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OfferTransitionError {
    /// The offer is already accepted, declined or expired.
    #[error("offer is already {0}")]
    Terminal(OfferStatus),

    /// The offer's expiry timestamp has passed.
    #[error("offer expired at {0}")]
    Expired(Timestamp),

    /// Expiry was requested before the offer was due.
    #[error("offer does not expire until {0}")]
    NotYetDue(Timestamp),
}

/// How long submitted offers stay open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryPolicy {
    days: u32,
}

impl ExpiryPolicy {
    /// Offers expire `days` × 24 hours after submission.
    pub const fn new(days: u32) -> Self {
        Self { days }
    }

    /// Length of the window in days.
    pub const fn days(self) -> u32 {
        self.days
    }

    /// The moment an offer submitted at `submitted_at` expires.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is outside the supported timestamp range.
    pub fn expires_at(self, submitted_at: Timestamp) -> Result<Timestamp, jiff::Error> {
        submitted_at.checked_add(SignedDuration::from_hours(i64::from(self.days) * 24))
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRY_DAYS)
    }
}

/// Whether an offer expiring at `expires_at` has expired at `now`.
pub fn is_expired(expires_at: Timestamp, now: Timestamp) -> bool {
    now >= expires_at
}

/// The time-relevant state of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferState {
    /// Stored status.
    pub status: OfferStatus,

    /// When the offer stops being actionable.
    pub expires_at: Timestamp,
}

impl OfferState {
    /// The status as it should be presented at `now`.
    ///
    /// Open offers past their expiry read as expired even before the sweep persists it.
    pub fn effective_status(self, now: Timestamp) -> OfferStatus {
        if !self.status.is_terminal() && is_expired(self.expires_at, now) {
            OfferStatus::Expired
        } else {
            self.status
        }
    }

    /// Validate `action` at `now` and return the resulting status.
    ///
    /// # Errors
    ///
    /// - [`OfferTransitionError::Terminal`]: the offer is already decided.
    /// - [`OfferTransitionError::Expired`]: an administrator acted after expiry.
    /// - [`OfferTransitionError::NotYetDue`]: expiry was requested too early.
    pub fn transition(
        self,
        action: OfferAction,
        now: Timestamp,
    ) -> Result<OfferStatus, OfferTransitionError> {
        let next = self.status.apply(action)?;
        let expired = is_expired(self.expires_at, now);

        match action {
            OfferAction::Expire if !expired => {
                Err(OfferTransitionError::NotYetDue(self.expires_at))
            }
            OfferAction::Accept | OfferAction::Decline | OfferAction::Revise if expired => {
                Err(OfferTransitionError::Expired(self.expires_at))
            }
            _ => Ok(next),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn open_state(status: OfferStatus) -> TestResult<(OfferState, Timestamp)> {
        let submitted: Timestamp = "2026-03-01T12:00:00Z".parse()?;
        let expires_at = ExpiryPolicy::default().expires_at(submitted)?;

        Ok((OfferState { status, expires_at }, submitted))
    }

    #[test]
    fn default_window_is_fourteen_days() -> TestResult {
        let submitted: Timestamp = "2026-03-01T12:00:00Z".parse()?;
        let expected: Timestamp = "2026-03-15T12:00:00Z".parse()?;

        assert_eq!(ExpiryPolicy::default().expires_at(submitted)?, expected);

        Ok(())
    }

    #[test]
    fn expiry_is_inclusive_at_the_boundary() -> TestResult {
        let submitted: Timestamp = "2026-03-01T00:00:00Z".parse()?;
        let expires_at = ExpiryPolicy::new(3).expires_at(submitted)?;
        let just_before = expires_at.checked_sub(SignedDuration::from_secs(1))?;

        assert!(!is_expired(expires_at, just_before));
        assert!(is_expired(expires_at, expires_at));

        Ok(())
    }

    #[test]
    fn pending_offers_can_be_accepted_declined_or_revised() -> TestResult {
        let (state, now) = open_state(OfferStatus::Pending)?;

        assert_eq!(state.transition(OfferAction::Accept, now)?, OfferStatus::Accepted);
        assert_eq!(state.transition(OfferAction::Decline, now)?, OfferStatus::Declined);
        assert_eq!(state.transition(OfferAction::Revise, now)?, OfferStatus::Revised);

        Ok(())
    }

    #[test]
    fn revised_offers_stay_actionable() -> TestResult {
        let (state, now) = open_state(OfferStatus::Revised)?;

        assert_eq!(state.transition(OfferAction::Revise, now)?, OfferStatus::Revised);
        assert_eq!(state.transition(OfferAction::Accept, now)?, OfferStatus::Accepted);

        Ok(())
    }

    #[test]
    fn terminal_offers_reject_every_action() -> TestResult {
        for status in [
            OfferStatus::Accepted,
            OfferStatus::Declined,
            OfferStatus::Expired,
        ] {
            let (state, now) = open_state(status)?;

            for action in [
                OfferAction::Accept,
                OfferAction::Decline,
                OfferAction::Revise,
                OfferAction::Expire,
            ] {
                assert_eq!(
                    state.transition(action, now),
                    Err(OfferTransitionError::Terminal(status)),
                    "{status} should reject {action:?}"
                );
            }
        }

        Ok(())
    }

    #[test]
    fn acting_after_expiry_is_rejected() -> TestResult {
        let (state, _) = open_state(OfferStatus::Pending)?;

        assert_eq!(
            state.transition(OfferAction::Accept, state.expires_at),
            Err(OfferTransitionError::Expired(state.expires_at))
        );
        assert_eq!(
            state.transition(OfferAction::Expire, state.expires_at)?,
            OfferStatus::Expired
        );

        Ok(())
    }

    #[test]
    fn expiring_early_is_rejected() -> TestResult {
        let (state, now) = open_state(OfferStatus::Pending)?;

        assert_eq!(
            state.transition(OfferAction::Expire, now),
            Err(OfferTransitionError::NotYetDue(state.expires_at))
        );

        Ok(())
    }

    #[test]
    fn effective_status_reflects_elapsed_expiry() -> TestResult {
        let (state, now) = open_state(OfferStatus::Revised)?;

        assert_eq!(state.effective_status(now), OfferStatus::Revised);
        assert_eq!(state.effective_status(state.expires_at), OfferStatus::Expired);

        let accepted = OfferState {
            status: OfferStatus::Accepted,
            ..state
        };

        assert_eq!(
            accepted.effective_status(state.expires_at),
            OfferStatus::Accepted
        );

        Ok(())
    }

    #[test]
    fn legacy_rejected_status_reads_as_declined() -> TestResult {
        assert_eq!("rejected".parse::<OfferStatus>()?, OfferStatus::Declined);

        Ok(())
    }
}
