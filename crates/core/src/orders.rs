//! Order lifecycle

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::offers::UnknownStatus;

/// Fulfilment status of an order, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created from an accepted offer.
    OrderPlaced,

    /// The customer shipped the device.
    DeviceShipped,

    /// The device arrived.
    DeviceReceived,

    /// The device is being inspected.
    InspectionInProgress,

    /// Inspection finished; payment is queued.
    PayoutPending,

    /// The customer has been paid.
    PayoutComplete,
}

impl OrderStatus {
    /// Every status in fulfilment order.
    pub const SEQUENCE: [Self; 6] = [
        Self::OrderPlaced,
        Self::DeviceShipped,
        Self::DeviceReceived,
        Self::InspectionInProgress,
        Self::PayoutPending,
        Self::PayoutComplete,
    ];

    /// Stable string form used in storage and on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrderPlaced => "order_placed",
            Self::DeviceShipped => "device_shipped",
            Self::DeviceReceived => "device_received",
            Self::InspectionInProgress => "inspection_in_progress",
            Self::PayoutPending => "payout_pending",
            Self::PayoutComplete => "payout_complete",
        }
    }

    /// The status that immediately follows this one.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::OrderPlaced => Some(Self::DeviceShipped),
            Self::DeviceShipped => Some(Self::DeviceReceived),
            Self::DeviceReceived => Some(Self::InspectionInProgress),
            Self::InspectionInProgress => Some(Self::PayoutPending),
            Self::PayoutPending => Some(Self::PayoutComplete),
            Self::PayoutComplete => None,
        }
    }

    /// Whether an inspected final price may be recorded in this status.
    pub const fn accepts_final_price(self) -> bool {
        matches!(
            self,
            Self::DeviceReceived | Self::InspectionInProgress | Self::PayoutPending
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::SEQUENCE
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// How strictly a requested status change is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// Only the immediate successor is allowed.
    #[default]
    Strict,

    /// An administrator may jump to any other status; the change is flagged.
    Override,
}

/// How an accepted status change was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// The next step in the sequence.
    Advance,

    /// Anything else, allowed by an administrator override.
    Override,
}

/// Reasons an order status change is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderTransitionError {
    /// The order is already in the requested status.
    #[error("order is already {0}")]
    Unchanged(OrderStatus),

    /// The change skips intermediate steps.
    #[error("cannot move from {from} to {to} without passing {expected}")]
    SkipsSteps {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
        /// The step that must come next.
        expected: OrderStatus,
    },

    /// The change moves backwards or leaves a completed order.
    #[error("cannot move from {from} back to {to}")]
    Backwards {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },
}

/// Check a requested status change.
///
/// # Errors
///
/// - [`OrderTransitionError::Unchanged`]: `to` equals `from`, in either mode.
/// - [`OrderTransitionError::SkipsSteps`]: strict mode, `to` is further than the next step.
/// - [`OrderTransitionError::Backwards`]: strict mode, `to` comes before `from`.
pub fn check_transition(
    from: OrderStatus,
    to: OrderStatus,
    mode: TransitionMode,
) -> Result<TransitionKind, OrderTransitionError> {
    if from == to {
        return Err(OrderTransitionError::Unchanged(from));
    }

    if from.next() == Some(to) {
        return Ok(TransitionKind::Advance);
    }

    if mode == TransitionMode::Override {
        return Ok(TransitionKind::Override);
    }

    match from.next() {
        Some(expected) if to > from => Err(OrderTransitionError::SkipsSteps { from, to, expected }),
        _ => Err(OrderTransitionError::Backwards { from, to }),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn strict_mode_allows_each_next_step() -> TestResult {
        for pair in OrderStatus::SEQUENCE.windows(2) {
            let [from, to] = pair else {
                return Err("windows(2) yields pairs".into());
            };

            assert_eq!(
                check_transition(*from, *to, TransitionMode::Strict)?,
                TransitionKind::Advance
            );
        }

        Ok(())
    }

    #[test]
    fn strict_mode_rejects_skipping_to_payout() {
        assert_eq!(
            check_transition(
                OrderStatus::OrderPlaced,
                OrderStatus::PayoutComplete,
                TransitionMode::Strict
            ),
            Err(OrderTransitionError::SkipsSteps {
                from: OrderStatus::OrderPlaced,
                to: OrderStatus::PayoutComplete,
                expected: OrderStatus::DeviceShipped,
            })
        );
    }

    #[test]
    fn strict_mode_rejects_moving_backwards() {
        assert_eq!(
            check_transition(
                OrderStatus::PayoutComplete,
                OrderStatus::PayoutPending,
                TransitionMode::Strict
            ),
            Err(OrderTransitionError::Backwards {
                from: OrderStatus::PayoutComplete,
                to: OrderStatus::PayoutPending,
            })
        );
    }

    #[test]
    fn override_mode_allows_jumps_and_flags_them() -> TestResult {
        assert_eq!(
            check_transition(
                OrderStatus::OrderPlaced,
                OrderStatus::PayoutComplete,
                TransitionMode::Override
            )?,
            TransitionKind::Override
        );

        assert_eq!(
            check_transition(
                OrderStatus::DeviceShipped,
                OrderStatus::DeviceReceived,
                TransitionMode::Override
            )?,
            TransitionKind::Advance
        );

        Ok(())
    }

    #[test]
    fn same_status_is_rejected_in_both_modes() {
        for mode in [TransitionMode::Strict, TransitionMode::Override] {
            assert_eq!(
                check_transition(OrderStatus::DeviceShipped, OrderStatus::DeviceShipped, mode),
                Err(OrderTransitionError::Unchanged(OrderStatus::DeviceShipped))
            );
        }
    }

    #[test]
    fn final_price_window_covers_inspection() {
        let accepting: Vec<OrderStatus> = OrderStatus::SEQUENCE
            .into_iter()
            .filter(|status| status.accepts_final_price())
            .collect();

        assert_eq!(
            accepting,
            [
                OrderStatus::DeviceReceived,
                OrderStatus::InspectionInProgress,
                OrderStatus::PayoutPending
            ]
        );
    }

    #[test]
    fn status_strings_round_trip_through_from_str() -> TestResult {
        for status in OrderStatus::SEQUENCE {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
        }

        assert!("lost_in_post".parse::<OrderStatus>().is_err());

        Ok(())
    }
}
