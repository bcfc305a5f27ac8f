use serde::{Deserialize, Serialize};

use super::gem::GemType;

/// Every way a proposed action can be rejected. All variants are
/// recoverable: the turn controller records the rejection in the event
/// log and the turn passes to the next player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionError {
    /// Gem selection with the wrong shape: Gold, duplicates, or a
    /// count other than 3 distinct colors or 1 color taken twice.
    InvalidSelection,
    /// The bank cannot supply this gem in the required quantity.
    InsufficientBankSupply(GemType),
    /// Hand plus card bonuses plus Gold do not cover the card's cost.
    CannotAfford,
    /// The player already holds the maximum number of reserved cards.
    ReservationLimitExceeded,
    /// The action references a card the player cannot see, or is
    /// otherwise malformed.
    IllegalActionShape,
}
