use serde::{Deserialize, Serialize};

use super::bank::GemPool;
use super::error::ActionError;
use super::gem::GemType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

/// A development card's difficulty bracket. Each tier has its own draw
/// pile and market row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tier(pub u8);

/// Immutable once defined; ownership moves from the market to a player
/// on purchase, or via the player's reserved list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub tier: Tier,
    /// Gem cost. Gold never appears here.
    pub cost: GemPool,
    pub points: u8,
    /// Permanent discount toward future purchases of this gem type.
    pub bonus: Option<GemType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NobleId(pub u32);

/// Read-only catalog entry; awarding is driven by `GameConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Noble {
    pub id: NobleId,
    /// Required bonus gems from owned cards, per gem type.
    pub requirement: GemPool,
    pub points: u8,
}

impl Noble {
    pub fn earned_by(&self, bonuses: &GemPool) -> bool {
        bonuses.covers(&self.requirement)
    }
}

/// A fully settled purchase: what stays in the hand and what goes back
/// to the bank.
#[derive(Debug, PartialEq, Eq)]
pub struct Payment {
    pub hand: GemPool,
    pub spent: GemPool,
}

impl Card {
    pub fn new(id: CardId, tier: Tier, cost: GemPool, points: u8, bonus: Option<GemType>) -> Self {
        Self { id, tier, cost, points, bonus }
    }

    /// Computes the payment for this card, or `CannotAfford` with no
    /// other effect. Per color: bonuses discount the cost, the matching
    /// colored gems pay next, and Gold covers any remaining shortfall.
    pub fn settle(&self, hand: &GemPool, bonuses: &GemPool) -> Result<Payment, ActionError> {
        let mut hand = hand.clone();
        let mut spent = GemPool::empty();
        let mut gold_needed = 0u8;

        for gem in GemType::COLORS {
            let owed = self.cost.count(gem).saturating_sub(bonuses.count(gem));
            let colored = owed.min(hand.count(gem));
            hand.debit(gem, colored).map_err(|_| ActionError::CannotAfford)?;
            spent.credit(gem, colored);
            gold_needed += owed - colored;
        }

        hand.debit(GemType::Gold, gold_needed)
            .map_err(|_| ActionError::CannotAfford)?;
        spent.credit(GemType::Gold, gold_needed);

        Ok(Payment { hand, spent })
    }
}
