use serde::{Deserialize, Serialize};

use super::bank::GemPool;
use super::card::{Card, Noble};

/// A player may hold at most this many reserved cards.
pub const RESERVE_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub hand: GemPool,
    /// Owned development cards, in purchase order.
    pub cards: Vec<Card>,
    /// Holds at most `RESERVE_LIMIT` cards.
    pub reserved: Vec<Card>,
    pub nobles: Vec<Noble>,
    /// Monotonically non-decreasing for the lifetime of the game.
    pub score: u8,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: GemPool::empty(),
            cards: vec![],
            reserved: vec![],
            nobles: vec![],
            score: 0,
        }
    }

    /// Permanent purchase discounts granted by owned cards.
    pub fn bonus_totals(&self) -> GemPool {
        let mut bonuses = GemPool::empty();
        for card in &self.cards {
            if let Some(gem) = card.bonus {
                bonuses.credit(gem, 1);
            }
        }
        bonuses
    }
}
