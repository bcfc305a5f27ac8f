use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum GemType {
    Diamond,
    Sapphire,
    Emerald,
    Ruby,
    Onyx,
    Gold,
}

impl GemType {
    /// Fixed enumeration order. Excess gems drain from a player's hand
    /// in this order, so overflow handling is deterministic.
    pub const ALL: [GemType; 6] = [
        GemType::Diamond,
        GemType::Sapphire,
        GemType::Emerald,
        GemType::Ruby,
        GemType::Onyx,
        GemType::Gold,
    ];

    /// The gems that can be drawn from the bank. Gold is a wildcard
    /// and only enters a hand by reserving a card.
    pub const COLORS: [GemType; 5] = [
        GemType::Diamond,
        GemType::Sapphire,
        GemType::Emerald,
        GemType::Ruby,
        GemType::Onyx,
    ];

    pub fn is_gold(self) -> bool {
        matches!(self, GemType::Gold)
    }
}
