use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, Tier};

/// Visible purchasable slots per tier.
pub const ROW_SIZE: usize = 4;

/// Emitted whenever a vacated market slot is refilled. A depleted draw
/// pile leaves the slot empty; that is informational, never a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replenishment {
    pub tier: Tier,
    pub drawn: Option<CardId>,
}

/// The purchasable card rows plus the face-down draw piles feeding
/// them. Cards only leave through `take`, which keeps the rows filled
/// while piles last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    rows: BTreeMap<Tier, Vec<Card>>,
    piles: BTreeMap<Tier, Vec<Card>>,
}

impl Market {
    /// Reveals up to `ROW_SIZE` cards from the top of each tier's pile.
    pub fn new(decks: BTreeMap<Tier, Vec<Card>>) -> Self {
        let mut rows = BTreeMap::new();
        let mut piles = BTreeMap::new();
        for (tier, mut pile) in decks {
            let mut row = Vec::with_capacity(ROW_SIZE);
            for _ in 0..ROW_SIZE {
                if let Some(card) = pile.pop() {
                    row.push(card);
                }
            }
            rows.insert(tier, row);
            piles.insert(tier, pile);
        }
        Self { rows, piles }
    }

    pub fn rows(&self) -> &BTreeMap<Tier, Vec<Card>> {
        &self.rows
    }

    pub fn pile_size(&self, tier: Tier) -> usize {
        self.piles.get(&tier).map_or(0, Vec::len)
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.rows.values().flatten().find(|card| card.id == id)
    }

    /// Removes a visible card and refills its slot from the tier's
    /// pile, reporting what (if anything) was drawn.
    pub fn take(&mut self, id: CardId) -> Option<(Card, Replenishment)> {
        for (tier, row) in self.rows.iter_mut() {
            if let Some(position) = row.iter().position(|card| card.id == id) {
                let card = row.remove(position);
                let drawn = self.piles.get_mut(tier).and_then(Vec::pop);
                let drawn_id = drawn.as_ref().map(|card| card.id);
                if let Some(replacement) = drawn {
                    row.push(replacement);
                }
                return Some((card, Replenishment { tier: *tier, drawn: drawn_id }));
            }
        }
        None
    }

    /// Slides a card under its tier's draw pile. Used when a forced
    /// reservation discard puts a card back into circulation.
    pub fn return_to_pile_bottom(&mut self, card: Card) {
        self.piles.entry(card.tier).or_default().insert(0, card);
    }
}
