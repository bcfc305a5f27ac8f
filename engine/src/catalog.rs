use std::collections::BTreeMap;

use rand::seq::SliceRandom;

use super::bank::GemPool;
use super::card::{Card, CardId, Noble, NobleId, Tier};
use super::gem::GemType;
use super::player::Player;
use super::state::GameState;

/// Placeholder development cards. A real deck substitutes by building
/// its own card list and calling `GameState::new`; nothing in the
/// engine depends on this catalog.
pub fn starter_cards() -> Vec<Card> {
    vec![
        Card::new(
            CardId(1),
            Tier(1),
            GemPool::new(1, 1, 0, 0, 0, 0),
            1,
            Some(GemType::Diamond),
        ),
        Card::new(
            CardId(2),
            Tier(2),
            GemPool::new(0, 0, 3, 2, 0, 0),
            2,
            Some(GemType::Emerald),
        ),
    ]
}

pub fn starter_nobles() -> Vec<Noble> {
    vec![Noble {
        id: NobleId(1),
        requirement: GemPool::new(3, 3, 0, 0, 0, 0),
        points: 3,
    }]
}

/// Bank sizes by player count. Gold is always 5.
pub fn bank_for_players(count: usize) -> Option<GemPool> {
    let colored = match count {
        2 => 4,
        3 => 5,
        4 => 7,
        _ => return None,
    };
    Some(GemPool::new(colored, colored, colored, colored, colored, 5))
}

/// Splits a card list into per-tier draw piles and shuffles each.
pub fn shuffled_decks(cards: Vec<Card>) -> BTreeMap<Tier, Vec<Card>> {
    let mut decks: BTreeMap<Tier, Vec<Card>> = BTreeMap::new();
    for card in cards {
        decks.entry(card.tier).or_default().push(card);
    }
    let rng = &mut rand::thread_rng();
    for pile in decks.values_mut() {
        pile.shuffle(rng);
    }
    decks
}

/// A ready-to-play state from the placeholder catalog, or `None` for
/// an unsupported player count.
pub fn starter_state(names: &[&str], max_rounds: u32) -> Option<GameState> {
    let bank = bank_for_players(names.len())?;
    let players = names.iter().map(|name| Player::new(*name)).collect();
    Some(GameState::new(
        players,
        bank,
        shuffled_decks(starter_cards()),
        starter_nobles(),
        max_rounds,
    ))
}
