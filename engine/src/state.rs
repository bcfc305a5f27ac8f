use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::bank::GemPool;
use super::card::{Card, Noble, Tier};
use super::market::Market;
use super::player::Player;

/// The authoritative game state. Constructed once, then mutated only
/// through `rules::apply` and the turn controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub bank: GemPool,
    pub players: Vec<Player>,
    pub market: Market,
    /// Remaining noble catalog.
    pub nobles: Vec<Noble>,
    pub current_player: usize,
    pub rounds_played: u32,
    pub max_rounds: u32,
}

impl GameState {
    pub fn new(
        players: Vec<Player>,
        bank: GemPool,
        decks: BTreeMap<Tier, Vec<Card>>,
        nobles: Vec<Noble>,
        max_rounds: u32,
    ) -> Self {
        Self {
            bank,
            players,
            market: Market::new(decks),
            nobles,
            current_player: 0,
            rounds_played: 0,
            max_rounds,
        }
    }

    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// Bank plus every hand. Constant for the lifetime of a game; the
    /// turn controller asserts this after each applied action.
    pub fn circulating_gems(&self) -> GemPool {
        self.players
            .iter()
            .fold(self.bank.clone(), |total, player| total + player.hand.clone())
    }

    /// Read-only projection handed to the seat's agent: public
    /// information about everyone, plus the viewer's own reserved
    /// cards.
    pub fn view_for(&self, seat: usize) -> StateView {
        StateView {
            bank: self.bank.clone(),
            market: self.market.rows().clone(),
            players: self.players.iter().map(PublicPlayer::of).collect(),
            seat,
            reserved: self.players[seat].reserved.clone(),
            rounds_played: self.rounds_played,
            max_rounds: self.max_rounds,
        }
    }
}

/// What any opponent may know about a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPlayer {
    pub name: String,
    pub hand: GemPool,
    pub bonuses: GemPool,
    pub score: u8,
    pub cards: usize,
    pub reserved: usize,
}

impl PublicPlayer {
    fn of(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            hand: player.hand.clone(),
            bonuses: player.bonus_totals(),
            score: player.score,
            cards: player.cards.len(),
            reserved: player.reserved.len(),
        }
    }
}

/// The snapshot an agent reasons over. Owned, so a slow agent can hold
/// it without blocking the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateView {
    pub bank: GemPool,
    pub market: BTreeMap<Tier, Vec<Card>>,
    pub players: Vec<PublicPlayer>,
    /// Index of the requesting player in `players`.
    pub seat: usize,
    /// The requesting player's own reserved cards.
    pub reserved: Vec<Card>,
    pub rounds_played: u32,
    pub max_rounds: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardId;
    use crate::gem::GemType;

    fn two_player_state() -> GameState {
        let deck = vec![Card::new(
            CardId(1),
            Tier(1),
            GemPool::new(1, 1, 0, 0, 0, 0),
            1,
            None,
        )];
        GameState::new(
            vec![Player::new("A"), Player::new("B")],
            GemPool::new(4, 4, 4, 4, 4, 5),
            BTreeMap::from([(Tier(1), deck)]),
            vec![],
            30,
        )
    }

    #[test]
    fn circulating_gems_sum_bank_and_hands() {
        let mut state = two_player_state();
        state.players[0].hand.credit(GemType::Ruby, 2);
        state.players[1].hand.credit(GemType::Gold, 1);

        assert_eq!(state.circulating_gems(), GemPool::new(4, 4, 4, 6, 4, 6));
    }

    #[test]
    fn view_exposes_only_the_viewers_reserved_cards() {
        let mut state = two_player_state();
        let hidden = Card::new(CardId(9), Tier(1), GemPool::empty(), 0, None);
        state.players[1].reserved.push(hidden);

        let view = state.view_for(0);
        assert!(view.reserved.is_empty());
        assert_eq!(view.players[1].reserved, 1);
        assert_eq!(view.seat, 0);
    }
}
