use engine::agent::Agent;
use engine::bank::GemPool;
use engine::card::Card;
use engine::gem::GemType;
use engine::player::RESERVE_LIMIT;
use engine::rules::Action;
use engine::state::StateView;
use futures_lite::future::{self, Boxed};

/// The reference game's built-in heuristic: stock up on gems first,
/// then buy the first affordable card, then reserve one, then skip.
#[derive(Debug, Clone, Copy)]
pub struct GreedyAgent;

impl Agent for GreedyAgent {
    fn propose_action(&mut self, view: StateView) -> Boxed<Action> {
        Box::pin(future::ready(decide(&view)))
    }
}

fn decide(view: &StateView) -> Action {
    let me = &view.players[view.seat];

    let available: Vec<GemType> = GemType::COLORS
        .iter()
        .copied()
        .filter(|gem| view.bank.count(*gem) > 0)
        .collect();
    if available.len() >= 3 {
        return Action::TakeGems(available[..3].to_vec());
    }
    if let Some(gem) = available
        .iter()
        .copied()
        .find(|gem| view.bank.count(*gem) >= 4)
    {
        return Action::TakeGems(vec![gem]);
    }

    let candidates = view.market.values().flatten().chain(view.reserved.iter());
    for card in candidates {
        if affordable(card, &me.hand, &me.bonuses) {
            return Action::Purchase(card.id);
        }
    }

    if view.reserved.len() < RESERVE_LIMIT {
        if let Some(card) = view.market.values().flatten().next() {
            return Action::Reserve(card.id);
        }
    }

    Action::Skip
}

fn affordable(card: &Card, hand: &GemPool, bonuses: &GemPool) -> bool {
    card.settle(hand, bonuses).is_ok()
}
