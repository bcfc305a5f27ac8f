use futures_lite::future::Boxed;

use super::rules::Action;
use super::state::StateView;

/// External decision source: human input, a scripted heuristic, or a
/// remote model. The engine only checks whether the proposed action is
/// legal, never how it was produced. An agent that outlives its turn
/// budget is treated as having answered `Skip`.
pub trait Agent: Send {
    fn propose_action(&mut self, view: StateView) -> Boxed<Action>;
}
