use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::timeout;
use uuid::Uuid;

use super::agent::Agent;
use super::bank::GemPool;
use super::config::GameConfig;
use super::events::{ActionEvent, ActionOutcome, EngineEvent, PlayerScore};
use super::rules::{self, Action};
use super::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingAction,
    RoundComplete,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Strictly highest score once any player reached the target.
    Winner { player: String, score: u8 },
    /// `tied` is empty when the round cap expired with nobody at the
    /// target, and names the top-scoring players when they finished
    /// level.
    Draw { tied: Vec<String> },
}

/// Drives the game: solicits one action per tick from the seated
/// agent, applies it through `rules::apply`, advances the seat whether
/// or not the action was legal, and watches the end conditions.
pub struct TurnController {
    state: GameState,
    agents: Vec<Box<dyn Agent>>,
    config: GameConfig,
    phase: Phase,
    initial_gems: GemPool,
    outcome: Option<Outcome>,
}

impl TurnController {
    /// Panics unless there is exactly one agent per seated player.
    pub fn new(state: GameState, agents: Vec<Box<dyn Agent>>, config: GameConfig) -> Self {
        assert_eq!(
            state.players.len(),
            agents.len(),
            "every player needs an agent"
        );
        let initial_gems = state.circulating_gems();
        Self {
            state,
            agents,
            config,
            phase: Phase::AwaitingAction,
            initial_gems,
            outcome: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Plays one turn and returns the events it produced. A rejected
    /// or timed-out action still consumes the turn; retrying is the
    /// agent's business, not the engine's.
    pub async fn tick(&mut self) -> Vec<EngineEvent> {
        assert_ne!(self.phase, Phase::GameOver, "tick on a finished game");

        let seat = self.state.current_player;
        let view = self.state.view_for(seat);
        let action = match timeout(self.config.turn_timeout, self.agents[seat].propose_action(view))
            .await
        {
            Ok(action) => action,
            Err(_) => Action::Skip,
        };

        let outcome = match rules::apply(&self.state, &action, &self.config) {
            Ok((next, report)) => {
                self.state = next;
                // a broken conservation invariant means the ledger's
                // atomicity contract was violated; that is a bug, not
                // a game error
                assert_eq!(
                    self.state.circulating_gems(),
                    self.initial_gems,
                    "gem conservation violated"
                );
                ActionOutcome::Applied(report)
            }
            Err(error) => ActionOutcome::Rejected(error),
        };

        let player = &self.state.players[seat];
        let mut events = vec![EngineEvent::Action(ActionEvent {
            event_id: Uuid::new_v4(),
            round: self.state.rounds_played,
            player: player.name.clone(),
            action,
            outcome,
            bank: self.state.bank.clone(),
            score: player.score,
        })];

        self.phase = Phase::AwaitingAction;
        self.state.current_player = (seat + 1) % self.state.players.len();
        if self.state.current_player == 0 {
            self.state.rounds_played += 1;
            self.phase = Phase::RoundComplete;
            events.push(EngineEvent::RoundComplete {
                round: self.state.rounds_played,
                scores: self
                    .state
                    .players
                    .iter()
                    .map(|p| PlayerScore { player: p.name.clone(), score: p.score })
                    .collect(),
            });
        }

        if let Some(outcome) = self.end_condition() {
            self.phase = Phase::GameOver;
            self.outcome = Some(outcome.clone());
            events.push(EngineEvent::GameOver { outcome });
        }

        events
    }

    /// Checked after every completed action: target score first, then
    /// the round cap.
    fn end_condition(&self) -> Option<Outcome> {
        let target_reached = self
            .state
            .players
            .iter()
            .any(|p| p.score >= self.config.target_score);

        if target_reached {
            let top = self.state.players.iter().map(|p| p.score).max()?;
            let leaders: Vec<&str> = self
                .state
                .players
                .iter()
                .filter(|p| p.score == top)
                .map(|p| p.name.as_str())
                .collect();
            return Some(match leaders[..] {
                [single] => Outcome::Winner { player: single.to_string(), score: top },
                _ => Outcome::Draw { tied: leaders.iter().map(|n| n.to_string()).collect() },
            });
        }

        if self.state.rounds_played >= self.state.max_rounds {
            return Some(Outcome::Draw { tied: vec![] });
        }

        None
    }

    /// Runs the game to completion, forwarding every event to `sink`.
    /// The cancellation flag is honored strictly between turns — never
    /// mid-mutation — and returns `None` if it fired before the game
    /// finished.
    pub async fn run(
        mut self,
        cancel: watch::Receiver<bool>,
        mut sink: impl FnMut(&EngineEvent),
    ) -> Option<Outcome> {
        while self.phase != Phase::GameOver {
            if *cancel.borrow() {
                return None;
            }
            for event in self.tick().await {
                sink(&event);
            }
        }
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use futures_lite::future::{self, Boxed};

    use super::*;
    use crate::bank::GemPool;
    use crate::card::{Card, CardId, Tier};
    use crate::error::ActionError;
    use crate::gem::GemType;
    use crate::player::Player;
    use crate::state::StateView;

    /// Plays a fixed script, then skips forever.
    struct Scripted(Vec<Action>);

    impl Agent for Scripted {
        fn propose_action(&mut self, _view: StateView) -> Boxed<Action> {
            let action = if self.0.is_empty() { Action::Skip } else { self.0.remove(0) };
            Box::pin(future::ready(action))
        }
    }

    /// Never answers.
    struct Stalled;

    impl Agent for Stalled {
        fn propose_action(&mut self, _view: StateView) -> Boxed<Action> {
            Box::pin(future::pending())
        }
    }

    fn cheap_card(id: u32) -> Card {
        Card::new(CardId(id), Tier(1), GemPool::new(1, 1, 0, 0, 0, 0), 1, None)
    }

    fn two_player_state(max_rounds: u32) -> GameState {
        GameState::new(
            vec![Player::new("A"), Player::new("B")],
            GemPool::new(4, 4, 4, 4, 4, 5),
            BTreeMap::from([(Tier(1), vec![cheap_card(1)])]),
            vec![],
            max_rounds,
        )
    }

    fn skippers() -> Vec<Box<dyn Agent>> {
        vec![Box::new(Scripted(vec![])), Box::new(Scripted(vec![]))]
    }

    fn fast_config() -> GameConfig {
        GameConfig { turn_timeout: Duration::from_millis(50), ..GameConfig::default() }
    }

    #[tokio::test]
    async fn a_silent_agent_forfeits_into_skip() {
        let agents: Vec<Box<dyn Agent>> = vec![Box::new(Stalled), Box::new(Scripted(vec![]))];
        let mut controller =
            TurnController::new(two_player_state(30), agents, fast_config());

        let events = controller.tick().await;

        match &events[0] {
            EngineEvent::Action(event) => {
                assert_eq!(event.action, Action::Skip);
                assert_eq!(event.outcome, ActionOutcome::Applied(Default::default()));
            }
            other => panic!("expected an action event, got {other:?}"),
        }
        assert_eq!(controller.state().current_player, 1);
    }

    #[tokio::test]
    async fn an_illegal_action_still_consumes_the_turn() {
        let script = vec![Action::TakeGems(vec![GemType::Gold])];
        let agents: Vec<Box<dyn Agent>> =
            vec![Box::new(Scripted(script)), Box::new(Scripted(vec![]))];
        let mut controller =
            TurnController::new(two_player_state(30), agents, fast_config());

        let events = controller.tick().await;

        match &events[0] {
            EngineEvent::Action(event) => {
                assert_eq!(
                    event.outcome,
                    ActionOutcome::Rejected(ActionError::InvalidSelection)
                );
            }
            other => panic!("expected an action event, got {other:?}"),
        }
        assert_eq!(controller.state().current_player, 1);
        assert_eq!(controller.phase(), Phase::AwaitingAction);
    }

    #[tokio::test]
    async fn round_cap_ends_the_game_in_a_draw() {
        let controller = TurnController::new(two_player_state(1), skippers(), fast_config());

        let (_, cancel) = watch::channel(false);
        let mut seen_round_complete = false;
        let outcome = controller
            .run(cancel, |event| {
                if let EngineEvent::RoundComplete { round, .. } = event {
                    assert_eq!(*round, 1);
                    seen_round_complete = true;
                }
            })
            .await;

        assert!(seen_round_complete);
        assert_eq!(outcome, Some(Outcome::Draw { tied: vec![] }));
    }

    #[tokio::test]
    async fn reaching_the_target_score_crowns_the_top_scorer() {
        let mut state = two_player_state(30);
        state.players[0].score = 16;
        state.players[1].score = 3;
        let mut controller = TurnController::new(state, skippers(), fast_config());

        let events = controller.tick().await;

        let game_over = events.iter().find_map(|event| match event {
            EngineEvent::GameOver { outcome } => Some(outcome.clone()),
            _ => None,
        });
        assert_eq!(
            game_over,
            Some(Outcome::Winner { player: "A".into(), score: 16 })
        );
        assert_eq!(controller.phase(), Phase::GameOver);
    }

    #[tokio::test]
    async fn a_level_finish_is_a_draw_between_the_leaders() {
        let mut state = two_player_state(30);
        state.players[0].score = 15;
        state.players[1].score = 15;
        let mut controller = TurnController::new(state, skippers(), fast_config());

        let events = controller.tick().await;

        let game_over = events.iter().find_map(|event| match event {
            EngineEvent::GameOver { outcome } => Some(outcome.clone()),
            _ => None,
        });
        assert_eq!(
            game_over,
            Some(Outcome::Draw { tied: vec!["A".into(), "B".into()] })
        );
    }

    #[tokio::test]
    async fn cancellation_stops_the_game_between_turns() {
        let controller = TurnController::new(two_player_state(30), skippers(), fast_config());

        let (cancel_tx, cancel_rx) = watch::channel(false);
        cancel_tx.send(true).unwrap();

        let outcome = controller.run(cancel_rx, |_| {}).await;
        assert_eq!(outcome, None);
    }

    #[tokio::test]
    async fn a_full_scripted_game_conserves_gems_and_scores() {
        let mut state = two_player_state(5);
        state.players[0].hand = GemPool::new(1, 1, 0, 0, 0, 0);
        let script = vec![
            Action::TakeGems(vec![GemType::Ruby, GemType::Onyx, GemType::Emerald]),
            Action::Purchase(CardId(1)),
            Action::Reserve(CardId(1)),
        ];
        let agents: Vec<Box<dyn Agent>> =
            vec![Box::new(Scripted(script)), Box::new(Scripted(vec![]))];
        let controller = TurnController::new(state, agents, fast_config());

        let (_, cancel) = watch::channel(false);
        let mut last_scores: Vec<u8> = vec![0, 0];
        let outcome = controller
            .run(cancel, |event| {
                if let EngineEvent::RoundComplete { scores, .. } = event {
                    for (index, entry) in scores.iter().enumerate() {
                        // monotone: never below what we saw before
                        assert!(entry.score >= last_scores[index]);
                        last_scores[index] = entry.score;
                    }
                }
            })
            .await;

        assert_eq!(outcome, Some(Outcome::Draw { tied: vec![] }));
        assert_eq!(last_scores[0], 1);
    }
}
