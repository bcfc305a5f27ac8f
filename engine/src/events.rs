use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bank::GemPool;
use super::controller::Outcome;
use super::error::ActionError;
use super::rules::{Action, ApplyReport};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    Applied(ApplyReport),
    Rejected(ActionError),
}

/// One record per solicited action, successful or not. This is the
/// only channel surrounding code has for rendering the game; the
/// engine itself never prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub event_id: Uuid,
    pub round: u32,
    pub player: String,
    pub action: Action,
    pub outcome: ActionOutcome,
    /// Bank snapshot after the action resolved.
    pub bank: GemPool,
    /// The acting player's score after the action resolved.
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineEvent {
    Action(ActionEvent),
    RoundComplete { round: u32, scores: Vec<PlayerScore> },
    GameOver { outcome: Outcome },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gem::GemType;

    #[test]
    fn events_round_trip_through_json() {
        let event = EngineEvent::Action(ActionEvent {
            event_id: Uuid::new_v4(),
            round: 2,
            player: "A".into(),
            action: Action::TakeGems(vec![GemType::Diamond]),
            outcome: ActionOutcome::Rejected(ActionError::InsufficientBankSupply(
                GemType::Diamond,
            )),
            bank: GemPool::new(4, 4, 4, 4, 4, 5),
            score: 0,
        });

        let encoded = serde_json::to_string(&event).unwrap();
        let decoded: EngineEvent = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, event);
    }
}
