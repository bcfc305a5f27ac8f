use std::time::Duration;

/// Tunable game rules. The defaults match the reference game; the two
/// booleans pick between rule variants rather than hard-coding one.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Reaching this score ends the game after the current action.
    pub target_score: u8,
    /// Budget for one agent to answer; a lapse counts as `Skip`.
    pub turn_timeout: Duration,
    /// Grant nobles automatically when a player's bonus totals meet a
    /// requirement.
    pub noble_auto_award: bool,
    /// On a 4th reservation, discard the oldest reserved card instead
    /// of rejecting with `ReservationLimitExceeded`.
    pub discard_oldest_reserve: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: 15,
            turn_timeout: Duration::from_secs(5),
            noble_auto_award: false,
            discard_oldest_reserve: false,
        }
    }
}
