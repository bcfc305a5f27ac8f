use serde::{Deserialize, Serialize};

use super::bank::{self, GemPool};
use super::card::{CardId, Noble, NobleId};
use super::config::GameConfig;
use super::error::ActionError;
use super::gem::GemType;
use super::market::Replenishment;
use super::player::RESERVE_LIMIT;
use super::state::GameState;

/// Everything an agent may propose on its turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// 3 distinct colors, or a single color to take 2 of it.
    TakeGems(Vec<GemType>),
    /// Buy a visible market card or one of the player's reserved cards.
    Purchase(CardId),
    /// Move a visible market card to the player's reserved list,
    /// taking 1 Gold if the bank has any.
    Reserve(CardId),
    /// Always legal; no effect beyond consuming the turn.
    Skip,
}

/// Side notes from a successfully applied action, surfaced through the
/// event log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub replenished: Option<Replenishment>,
    /// Gems drained by the hand cap.
    pub returned: GemPool,
    pub gold_granted: bool,
    pub nobles_awarded: Vec<NobleId>,
    pub discarded_reservation: Option<CardId>,
}

/// The sole mutation gateway. Validates `action` for the current
/// player and returns the successor state plus a report, or an error
/// with `state` guaranteed untouched. Turn advancement is the
/// controller's job, not this function's.
pub fn apply(
    state: &GameState,
    action: &Action,
    config: &GameConfig,
) -> Result<(GameState, ApplyReport), ActionError> {
    let mut next = state.clone();
    let mut report = ApplyReport::default();

    match action {
        Action::Skip => {}
        Action::TakeGems(selection) => {
            let seat = next.current_player;
            let outcome = bank::take_gems(&next.bank, &next.players[seat].hand, selection)?;
            next.bank = outcome.bank;
            next.players[seat].hand = outcome.hand;
            report.returned = outcome.returned;
        }
        Action::Purchase(card_id) => purchase(&mut next, *card_id, &mut report)?,
        Action::Reserve(card_id) => reserve(&mut next, *card_id, config, &mut report)?,
    }

    if config.noble_auto_award {
        award_nobles(&mut next, &mut report);
    }

    Ok((next, report))
}

fn purchase(next: &mut GameState, id: CardId, report: &mut ApplyReport) -> Result<(), ActionError> {
    let seat = next.current_player;
    let reserved_slot = next.players[seat].reserved.iter().position(|c| c.id == id);
    let card = match reserved_slot {
        Some(slot) => next.players[seat].reserved[slot].clone(),
        None => next
            .market
            .card(id)
            .cloned()
            .ok_or(ActionError::IllegalActionShape)?,
    };

    let player = &next.players[seat];
    let payment = card.settle(&player.hand, &player.bonus_totals())?;

    match reserved_slot {
        Some(slot) => {
            next.players[seat].reserved.remove(slot);
        }
        None => {
            if let Some((_, replenishment)) = next.market.take(id) {
                report.replenished = Some(replenishment);
            }
        }
    }

    // spent gems return to the bank; gems are conserved
    next.bank = next.bank.clone() + payment.spent;
    let player = &mut next.players[seat];
    player.hand = payment.hand;
    player.score += card.points;
    player.cards.push(card);
    Ok(())
}

fn reserve(
    next: &mut GameState,
    id: CardId,
    config: &GameConfig,
    report: &mut ApplyReport,
) -> Result<(), ActionError> {
    let seat = next.current_player;
    if next.market.card(id).is_none() {
        return Err(ActionError::IllegalActionShape);
    }

    if next.players[seat].reserved.len() >= RESERVE_LIMIT {
        if !config.discard_oldest_reserve {
            return Err(ActionError::ReservationLimitExceeded);
        }
        let discarded = next.players[seat].reserved.remove(0);
        report.discarded_reservation = Some(discarded.id);
        next.market.return_to_pile_bottom(discarded);
    }

    let (card, replenishment) = next
        .market
        .take(id)
        .ok_or(ActionError::IllegalActionShape)?;
    report.replenished = Some(replenishment);
    next.players[seat].reserved.push(card);

    // the Gold bonus is best-effort: an empty Gold pile never fails
    // the reservation
    if next.bank.debit(GemType::Gold, 1).is_ok() {
        next.players[seat].hand.credit(GemType::Gold, 1);
        report.gold_granted = true;
    }
    Ok(())
}

fn award_nobles(next: &mut GameState, report: &mut ApplyReport) {
    let seat = next.current_player;
    let bonuses = next.players[seat].bonus_totals();
    let earned: Vec<Noble> = next
        .nobles
        .iter()
        .filter(|noble| noble.earned_by(&bonuses))
        .cloned()
        .collect();

    for noble in earned {
        next.nobles.retain(|candidate| candidate.id != noble.id);
        report.nobles_awarded.push(noble.id);
        let player = &mut next.players[seat];
        player.score += noble.points;
        player.nobles.push(noble);
    }
}
