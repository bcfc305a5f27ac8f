use std::collections::HashMap;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use super::error::ActionError;
use super::gem::GemType;

/// A player may hold at most this many gem tokens after taking gems.
pub const HAND_LIMIT: u16 = 10;

/// Taking 2 of one color is only allowed while its pile holds at least
/// this many tokens.
pub const MIN_PILE_SIZE_TO_TAKE_TWO: u8 = 4;

/// A counted set of gem tokens: the shared bank, a player's hand, a
/// card cost or a noble requirement are all `GemPool`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemPool {
    counts: HashMap<GemType, u8>,
}

impl GemPool {
    pub fn new(diamond: u8, sapphire: u8, emerald: u8, ruby: u8, onyx: u8, gold: u8) -> Self {
        Self {
            counts: HashMap::from([
                (GemType::Diamond, diamond),
                (GemType::Sapphire, sapphire),
                (GemType::Emerald, emerald),
                (GemType::Ruby, ruby),
                (GemType::Onyx, onyx),
                (GemType::Gold, gold),
            ]),
        }
    }

    pub fn empty() -> Self {
        Self::new(0, 0, 0, 0, 0, 0)
    }

    pub fn from_list(gems: &[GemType]) -> Self {
        let mut pool = Self::empty();
        for gem in gems {
            pool.credit(*gem, 1);
        }
        pool
    }

    pub fn count(&self, gem: GemType) -> u8 {
        self.counts.get(&gem).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u16 {
        GemType::ALL.iter().map(|gem| u16::from(self.count(*gem))).sum()
    }

    pub fn credit(&mut self, gem: GemType, quantity: u8) {
        let current = self.count(gem);
        self.counts.insert(gem, current + quantity);
    }

    /// Removes `quantity` tokens, or removes nothing and reports the
    /// short gem.
    pub fn debit(&mut self, gem: GemType, quantity: u8) -> Result<(), GemType> {
        let current = self.count(gem);
        if quantity > current {
            return Err(gem);
        }
        self.counts.insert(gem, current - quantity);
        Ok(())
    }

    /// True when every count in `required` is covered by this pool.
    pub fn covers(&self, required: &GemPool) -> bool {
        GemType::ALL
            .iter()
            .all(|gem| self.count(*gem) >= required.count(*gem))
    }
}

impl Default for GemPool {
    fn default() -> Self {
        Self::empty()
    }
}

impl Add<GemPool> for GemPool {
    type Output = GemPool;

    fn add(self, rhs: GemPool) -> Self::Output {
        let mut sum = self;
        for gem in GemType::ALL {
            sum.credit(gem, rhs.count(gem));
        }
        sum
    }
}

impl Sub<GemPool> for GemPool {
    /// The error names the first gem (in enumeration order) the pool
    /// ran short of.
    type Output = Result<GemPool, GemType>;

    fn sub(self, rhs: GemPool) -> Self::Output {
        let mut remaining = self;
        for gem in GemType::ALL {
            remaining.debit(gem, rhs.count(gem))?;
        }
        Ok(remaining)
    }
}

/// Result of a successful gem draw. The ledger never applies a draw
/// partially: either all three fields are consistent or the request
/// failed with no effect.
#[derive(Debug, PartialEq, Eq)]
pub struct TakeOutcome {
    pub bank: GemPool,
    pub hand: GemPool,
    /// Gems drained back to the bank by the hand cap, in
    /// `GemType::ALL` order.
    pub returned: GemPool,
}

/// The gem-draw rule: exactly 3 distinct colors, each with at least one
/// token in the bank, or exactly 1 color with a pile of 4 or more to
/// take 2 of it. Gold can never be selected.
pub fn take_gems(
    bank: &GemPool,
    hand: &GemPool,
    selection: &[GemType],
) -> Result<TakeOutcome, ActionError> {
    if selection.iter().any(|gem| gem.is_gold()) {
        return Err(ActionError::InvalidSelection);
    }

    let taken = match selection.len() {
        3 => {
            let taken = GemPool::from_list(selection);
            for gem in selection {
                if taken.count(*gem) > 1 {
                    return Err(ActionError::InvalidSelection);
                }
                if bank.count(*gem) == 0 {
                    return Err(ActionError::InsufficientBankSupply(*gem));
                }
            }
            taken
        }
        1 => {
            let gem = selection[0];
            if bank.count(gem) < MIN_PILE_SIZE_TO_TAKE_TWO {
                return Err(ActionError::InsufficientBankSupply(gem));
            }
            GemPool::from_list(&[gem, gem])
        }
        _ => return Err(ActionError::InvalidSelection),
    };

    let mut bank = (bank.clone() - taken.clone())
        .map_err(ActionError::InsufficientBankSupply)?;
    let mut hand = hand.clone() + taken;

    // Hand cap: drain excess back to the bank in enumeration order so
    // the result is deterministic. Total gem count stays invariant.
    let mut returned = GemPool::empty();
    let mut excess = hand.total().saturating_sub(HAND_LIMIT);
    for gem in GemType::ALL {
        if excess == 0 {
            break;
        }
        let give = u16::from(hand.count(gem)).min(excess) as u8;
        if give == 0 {
            continue;
        }
        hand.debit(gem, give).map_err(ActionError::InsufficientBankSupply)?;
        bank.credit(gem, give);
        returned.credit(gem, give);
        excess -= u16::from(give);
    }

    Ok(TakeOutcome { bank, hand, returned })
}
