use crate::event::EventPhase;
use crate::score::Winner;
use crate::wager::{Wager, WagerState};

/// New settlement label for a wager given the event phase and whether its
/// market is on the winning side. `None` means the phase does not settle.
pub fn transition(phase: &EventPhase, market_matches: bool) -> Option<WagerState> {
    match (phase, market_matches) {
        (EventPhase::Active, true) => Some(WagerState::Winning),
        (EventPhase::Active, false) => Some(WagerState::Losing),
        (EventPhase::Finished, true) => Some(WagerState::Win),
        (EventPhase::Finished, false) => Some(WagerState::Lose),
        (EventPhase::Other(_), _) => None,
    }
}

/// Overwrite the wager's state for this phase and winner.
/// Returns false (and leaves the wager untouched) when the phase does not settle.
pub fn settle_wager(wager: &mut Wager, phase: &EventPhase, winner: Winner) -> bool {
    match transition(phase, wager.market.matches(winner)) {
        Some(state) => {
            wager.state = Some(state);
            true
        }
        None => false,
    }
}
