//! Fixed rule constants for Omi: four players in two teams, a 32-card deck
//! (Seven through Ace in four suits), eight tricks per deal.

pub const PLAYERS: usize = 4;
pub const DECK_SIZE: usize = 32;

/// Cards per seat after the full deal.
pub const HAND_SIZE: usize = 8;

/// Cards dealt to the trump selector before trump is chosen. The selector
/// picks trump seeing only these four cards; the remaining four arrive after.
pub const SELECTION_HAND_SIZE: usize = 4;

pub const TRICKS_PER_DEAL: u8 = 8;

/// Default match target; the effective value is configurable.
pub const DEFAULT_TARGET_SCORE: u8 = 10;
