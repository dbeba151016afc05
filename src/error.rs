//! Error classes shared by the rules engine.
//!
//! Every fallible engine operation returns [`Error`], which is either a
//! recoverable [`RuleError`] (an illegal move; state is left untouched and the
//! caller may retry) or a [`FatalError`] (a caller defect such as touching a
//! closed game).

use crate::cards::Card;
use crate::table::CaravanName;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleError {
    #[error("caravan is empty")]
    CaravanEmpty,
    #[error("caravan is full")]
    CaravanFull,
    #[error("caravan position out of range: {pos} not in 1..={size}")]
    CaravanPosition { pos: usize, size: usize },
    #[error("hand position out of range: {pos} not in 1..={size}")]
    HandPosition { pos: usize, size: usize },
    #[error("{0} is not a numeral card")]
    NotNumeral(Card),
    #[error("{0} is not a face card")]
    NotFace(Card),
    #[error("{0} has the same rank as the last card on the caravan")]
    SameRank(Card),
    #[error("{0} follows neither the caravan's suit nor its direction")]
    WrongSuitOrDirection(Card),
    #[error("slot already holds the maximum number of face cards")]
    FaceCapacity,
    #[error("a queen may only be played on the newest card (position {size}), not {pos}")]
    QueenPosition { pos: usize, size: usize },
    #[error("face cards need a caravan position")]
    MissingPosition,
    #[error("cannot {0} during the opening rounds")]
    OpeningPhase(&'static str),
    #[error("caravan {0} must be empty during the opening rounds")]
    OpeningCaravanTaken(CaravanName),
    #[error("caravan {0} belongs to the opponent")]
    NotOwnCaravan(CaravanName),
    #[error("the game already has a winner")]
    GameOver,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FatalError {
    #[error("the game has been closed")]
    Closed,
    #[error("hand is empty")]
    EmptyHand,
    #[error("exclude position {pos} exceeds caravan size {size}")]
    ExcludePosition { pos: usize, size: usize },
    #[error("deck size {got} outside {min}..={max}")]
    DeckSize { got: usize, min: usize, max: usize },
    #[error("sample deck count {0} outside 1..=3")]
    SampleDecks(usize),
    #[error("requested {requested} cards but only {available} are available")]
    NotEnoughCards { requested: usize, available: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error(transparent)]
    Fatal(#[from] FatalError),
}

impl Error {
    /// Rule violations can be retried with a different move; fatal errors are defects.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Rule(_))
    }

    pub fn rule(&self) -> Option<&RuleError> {
        match self {
            Error::Rule(e) => Some(e),
            Error::Fatal(_) => None,
        }
    }
}
