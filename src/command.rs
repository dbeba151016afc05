//! Structured moves and the text grammar players type them in.
//!
//! `P<hand><caravan>[<pos>]` plays a hand card, `D<hand>` discards one and
//! `C<caravan>` clears one of your caravans. Letters are case-insensitive.

use crate::table::{CaravanName, CaravanNameParseError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Play the card at `hand_pos`; face cards also need `caravan_pos`.
    Play { hand_pos: usize, caravan: CaravanName, caravan_pos: Option<usize> },
    Discard { hand_pos: usize },
    Clear { caravan: CaravanName },
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::Play { .. } => "Play",
            Command::Discard { .. } => "Discard",
            Command::Clear { .. } => "Clear",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Play { hand_pos, caravan, caravan_pos: Some(pos) } => {
                write!(f, "P{hand_pos}{caravan}{pos}")
            }
            Command::Play { hand_pos, caravan, caravan_pos: None } => {
                write!(f, "P{hand_pos}{caravan}")
            }
            Command::Discard { hand_pos } => write!(f, "D{hand_pos}"),
            Command::Clear { caravan } => write!(f, "C{caravan}"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (expected P, D or C)")]
    UnknownKind(char),
    #[error("missing hand position")]
    MissingHandPosition,
    #[error("missing caravan letter")]
    MissingCaravan,
    #[error(transparent)]
    Caravan(#[from] CaravanNameParseError),
    #[error("unexpected trailing input: '{0}'")]
    Trailing(String),
    #[error("number too large: '{0}'")]
    BadNumber(String),
}

struct Cursor<'a> {
    rest: &'a str,
}

impl Cursor<'_> {
    /// Leading digits as a number; `None` when there are none.
    fn number(&mut self) -> Result<Option<usize>, CommandParseError> {
        let end = self.rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(self.rest.len());
        let (digits, rest) = self.rest.split_at(end);
        self.rest = rest;
        if digits.is_empty() {
            return Ok(None);
        }
        digits.parse().map(Some).map_err(|_| CommandParseError::BadNumber(digits.to_string()))
    }

    fn caravan(&mut self) -> Result<CaravanName, CommandParseError> {
        let mut chars = self.rest.chars();
        let c = chars.next().ok_or(CommandParseError::MissingCaravan)?;
        self.rest = chars.as_str();
        Ok(CaravanName::try_from(c)?)
    }

    fn finish(self) -> Result<(), CommandParseError> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(CommandParseError::Trailing(self.rest.to_string()))
        }
    }
}

impl FromStr for Command {
    type Err = CommandParseError;

    /// ```
    /// use caravan_rs::command::Command;
    /// use caravan_rs::table::CaravanName;
    ///
    /// let cmd: Command = "p2a3".parse().unwrap();
    /// assert_eq!(cmd, Command::Play { hand_pos: 2, caravan: CaravanName::A, caravan_pos: Some(3) });
    /// assert_eq!("CF".parse::<Command>().unwrap(), Command::Clear { caravan: CaravanName::F });
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let mut chars = upper.chars();
        let kind = chars.next().ok_or(CommandParseError::Empty)?;
        let mut cur = Cursor { rest: chars.as_str() };
        let cmd = match kind {
            'P' => {
                let hand_pos = cur.number()?.ok_or(CommandParseError::MissingHandPosition)?;
                let caravan = cur.caravan()?;
                let caravan_pos = cur.number()?;
                Command::Play { hand_pos, caravan, caravan_pos }
            }
            'D' => {
                let hand_pos = cur.number()?.ok_or(CommandParseError::MissingHandPosition)?;
                Command::Discard { hand_pos }
            }
            'C' => Command::Clear { caravan: cur.caravan()? },
            other => return Err(CommandParseError::UnknownKind(other)),
        };
        cur.finish()?;
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_kinds() {
        assert_eq!(
            "P1D".parse::<Command>().unwrap(),
            Command::Play { hand_pos: 1, caravan: CaravanName::D, caravan_pos: None }
        );
        assert_eq!(" d5 ".parse::<Command>().unwrap(), Command::Discard { hand_pos: 5 });
        assert_eq!("cb".parse::<Command>().unwrap(), Command::Clear { caravan: CaravanName::B });
    }

    #[test]
    fn display_matches_grammar() {
        for text in ["P3E2", "P8A", "D1", "CC"] {
            assert_eq!(text.parse::<Command>().unwrap().to_string(), text);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<Command>(), Err(CommandParseError::Empty));
        assert_eq!("X1".parse::<Command>(), Err(CommandParseError::UnknownKind('X')));
        assert_eq!("PA".parse::<Command>(), Err(CommandParseError::MissingHandPosition));
        assert_eq!("P2".parse::<Command>(), Err(CommandParseError::MissingCaravan));
        assert!(matches!("P2G".parse::<Command>(), Err(CommandParseError::Caravan(_))));
        assert_eq!("D2X".parse::<Command>(), Err(CommandParseError::Trailing("X".into())));
        assert_eq!("CAB".parse::<Command>(), Err(CommandParseError::Trailing("B".into())));
        let huge = "99999999999999999999";
        assert_eq!(
            format!("P1A{huge}").parse::<Command>(),
            Err(CommandParseError::BadNumber(huge.into()))
        );
        assert_eq!(
            format!("P{huge}A").parse::<Command>(),
            Err(CommandParseError::BadNumber(huge.into()))
        );
        assert_eq!(
            format!("D{huge}").parse::<Command>(),
            Err(CommandParseError::BadNumber(huge.into()))
        );
    }
}
