use crate::caravan::{Caravan, Direction, Slot};
use crate::cards::{Card, Rank, Suit};
use crate::error::{Error, RuleError};
use crate::player::PlayerName;
use std::fmt;
use std::str::FromStr;

/// The six caravans, A..F. A, B, C belong to the bottom player and D, E, F to the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CaravanName {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl CaravanName {
    pub const ALL: [CaravanName; 6] =
        [CaravanName::A, CaravanName::B, CaravanName::C, CaravanName::D, CaravanName::E, CaravanName::F];

    /// Bottom/top pairings compared when judging a winner.
    pub const PAIRS: [(CaravanName, CaravanName); 3] =
        [(CaravanName::A, CaravanName::D), (CaravanName::B, CaravanName::E), (CaravanName::C, CaravanName::F)];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn owner(self) -> PlayerName {
        match self {
            CaravanName::A | CaravanName::B | CaravanName::C => PlayerName::Bottom,
            CaravanName::D | CaravanName::E | CaravanName::F => PlayerName::Top,
        }
    }

    /// The caravan this one is compared against.
    pub const fn opposite(self) -> CaravanName {
        match self {
            CaravanName::A => CaravanName::D,
            CaravanName::B => CaravanName::E,
            CaravanName::C => CaravanName::F,
            CaravanName::D => CaravanName::A,
            CaravanName::E => CaravanName::B,
            CaravanName::F => CaravanName::C,
        }
    }

    pub fn owned_by(player: PlayerName) -> [CaravanName; 3] {
        match player {
            PlayerName::Bottom => [CaravanName::A, CaravanName::B, CaravanName::C],
            PlayerName::Top => [CaravanName::D, CaravanName::E, CaravanName::F],
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            CaravanName::A => 'A',
            CaravanName::B => 'B',
            CaravanName::C => 'C',
            CaravanName::D => 'D',
            CaravanName::E => 'E',
            CaravanName::F => 'F',
        }
    }
}

impl fmt::Display for CaravanName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CaravanNameParseError {
    #[error("invalid caravan: '{0}'")]
    Invalid(String),
}

impl TryFrom<char> for CaravanName {
    type Error = CaravanNameParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(CaravanName::A),
            'B' => Ok(CaravanName::B),
            'C' => Ok(CaravanName::C),
            'D' => Ok(CaravanName::D),
            'E' => Ok(CaravanName::E),
            'F' => Ok(CaravanName::F),
            _ => Err(CaravanNameParseError::Invalid(c.to_string())),
        }
    }
}

impl FromStr for CaravanName {
    type Err = CaravanNameParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => CaravanName::try_from(c),
            _ => Err(CaravanNameParseError::Invalid(s.to_string())),
        }
    }
}

/// What a joker purges from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Purge {
    Suit(Suit),
    Rank(Rank),
}

impl Purge {
    fn for_target(card: Card) -> Self {
        match (card.rank(), card.suit()) {
            (Rank::Ace, Some(suit)) => Purge::Suit(suit),
            (rank, _) => Purge::Rank(rank),
        }
    }

    fn apply(self, caravan: &mut Caravan, exclude: usize) -> Result<usize, Error> {
        match self {
            Purge::Suit(s) => caravan.remove_suit(s, exclude),
            Purge::Rank(r) => caravan.remove_rank(r, exclude),
        }
    }
}

/// The six caravans in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    caravans: [Caravan; 6],
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self { caravans: CaravanName::ALL.map(Caravan::new) }
    }

    pub fn caravan(&self, name: CaravanName) -> &Caravan {
        &self.caravans[name.index()]
    }

    fn caravan_mut(&mut self, name: CaravanName) -> &mut Caravan {
        &mut self.caravans[name.index()]
    }

    pub fn clear_caravan(&mut self, name: CaravanName) -> Result<(), Error> {
        self.caravan_mut(name).clear()
    }

    pub fn bid(&self, name: CaravanName) -> u16 {
        self.caravan(name).bid()
    }

    pub fn slot_at(&self, name: CaravanName, pos: usize) -> Result<&Slot, Error> {
        self.caravan(name).slot_at(pos)
    }

    pub fn direction(&self, name: CaravanName) -> Direction {
        self.caravan(name).direction()
    }

    pub fn size(&self, name: CaravanName) -> usize {
        self.caravan(name).size()
    }

    pub fn suit(&self, name: CaravanName) -> Option<Suit> {
        self.caravan(name).suit()
    }

    pub fn play_numeral(&mut self, name: CaravanName, card: Card) -> Result<(), Error> {
        self.caravan_mut(name).put_numeral(card)
    }

    /// Plays a face card at a 1-based position and returns the numeral it landed on
    /// (or removed, for a jack).
    ///
    /// A joker then purges matching cards from every caravan: by suit when it lands
    /// on an ace, by rank otherwise. The card it landed on survives.
    pub fn play_face(&mut self, name: CaravanName, card: Card, pos: usize) -> Result<Card, Error> {
        if card.rank() == Rank::Queen {
            let size = self.size(name);
            if pos != size {
                return Err(RuleError::QueenPosition { pos, size }.into());
            }
        }
        let target = self.caravan_mut(name).put_face(card, pos)?;
        if card.rank() == Rank::Joker {
            let purge = Purge::for_target(target);
            let removed = purge.apply(self.caravan_mut(name), pos)?;
            tracing::trace!(caravan = %name, ?purge, removed, "joker purge on target");
            for other in CaravanName::ALL.into_iter().filter(|&c| c != name) {
                let removed = purge.apply(self.caravan_mut(other), 0)?;
                if removed > 0 {
                    tracing::trace!(caravan = %other, ?purge, removed, "joker purge");
                }
            }
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn lay(table: &mut Table, name: CaravanName, cards: &str) {
        for c in parse_cards(cards).unwrap() {
            table.play_numeral(name, c).unwrap();
        }
    }

    #[test]
    fn names_round_trip_and_partition() {
        for name in CaravanName::ALL {
            assert_eq!(CaravanName::try_from(name.to_char()).unwrap(), name);
            assert_ne!(name.owner(), name.opposite().owner());
            assert_eq!(name.opposite().opposite(), name);
        }
        assert_eq!("e".parse::<CaravanName>().unwrap(), CaravanName::E);
        assert!("G".parse::<CaravanName>().is_err());
        assert_eq!(CaravanName::owned_by(PlayerName::Top), [CaravanName::D, CaravanName::E, CaravanName::F]);
    }

    #[test]
    fn queen_must_go_on_newest_card() {
        let mut t = Table::new();
        lay(&mut t, CaravanName::B, "3h 7h");
        let before = t.clone();
        assert_eq!(
            t.play_face(CaravanName::B, card("Qs"), 1),
            Err(Error::Rule(RuleError::QueenPosition { pos: 1, size: 2 }))
        );
        assert_eq!(t, before);
        t.play_face(CaravanName::B, card("Qs"), 2).unwrap();
        assert_eq!(t.suit(CaravanName::B), Some(Suit::Spades));
        assert_eq!(t.direction(CaravanName::B), Direction::Descending);
    }

    #[test]
    fn joker_on_ace_purges_suit_everywhere_but_itself() {
        let mut t = Table::new();
        lay(&mut t, CaravanName::A, "As 4s 9d");
        lay(&mut t, CaravanName::C, "2s 6h");
        lay(&mut t, CaravanName::E, "Ts 3c");
        t.play_face(CaravanName::A, Card::joker(), 1).unwrap();

        let a: Vec<Card> = t.caravan(CaravanName::A).slots().iter().map(Slot::numeral).collect();
        assert_eq!(a, vec![card("As"), card("9d")]);
        assert_eq!(t.caravan(CaravanName::C).slots()[0].numeral(), card("6h"));
        assert_eq!(t.size(CaravanName::C), 1);
        assert_eq!(t.caravan(CaravanName::E).slots()[0].numeral(), card("3c"));
        assert_eq!(t.size(CaravanName::E), 1);
    }

    #[test]
    fn joker_on_numeral_purges_rank_everywhere_but_itself() {
        let mut t = Table::new();
        lay(&mut t, CaravanName::A, "5h 8h");
        lay(&mut t, CaravanName::D, "5c 2c");
        lay(&mut t, CaravanName::F, "8d 5s");
        t.play_face(CaravanName::A, Card::joker(), 1).unwrap();

        assert_eq!(t.size(CaravanName::A), 2);
        assert_eq!(t.bid(CaravanName::D), 2);
        assert_eq!(t.bid(CaravanName::F), 8);
        assert_eq!(t.caravan(CaravanName::A).slot_at(1).unwrap().faces(), &[Card::joker()]);
    }

    #[test]
    fn joker_can_purge_its_own_caravans_other_copies() {
        let mut t = Table::new();
        lay(&mut t, CaravanName::B, "7c 2d 7d");
        t.play_face(CaravanName::B, Card::joker(), 3).unwrap();
        let b: Vec<Card> = t.caravan(CaravanName::B).slots().iter().map(Slot::numeral).collect();
        assert_eq!(b, vec![card("2d"), card("7d")]);
    }

    #[test]
    fn jack_removes_a_card_from_any_caravan() {
        let mut t = Table::new();
        lay(&mut t, CaravanName::D, "4h 6h");
        let removed = t.play_face(CaravanName::D, card("Jc"), 2).unwrap();
        assert_eq!(removed, card("6h"));
        assert_eq!(t.bid(CaravanName::D), 4);
    }
}
