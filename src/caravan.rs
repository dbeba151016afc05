use crate::cards::{Card, Rank, Suit};
use crate::error::{Error, FatalError, RuleError};
use crate::table::CaravanName;

/// Most numeral cards a single caravan can hold.
pub const MAX_SLOTS: usize = 8;
/// Most face cards that can be attached to one numeral.
pub const MAX_FACES: usize = 3;
/// Lowest bid at which a caravan counts as sold.
pub const SOLD_MIN: u16 = 21;
/// Highest sold bid; anything above is bust.
pub const SOLD_MAX: u16 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Direction {
    Any,
    Ascending,
    Descending,
}

impl Direction {
    pub const fn flipped(self) -> Self {
        match self {
            Direction::Any => Direction::Any,
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Any => "ANY",
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }

    fn allows(self, last: Rank, next: Rank) -> bool {
        match self {
            Direction::Any => true,
            Direction::Ascending => next > last,
            Direction::Descending => next < last,
        }
    }
}

/// A numeral card on a caravan plus the face cards attached to it, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    numeral: Card,
    faces: Vec<Card>,
}

impl Slot {
    fn new(numeral: Card) -> Self {
        Self { numeral, faces: Vec::with_capacity(MAX_FACES) }
    }

    pub fn numeral(&self) -> Card {
        self.numeral
    }

    pub fn faces(&self) -> &[Card] {
        &self.faces
    }

    pub fn count_faces(&self, rank: Rank) -> usize {
        self.faces.iter().filter(|c| c.rank() == rank).count()
    }

    /// Numeral value doubled once per attached king.
    pub fn value(&self) -> u16 {
        self.numeral.rank().value() << self.count_faces(Rank::King)
    }

    fn latest_queen(&self) -> Option<Card> {
        self.faces.iter().rev().copied().find(|c| c.rank() == Rank::Queen)
    }
}

/// One of the six tracks on the table.
///
/// ```
/// use caravan_rs::caravan::{Caravan, Direction};
/// use caravan_rs::cards::{Card, Rank, Suit};
/// use caravan_rs::table::CaravanName;
///
/// let mut c = Caravan::new(CaravanName::A);
/// c.put_numeral(Card::new(Rank::Four, Suit::Hearts)).unwrap();
/// c.put_numeral(Card::new(Rank::Nine, Suit::Clubs)).unwrap();
/// assert_eq!(c.bid(), 13);
/// assert_eq!(c.direction(), Direction::Ascending);
/// assert_eq!(c.suit(), Some(Suit::Clubs));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caravan {
    name: CaravanName,
    slots: Vec<Slot>,
}

impl Caravan {
    pub fn new(name: CaravanName) -> Self {
        Self { name, slots: Vec::with_capacity(MAX_SLOTS) }
    }

    pub fn name(&self) -> CaravanName {
        self.name
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn clear(&mut self) -> Result<(), Error> {
        if self.slots.is_empty() {
            return Err(RuleError::CaravanEmpty.into());
        }
        self.slots.clear();
        Ok(())
    }

    pub fn bid(&self) -> u16 {
        self.slots.iter().map(Slot::value).sum()
    }

    pub fn is_sold(&self) -> bool {
        (SOLD_MIN..=SOLD_MAX).contains(&self.bid())
    }

    pub fn is_bust(&self) -> bool {
        self.bid() > SOLD_MAX
    }

    /// Slot at a 1-based position.
    pub fn slot_at(&self, pos: usize) -> Result<&Slot, Error> {
        self.check_position(pos)?;
        Ok(&self.slots[pos - 1])
    }

    /// Direction set by the last two numerals, flipped once per queen on the last slot.
    pub fn direction(&self) -> Direction {
        let n = self.slots.len();
        if n < 2 {
            return Direction::Any;
        }
        let last = &self.slots[n - 1];
        let prev = self.slots[n - 2].numeral.rank();
        let base = match last.numeral.rank().cmp(&prev) {
            std::cmp::Ordering::Greater => Direction::Ascending,
            std::cmp::Ordering::Less => Direction::Descending,
            std::cmp::Ordering::Equal => Direction::Any,
        };
        if last.count_faces(Rank::Queen) % 2 == 1 {
            base.flipped()
        } else {
            base
        }
    }

    /// Suit of the last numeral, overridden by the most recent queen attached to it.
    pub fn suit(&self) -> Option<Suit> {
        let last = self.slots.last()?;
        last.latest_queen().and_then(Card::suit).or(last.numeral.suit())
    }

    pub fn put_numeral(&mut self, card: Card) -> Result<(), Error> {
        if !card.is_numeral() {
            return Err(RuleError::NotNumeral(card).into());
        }
        if self.slots.len() >= MAX_SLOTS {
            return Err(RuleError::CaravanFull.into());
        }
        if let Some(last) = self.slots.last() {
            let last_rank = last.numeral.rank();
            if last_rank == card.rank() {
                return Err(RuleError::SameRank(card).into());
            }
            if self.slots.len() >= 2 {
                let suit_ok = self.suit() == card.suit();
                let direction_ok = self.direction().allows(last_rank, card.rank());
                if !suit_ok && !direction_ok {
                    return Err(RuleError::WrongSuitOrDirection(card).into());
                }
            }
        }
        self.slots.push(Slot::new(card));
        Ok(())
    }

    /// Plays a face card on the numeral at `pos` and returns that numeral.
    ///
    /// A jack removes the slot instead of attaching to it.
    pub fn put_face(&mut self, card: Card, pos: usize) -> Result<Card, Error> {
        if self.slots.is_empty() {
            return Err(RuleError::CaravanEmpty.into());
        }
        self.check_position(pos)?;
        if !card.is_face() {
            return Err(RuleError::NotFace(card).into());
        }
        let idx = pos - 1;
        if card.rank() == Rank::Jack {
            return Ok(self.slots.remove(idx).numeral);
        }
        let slot = &mut self.slots[idx];
        if slot.faces.len() >= MAX_FACES {
            return Err(RuleError::FaceCapacity.into());
        }
        slot.faces.push(card);
        Ok(slot.numeral)
    }

    /// Removes every slot whose numeral has `rank`, sparing the 1-based `exclude` (0 spares none).
    pub fn remove_rank(&mut self, rank: Rank, exclude: usize) -> Result<usize, Error> {
        self.remove_where(exclude, |c| c.rank() == rank)
    }

    /// Removes every slot whose numeral has `suit`, sparing the 1-based `exclude` (0 spares none).
    pub fn remove_suit(&mut self, suit: Suit, exclude: usize) -> Result<usize, Error> {
        self.remove_where(exclude, |c| c.suit() == Some(suit))
    }

    fn remove_where<F>(&mut self, exclude: usize, matches: F) -> Result<usize, Error>
    where
        F: Fn(Card) -> bool,
    {
        if self.slots.is_empty() {
            return Ok(0);
        }
        if exclude > self.slots.len() {
            return Err(FatalError::ExcludePosition { pos: exclude, size: self.slots.len() }.into());
        }
        let mut removed = 0;
        for i in (0..self.slots.len()).rev() {
            if i + 1 == exclude {
                continue;
            }
            if matches(self.slots[i].numeral) {
                self.slots.remove(i);
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn check_position(&self, pos: usize) -> Result<(), Error> {
        if pos == 0 || pos > self.slots.len() {
            return Err(RuleError::CaravanPosition { pos, size: self.slots.len() }.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn caravan_with(cards: &str) -> Caravan {
        let mut c = Caravan::new(CaravanName::A);
        for card in parse_cards(cards).unwrap() {
            c.put_numeral(card).unwrap();
        }
        c
    }

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn empty_caravan_queries() {
        let c = Caravan::new(CaravanName::B);
        assert_eq!(c.bid(), 0);
        assert_eq!(c.direction(), Direction::Any);
        assert_eq!(c.suit(), None);
        assert!(matches!(c.slot_at(1), Err(Error::Rule(RuleError::CaravanPosition { .. }))));
    }

    #[test]
    fn clear_on_empty_is_a_rule_error() {
        let mut c = Caravan::new(CaravanName::A);
        assert_eq!(c.clear(), Err(Error::Rule(RuleError::CaravanEmpty)));
        let mut c = caravan_with("5h");
        c.clear().unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn first_two_cards_are_free() {
        let mut c = caravan_with("9s");
        c.put_numeral(card("2h")).unwrap();
        assert_eq!(c.direction(), Direction::Descending);
    }

    #[test]
    fn equal_rank_is_rejected_even_with_matching_suit() {
        let mut c = caravan_with("5h");
        assert_eq!(c.put_numeral(card("5h")), Err(Error::Rule(RuleError::SameRank(card("5h")))));
    }

    #[test]
    fn third_card_needs_suit_or_direction() {
        let mut c = caravan_with("2h 5c");
        // descending and off-suit
        assert!(matches!(
            c.put_numeral(card("3d")),
            Err(Error::Rule(RuleError::WrongSuitOrDirection(_)))
        ));
        // descending but on suit
        c.put_numeral(card("3c")).unwrap();
        // direction is now descending; ascending off-suit fails, descending off-suit passes
        assert!(c.put_numeral(card("9h")).is_err());
        c.put_numeral(card("Ah")).unwrap();
        assert_eq!(c.size(), 4);
    }

    #[test]
    fn full_caravan_rejects_numerals() {
        let mut c = caravan_with("Ac 2c 3c 4c 5c 6c 7c 8c");
        assert_eq!(c.put_numeral(card("9c")), Err(Error::Rule(RuleError::CaravanFull)));
    }

    #[test]
    fn face_cards_are_not_numerals() {
        let mut c = Caravan::new(CaravanName::A);
        assert!(matches!(c.put_numeral(card("Kh")), Err(Error::Rule(RuleError::NotNumeral(_)))));
        assert!(matches!(c.put_numeral(Card::joker()), Err(Error::Rule(RuleError::NotNumeral(_)))));
    }

    #[test]
    fn kings_multiply_their_own_slot() {
        let mut c = caravan_with("3h 5h");
        assert_eq!(c.bid(), 8);
        c.put_face(card("Kc"), 1).unwrap();
        assert_eq!(c.bid(), 11);
        c.put_face(card("Kd"), 1).unwrap();
        assert_eq!(c.bid(), 17);
        c.put_face(card("Ks"), 1).unwrap();
        assert_eq!(c.bid(), 29);
    }

    #[test]
    fn face_capacity_is_three() {
        let mut c = caravan_with("7h");
        for k in ["Kc", "Kd", "Kh"] {
            c.put_face(card(k), 1).unwrap();
        }
        assert_eq!(c.put_face(card("Ks"), 1), Err(Error::Rule(RuleError::FaceCapacity)));
        assert_eq!(c.put_face(Card::joker(), 1), Err(Error::Rule(RuleError::FaceCapacity)));
    }

    #[test]
    fn jack_removes_the_slot_and_compacts() {
        let mut c = caravan_with("2h 5h 9h");
        c.put_face(card("Kc"), 2).unwrap();
        let removed = c.put_face(card("Jd"), 2).unwrap();
        assert_eq!(removed, card("5h"));
        assert_eq!(c.size(), 2);
        assert_eq!(c.slot_at(2).unwrap().numeral(), card("9h"));
        assert_eq!(c.bid(), 11);
    }

    #[test]
    fn put_face_validates_position_and_card() {
        let mut c = Caravan::new(CaravanName::A);
        assert_eq!(c.put_face(card("Kh"), 1), Err(Error::Rule(RuleError::CaravanEmpty)));
        let mut c = caravan_with("4s");
        assert!(matches!(
            c.put_face(card("Kh"), 2),
            Err(Error::Rule(RuleError::CaravanPosition { pos: 2, size: 1 }))
        ));
        assert!(matches!(c.put_face(card("4h"), 1), Err(Error::Rule(RuleError::NotFace(_)))));
    }

    #[test]
    fn queen_scenario_flips_suit_and_direction() {
        let mut c = caravan_with("As 2h 3c");
        assert_eq!(c.bid(), 6);
        assert_eq!(c.suit(), Some(Suit::Clubs));
        assert_eq!(c.direction(), Direction::Ascending);

        c.put_face(card("Qd"), 3).unwrap();
        assert_eq!(c.suit(), Some(Suit::Diamonds));
        assert_eq!(c.direction(), Direction::Descending);

        c.put_face(card("Qs"), 3).unwrap();
        assert_eq!(c.suit(), Some(Suit::Spades));
        assert_eq!(c.direction(), Direction::Ascending);
    }

    #[test]
    fn queens_on_earlier_slots_do_not_count() {
        let mut c = caravan_with("2h 6h");
        c.put_face(card("Qs"), 1).unwrap();
        assert_eq!(c.direction(), Direction::Ascending);
        assert_eq!(c.suit(), Some(Suit::Hearts));
    }

    #[test]
    fn remove_rank_spares_excluded_position() {
        let mut c = caravan_with("5c 2h 5h");
        assert_eq!(c.remove_rank(Rank::Five, 3).unwrap(), 1);
        assert_eq!(c.size(), 2);
        assert_eq!(c.slot_at(2).unwrap().numeral(), card("5h"));
    }

    #[test]
    fn remove_suit_from_tail_to_head() {
        let mut c = caravan_with("2h 5c 9h");
        assert_eq!(c.remove_suit(Suit::Hearts, 0).unwrap(), 2);
        assert_eq!(c.size(), 1);
        assert_eq!(c.slot_at(1).unwrap().numeral(), card("5c"));
    }

    #[test]
    fn remove_with_bad_exclude_is_fatal() {
        let mut c = caravan_with("2h");
        assert_eq!(
            c.remove_rank(Rank::Two, 2),
            Err(Error::Fatal(FatalError::ExcludePosition { pos: 2, size: 1 }))
        );
        let mut empty = Caravan::new(CaravanName::C);
        assert_eq!(empty.remove_suit(Suit::Clubs, 5), Ok(0));
    }

    #[test]
    fn put_then_remove_rank_round_trips() {
        let mut c = Caravan::new(CaravanName::D);
        c.put_numeral(card("8d")).unwrap();
        c.remove_rank(Rank::Eight, 0).unwrap();
        assert!(c.is_empty());
    }
}
