use crate::cards::Card;
use crate::deck::Deck;
use crate::error::{Error, FatalError, RuleError};
use std::fmt;

/// Hand size dealt at the start of a game.
pub const HAND_SIZE_START: usize = 8;
/// Hand size kept topped up once the opening rounds are over.
pub const HAND_SIZE_MAIN: usize = 5;
/// Number of opening moves each player makes, one numeral per own caravan.
pub const OPENING_MOVES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerName {
    Bottom,
    Top,
}

impl PlayerName {
    pub const BOTH: [PlayerName; 2] = [PlayerName::Bottom, PlayerName::Top];

    pub const fn other(self) -> Self {
        match self {
            PlayerName::Bottom => PlayerName::Top,
            PlayerName::Top => PlayerName::Bottom,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            PlayerName::Bottom => 0,
            PlayerName::Top => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerName::Bottom => "Bottom",
            PlayerName::Top => "Top",
        }
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A player's draw deck, hand, and move count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: PlayerName,
    deck: Deck,
    hand: Vec<Card>,
    moves: u32,
}

impl Player {
    /// Takes ownership of `deck` and deals the opening hand from its top.
    pub fn new(name: PlayerName, mut deck: Deck) -> Self {
        let hand = deck.draw_n(HAND_SIZE_START);
        Self { name, deck, hand, moves: 0 }
    }

    pub fn name(&self) -> PlayerName {
        self.name
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn in_opening(&self) -> bool {
        self.moves < OPENING_MOVES
    }

    /// Card at a 1-based hand position.
    pub fn hand_at(&self, pos: usize) -> Result<Card, Error> {
        let idx = self.hand_index(pos)?;
        Ok(self.hand[idx])
    }

    /// Removes and returns the card at a 1-based hand position; later cards shift down.
    pub fn discard_at(&mut self, pos: usize) -> Result<Card, Error> {
        let idx = self.hand_index(pos)?;
        Ok(self.hand.remove(idx))
    }

    /// Draws one card once the opening is over and the hand is below its cap.
    pub fn maybe_draw(&mut self) -> Option<Card> {
        if self.in_opening() || self.hand.len() >= HAND_SIZE_MAIN {
            return None;
        }
        let card = self.deck.draw()?;
        self.hand.push(card);
        Some(card)
    }

    pub fn increment_moves(&mut self) {
        self.moves += 1;
    }

    fn hand_index(&self, pos: usize) -> Result<usize, Error> {
        if self.hand.is_empty() {
            return Err(FatalError::EmptyHand.into());
        }
        if pos == 0 || pos > self.hand.len() {
            return Err(RuleError::HandPosition { pos, size: self.hand.len() }.into());
        }
        Ok(pos - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn player_with(cards: &str) -> Player {
        Player::new(PlayerName::Bottom, Deck::from_cards(parse_cards(cards).unwrap()))
    }

    #[test]
    fn deals_eight_from_the_top() {
        let p = player_with("Ac 2c 3c 4c 5c 6c 7c 8c 9c Tc");
        assert_eq!(p.hand_size(), 8);
        assert_eq!(p.deck_size(), 2);
        assert_eq!(p.hand_at(1).unwrap().to_string(), "Tc");
    }

    #[test]
    fn short_deck_deals_what_it_has() {
        let p = player_with("Ac 2c 3c");
        assert_eq!(p.hand_size(), 3);
        assert_eq!(p.deck_size(), 0);
    }

    #[test]
    fn hand_positions_are_one_based() {
        let mut p = player_with("Ac 2c 3c");
        assert!(matches!(p.hand_at(0), Err(Error::Rule(RuleError::HandPosition { pos: 0, size: 3 }))));
        assert!(matches!(p.hand_at(4), Err(Error::Rule(RuleError::HandPosition { pos: 4, size: 3 }))));
        let gone = p.discard_at(2).unwrap();
        assert_eq!(gone.to_string(), "2c");
        assert_eq!(p.hand_at(2).unwrap().to_string(), "Ac");
    }

    #[test]
    fn empty_hand_access_is_fatal() {
        let mut p = player_with("Ac");
        p.discard_at(1).unwrap();
        assert_eq!(p.hand_at(1), Err(Error::Fatal(FatalError::EmptyHand)));
        assert_eq!(p.discard_at(1), Err(Error::Fatal(FatalError::EmptyHand)));
    }

    #[test]
    fn no_draw_during_opening() {
        let mut p = player_with("Ac 2c 3c 4c 5c 6c 7c 8c 9c Tc");
        for _ in 0..4 {
            p.discard_at(1).unwrap();
        }
        p.increment_moves();
        assert_eq!(p.maybe_draw(), None);
    }

    #[test]
    fn refills_to_five_after_opening() {
        let mut p = player_with("Ac 2c 3c 4c 5c 6c 7c 8c 9c Tc");
        for _ in 0..OPENING_MOVES {
            p.increment_moves();
        }
        for _ in 0..4 {
            p.discard_at(1).unwrap();
        }
        assert_eq!(p.hand_size(), 4);
        assert!(p.maybe_draw().is_some());
        assert_eq!(p.hand_size(), 5);
        assert_eq!(p.maybe_draw(), None);
        assert_eq!(p.deck_size(), 1);
    }
}
