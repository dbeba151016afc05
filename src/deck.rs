use crate::cards::{Card, Rank, Suit};
use crate::error::{Error, FatalError};
use crate::player::{HAND_SIZE_START, OPENING_MOVES};
use rand::seq::SliceRandom;
use rand::Rng;

/// Cards in one standard deck: 52 suited cards plus two jokers.
pub const STANDARD_DECK_SIZE: usize = 54;
pub const MIN_DECK_SIZE: usize = 30;
pub const MAX_SAMPLE_DECKS: usize = 3;
pub const MAX_DECK_SIZE: usize = STANDARD_DECK_SIZE * MAX_SAMPLE_DECKS;

/// An ordered pile of cards. The last card is the next one drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use caravan_rs::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 54);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(STANDARD_DECK_SIZE);
        for s in Suit::ALL {
            for r in Rank::SUITED {
                cards.push(Card::new(r, s));
            }
        }
        cards.push(Card::joker());
        cards.push(Card::joker());
        Self { cards }
    }

    /// A deck in the given order; the last card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw `n` cards from the top of the deck.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.draw()).collect()
    }

    /// Whether the opening hand dealt from this deck can cover the opening rounds.
    fn opening_hand_playable(&self) -> bool {
        let start = self.cards.len().saturating_sub(HAND_SIZE_START);
        let numerals = self.cards[start..].iter().filter(|c| c.is_numeral()).count();
        numerals >= OPENING_MOVES as usize
    }
}

/// Builds a play deck of `total_cards` sampled from `sample_decks` shuffled standard decks.
///
/// Balanced sampling takes cards round-robin from each sample deck; otherwise every
/// card comes from a randomly chosen deck that still has cards. The whole build is
/// repeated until the opening hand holds enough numerals for the opening rounds.
///
/// ```
/// use caravan_rs::deck::build_caravan_deck;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let deck = build_caravan_deck(&mut rng, 40, 2, true).unwrap();
/// assert_eq!(deck.len(), 40);
/// ```
pub fn build_caravan_deck<R: Rng + ?Sized>(
    rng: &mut R,
    total_cards: usize,
    sample_decks: usize,
    balanced: bool,
) -> Result<Deck, Error> {
    validate_deck_params(total_cards, sample_decks)?;
    let mut attempt = 1u32;
    loop {
        let deck = sample_once(rng, total_cards, sample_decks, balanced);
        if deck.opening_hand_playable() {
            return Ok(deck);
        }
        tracing::debug!(attempt, total_cards, sample_decks, "opening hand short of numerals, rebuilding");
        attempt += 1;
    }
}

pub fn validate_deck_params(total_cards: usize, sample_decks: usize) -> Result<(), Error> {
    if !(1..=MAX_SAMPLE_DECKS).contains(&sample_decks) {
        return Err(FatalError::SampleDecks(sample_decks).into());
    }
    if !(MIN_DECK_SIZE..=MAX_DECK_SIZE).contains(&total_cards) {
        return Err(FatalError::DeckSize { got: total_cards, min: MIN_DECK_SIZE, max: MAX_DECK_SIZE }
            .into());
    }
    let available = sample_decks * STANDARD_DECK_SIZE;
    if total_cards > available {
        return Err(FatalError::NotEnoughCards { requested: total_cards, available }.into());
    }
    Ok(())
}

fn sample_once<R: Rng + ?Sized>(
    rng: &mut R,
    total_cards: usize,
    sample_decks: usize,
    balanced: bool,
) -> Deck {
    let mut samples: Vec<Deck> = (0..sample_decks)
        .map(|_| {
            let mut d = Deck::standard();
            d.shuffle_with(rng);
            d
        })
        .collect();
    let mut cards = Vec::with_capacity(total_cards);
    let mut next = 0;
    while cards.len() < total_cards {
        let idx = if balanced {
            let i = next % sample_decks;
            next += 1;
            i
        } else {
            let live: Vec<usize> = (0..sample_decks).filter(|&i| !samples[i].is_empty()).collect();
            live[rng.random_range(0..live.len())]
        };
        if let Some(c) = samples[idx].draw() {
            cards.push(c);
        }
    }
    Deck::from_cards(cards)
}
