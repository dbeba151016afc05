use crate::deck::{validate_deck_params, STANDARD_DECK_SIZE};
use crate::error::Error;
use crate::player::PlayerName;

/// How one player's play deck is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckConfig {
    pub size: usize,
    pub sample_decks: usize,
    pub balanced: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self { size: STANDARD_DECK_SIZE, sample_decks: 1, balanced: true }
    }
}

impl DeckConfig {
    pub fn validate(&self) -> Result<(), Error> {
        validate_deck_params(self.size, self.sample_decks)
    }
}

/// Everything needed to start a game.
///
/// ```
/// use caravan_rs::config::GameConfig;
/// use caravan_rs::player::PlayerName;
///
/// let cfg = GameConfig::default().with_seed(11).with_first(PlayerName::Top);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub bottom: DeckConfig,
    pub top: DeckConfig,
    pub first: PlayerName,
    /// Seed for deck shuffling; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bottom: DeckConfig::default(),
            top: DeckConfig::default(),
            first: PlayerName::Bottom,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_first(mut self, first: PlayerName) -> Self {
        self.first = first;
        self
    }

    /// Applies the same deck settings to both players.
    pub fn with_decks(mut self, deck: DeckConfig) -> Self {
        self.bottom = deck;
        self.top = deck;
        self
    }

    pub fn deck(&self, player: PlayerName) -> DeckConfig {
        match player {
            PlayerName::Bottom => self.bottom,
            PlayerName::Top => self.top,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.bottom.validate()?;
        self.top.validate()
    }
}
