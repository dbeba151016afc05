use crate::caravan::{SOLD_MAX, SOLD_MIN};
use crate::cards::Card;
use crate::command::Command;
use crate::config::GameConfig;
use crate::deck::{build_caravan_deck, Deck};
use crate::error::{Error, FatalError, RuleError};
use crate::player::{Player, PlayerName};
use crate::table::{CaravanName, Table};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    /// At least one player still has opening moves left.
    Opening,
    Main,
}

/// One applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    /// 1-based count of applied moves in the game.
    pub turn: u32,
    pub seat: PlayerName,
    pub command: Command,
    /// The card that left the hand; `None` for a clear.
    pub card: Option<Card>,
}

/// Table, players and history; dropped as a unit when the game is closed.
#[derive(Debug, Clone)]
struct Live {
    table: Table,
    players: [Player; 2],
    history: Vec<HistoryEntry>,
}

impl Live {
    /// Applies `command` for `seat` or leaves everything untouched.
    fn apply(&mut self, seat: PlayerName, command: Command) -> Result<Option<Card>, Error> {
        let Live { table, players, .. } = self;
        let player = &mut players[seat.index()];
        match command {
            Command::Discard { hand_pos } => {
                if player.in_opening() {
                    return Err(RuleError::OpeningPhase("discard").into());
                }
                Ok(Some(player.discard_at(hand_pos)?))
            }
            Command::Clear { caravan } => {
                if player.in_opening() {
                    return Err(RuleError::OpeningPhase("clear a caravan").into());
                }
                if caravan.owner() != seat {
                    return Err(RuleError::NotOwnCaravan(caravan).into());
                }
                table.clear_caravan(caravan)?;
                Ok(None)
            }
            Command::Play { hand_pos, caravan, caravan_pos } => {
                let card = player.hand_at(hand_pos)?;
                if card.is_numeral() {
                    if caravan.owner() != seat {
                        return Err(RuleError::NotOwnCaravan(caravan).into());
                    }
                    if player.in_opening() && !table.caravan(caravan).is_empty() {
                        return Err(RuleError::OpeningCaravanTaken(caravan).into());
                    }
                    table.play_numeral(caravan, card)?;
                } else {
                    if player.in_opening() {
                        return Err(RuleError::OpeningPhase("play face cards").into());
                    }
                    let pos = caravan_pos.ok_or(RuleError::MissingPosition)?;
                    table.play_face(caravan, card, pos)?;
                }
                player.discard_at(hand_pos)?;
                Ok(Some(card))
            }
        }
    }
}

/// Which side, if any, takes a bottom/top caravan pair.
///
/// Only a sold bid (21..=26) can win; two sold bids go to the higher one and
/// equal sold bids leave the pair undecided.
///
/// ```
/// use caravan_rs::game::pair_winner;
/// use caravan_rs::player::PlayerName;
///
/// assert_eq!(pair_winner(26, 20), Some(PlayerName::Bottom));
/// assert_eq!(pair_winner(27, 21), Some(PlayerName::Top));
/// assert_eq!(pair_winner(24, 24), None);
/// ```
pub fn pair_winner(bottom_bid: u16, top_bid: u16) -> Option<PlayerName> {
    let sold = |bid: u16| (SOLD_MIN..=SOLD_MAX).contains(&bid);
    match (sold(bottom_bid), sold(top_bid)) {
        (true, false) => Some(PlayerName::Bottom),
        (false, true) => Some(PlayerName::Top),
        (true, true) if bottom_bid > top_bid => Some(PlayerName::Bottom),
        (true, true) if top_bid > bottom_bid => Some(PlayerName::Top),
        _ => None,
    }
}

/// A two-player game of Caravan.
#[derive(Debug, Clone)]
pub struct Game {
    live: Option<Live>,
    current: PlayerName,
}

impl Game {
    /// Builds both decks from `config`, seeding from `config.seed` or the OS.
    pub fn new(config: &GameConfig) -> Result<Self, Error> {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        tracing::info!(seed, "starting caravan game");
        Self::with_rng(config, &mut rng)
    }

    /// Like [`Game::new`] but draws every shuffle from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, Error> {
        config.validate()?;
        let [bottom, top] = PlayerName::BOTH.map(|p| config.deck(p));
        let bottom = build_caravan_deck(rng, bottom.size, bottom.sample_decks, bottom.balanced)?;
        let top = build_caravan_deck(rng, top.size, top.sample_decks, top.balanced)?;
        Ok(Self::from_decks(bottom, top, config.first))
    }

    /// Starts a game from explicit decks, dealing each hand from the top.
    pub fn from_decks(bottom: Deck, top: Deck, first: PlayerName) -> Self {
        let players = [Player::new(PlayerName::Bottom, bottom), Player::new(PlayerName::Top, top)];
        tracing::info!(
            first = %first,
            bottom_deck = players[0].deck_size(),
            top_deck = players[1].deck_size(),
            "game ready"
        );
        Self { live: Some(Live { table: Table::new(), players, history: Vec::new() }), current: first }
    }

    fn live(&self) -> Result<&Live, Error> {
        self.live.as_ref().ok_or_else(|| FatalError::Closed.into())
    }

    pub fn is_closed(&self) -> bool {
        self.live.is_none()
    }

    /// Releases the table, both players and the history. Closing twice does nothing.
    pub fn close(&mut self) {
        if self.live.take().is_some() {
            tracing::info!("game closed");
        }
    }

    pub fn to_move(&self) -> Result<PlayerName, Error> {
        self.live()?;
        Ok(self.current)
    }

    pub fn phase(&self) -> Result<Phase, Error> {
        let live = self.live()?;
        if live.players.iter().any(Player::in_opening) {
            Ok(Phase::Opening)
        } else {
            Ok(Phase::Main)
        }
    }

    pub fn table(&self) -> Result<&Table, Error> {
        Ok(&self.live()?.table)
    }

    pub fn player(&self, name: PlayerName) -> Result<&Player, Error> {
        Ok(&self.live()?.players[name.index()])
    }

    pub fn history(&self) -> Result<&[HistoryEntry], Error> {
        Ok(&self.live()?.history)
    }

    /// Up to `n` entries ending `offset` moves before the latest one.
    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Result<Vec<HistoryEntry>, Error> {
        let history = self.history()?;
        if n == 0 || history.is_empty() {
            return Ok(Vec::new());
        }
        let len = history.len();
        let offset = offset.min(len.saturating_sub(n));
        let end = len - offset;
        let start = end.saturating_sub(n);
        Ok(history[start..end].to_vec())
    }

    /// Applies a move for the player to act and passes the turn.
    ///
    /// A rejected move leaves the game exactly as it was and the same player
    /// keeps the turn.
    pub fn play_move(&mut self, command: Command) -> Result<(), Error> {
        if self.winner()?.is_some() {
            return Err(RuleError::GameOver.into());
        }
        let seat = self.current;
        let live = self.live.as_mut().ok_or(FatalError::Closed)?;
        let card = live.apply(seat, command)?;

        let player = &mut live.players[seat.index()];
        player.increment_moves();
        let drawn = player.maybe_draw();
        let turn = live.history.len() as u32 + 1;
        live.history.push(HistoryEntry { turn, seat, command, card });
        self.current = seat.other();
        tracing::debug!(turn, seat = %seat, %command, ?card, ?drawn, "move applied");

        if let Some(w) = self.winner()? {
            tracing::info!(winner = %w, turn, "game won");
        }
        Ok(())
    }

    /// The winner, if the game is decided.
    ///
    /// A player whose hand has run out loses. Otherwise a player needs two of
    /// the three caravan pairs (see [`pair_winner`]).
    pub fn winner(&self) -> Result<Option<PlayerName>, Error> {
        let live = self.live()?;
        for p in PlayerName::BOTH {
            if live.players[p.index()].hand_size() == 0 {
                return Ok(Some(p.other()));
            }
        }
        let mut wins = [0u8; 2];
        for (bottom, top) in CaravanName::PAIRS {
            if let Some(w) = pair_winner(live.table.bid(bottom), live.table.bid(top)) {
                wins[w.index()] += 1;
            }
        }
        Ok(PlayerName::BOTH.into_iter().find(|p| wins[p.index()] >= 2))
    }
}
