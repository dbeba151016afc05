use crate::cards::Card;
use crate::command::Command;
use crate::engine::GameEngine;
use crate::error::Error;
use crate::game::pair_winner;
use crate::player::{Player, PlayerName};
use crate::table::{CaravanName, Table};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::time::{Duration, Instant};

use super::{seat_to_act, AgentKind, PlayerAgent};

/// Difficulty tiers for bot play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Difficulty {
    /// Mostly sensible, often distracted.
    Easy,
    Normal,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
        }
    }
}

/// Configuration for a bot's play style and randomness.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    /// Chance of picking a random legal move instead of the best one.
    pub blunder: f64,
    /// Score noise added to every candidate before ranking.
    pub jitter: i32,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Create a profile with tuned defaults for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (blunder, jitter) = match difficulty {
            Difficulty::Easy => (0.3, 12),
            Difficulty::Normal => (0.0, 0),
        };
        Self { difficulty, blunder, jitter, min_delay_ms: 0, max_delay_ms: 0, rng_seed: None }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_delay_ms(mut self, min: u64, max: u64) -> Self {
        self.min_delay_ms = min;
        self.max_delay_ms = max;
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Normal)
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    command: Command,
    score: i32,
}

/// Worth of a single caravan's bid to its owner.
fn bid_value(bid: u16) -> i32 {
    let bid = i32::from(bid);
    match bid {
        0..=20 => bid,
        21..=26 => 30 + bid,
        _ => -3 * (bid - 26),
    }
}

/// Static evaluation of a table from `seat`'s side.
fn evaluate(table: &Table, seat: PlayerName) -> i32 {
    let mut score = 0;
    let mut won = 0;
    let mut lost = 0;
    for (bottom, top) in CaravanName::PAIRS {
        let (mine, theirs) = if seat == PlayerName::Bottom { (bottom, top) } else { (top, bottom) };
        score += bid_value(table.bid(mine)) - bid_value(table.bid(theirs));
        match pair_winner(table.bid(bottom), table.bid(top)) {
            Some(w) if w == seat => {
                score += 40;
                won += 1;
            }
            Some(_) => {
                score -= 40;
                lost += 1;
            }
            None => {}
        }
    }
    if won >= 2 {
        score += 1000;
    }
    if lost >= 2 {
        score -= 1000;
    }
    score
}

/// Every move that the table accepts for `player`, scored by the position it leaves.
fn candidates(table: &Table, player: &Player) -> Vec<Candidate> {
    let seat = player.name();
    let opening = player.in_opening();
    let baseline = evaluate(table, seat);
    let mut out = Vec::new();

    for (idx, &card) in player.hand().iter().enumerate() {
        let hand_pos = idx + 1;
        if card.is_numeral() {
            for caravan in CaravanName::owned_by(seat) {
                if opening && !table.caravan(caravan).is_empty() {
                    continue;
                }
                let mut next = table.clone();
                if next.play_numeral(caravan, card).is_ok() {
                    let command = Command::Play { hand_pos, caravan, caravan_pos: None };
                    out.push(Candidate { command, score: evaluate(&next, seat) });
                }
            }
        } else if !opening {
            face_candidates(table, seat, hand_pos, card, &mut out);
        }
        if !opening {
            let command = Command::Discard { hand_pos };
            out.push(Candidate { command, score: baseline - 8 });
        }
    }
    if !opening {
        for caravan in CaravanName::owned_by(seat) {
            let mut next = table.clone();
            if next.clear_caravan(caravan).is_ok() {
                let command = Command::Clear { caravan };
                out.push(Candidate { command, score: evaluate(&next, seat) - 4 });
            }
        }
    }
    out
}

fn face_candidates(
    table: &Table,
    seat: PlayerName,
    hand_pos: usize,
    card: Card,
    out: &mut Vec<Candidate>,
) {
    for caravan in CaravanName::ALL {
        for pos in 1..=table.size(caravan) {
            let mut next = table.clone();
            if next.play_face(caravan, card, pos).is_ok() {
                let command = Command::Play { hand_pos, caravan, caravan_pos: Some(pos) };
                out.push(Candidate { command, score: evaluate(&next, seat) });
            }
        }
    }
}

/// Orders candidates best first according to the profile.
fn rank(mut cands: Vec<Candidate>, profile: &BotProfile, state: &mut BotState) -> Vec<Candidate> {
    if profile.jitter > 0 {
        for c in &mut cands {
            c.score += state.rng.random_range(-profile.jitter..=profile.jitter);
        }
    }
    cands.sort_by(|a, b| b.score.cmp(&a.score));
    if !cands.is_empty() && state.rng.random::<f64>() < profile.blunder {
        let pick = state.rng.random_range(0..cands.len());
        let c = cands.remove(pick);
        cands.insert(0, c);
    }
    cands
}

/// A bot that scores every legal move by simulating it on a copy of the table.
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
    next_action_at: Option<Instant>,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state, next_action_at: None }
    }

    fn ranked(&mut self, engine: &dyn GameEngine, seat: PlayerName) -> Result<Vec<Candidate>, Error> {
        let cands = candidates(engine.table()?, engine.player(seat)?);
        Ok(rank(cands, &self.profile, &mut self.state))
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn choose_move(
        &mut self,
        engine: &dyn GameEngine,
        seat: PlayerName,
    ) -> Result<Option<Command>, Error> {
        Ok(self.ranked(engine, seat)?.first().map(|c| c.command))
    }

    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: PlayerName) -> Result<bool, Error> {
        if !seat_to_act(engine, seat)? {
            return Ok(false);
        }
        let now = Instant::now();
        let delay = choose_delay_ms(&self.profile, &mut self.state);
        if delay > 0 {
            match self.next_action_at {
                None => {
                    self.next_action_at = Some(now + Duration::from_millis(delay));
                    return Ok(false);
                }
                Some(next) if now < next => {
                    return Ok(false);
                }
                Some(_) => {}
            }
        }
        self.next_action_at = None;

        for cand in self.ranked(engine, seat)? {
            match engine.play_move(cand.command) {
                Ok(()) => {
                    tracing::debug!(seat = %seat, command = %cand.command, score = cand.score, "bot move");
                    return Ok(true);
                }
                Err(e) if e.is_recoverable() => {
                    tracing::trace!(seat = %seat, command = %cand.command, error = %e, "bot move rejected");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(false)
    }
}

fn choose_delay_ms(profile: &BotProfile, state: &mut BotState) -> u64 {
    let min = profile.min_delay_ms;
    let max = profile.max_delay_ms.max(min);
    if max == min {
        min
    } else {
        state.rng.random_range(min..=max)
    }
}
