//! Agents: pluggable controllers for the two seats.
//!
//! `PlayerAgent` is the seat capability shared by humans and bots, and
//! `AgentTable` decides which agent acts for the player to move. Living in
//! the library keeps the TUI thin: it queues typed commands for the human and
//! ticks the table.

use crate::command::Command;
use crate::engine::GameEngine;
use crate::error::Error;
use crate::player::PlayerName;
use core::fmt;
use std::time::{Duration, Instant};

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// A seat controller that can act for a player when it is their turn.
pub trait PlayerAgent {
    /// Called while `seat` is to move. Returns whether a move was applied.
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: PlayerName) -> Result<bool, Error>;
    /// The move this agent would make now, without applying it.
    fn choose_move(
        &mut self,
        engine: &dyn GameEngine,
        seat: PlayerName,
    ) -> Result<Option<Command>, Error>;
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn is_human(&self) -> bool {
        matches!(self.kind(), AgentKind::Human)
    }
    /// Optionally receive a typed command; default is to ignore it.
    fn receive(&mut self, _command: Command) -> bool {
        false
    }
}

mod bots;

pub use bots::{BotAgent, BotProfile, Difficulty};

/// Whether `seat` may act now: the game is open, undecided and it is their turn.
fn seat_to_act(engine: &dyn GameEngine, seat: PlayerName) -> Result<bool, Error> {
    if engine.is_closed() || engine.winner()?.is_some() {
        return Ok(false);
    }
    Ok(engine.to_move()? == seat)
}

/// Applies commands typed by a person, one at a time.
#[derive(Debug, Default)]
pub struct HumanAgent {
    pending: Option<Command>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }

    fn receive(&mut self, command: Command) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(command);
        true
    }

    fn choose_move(
        &mut self,
        _engine: &dyn GameEngine,
        _seat: PlayerName,
    ) -> Result<Option<Command>, Error> {
        Ok(self.pending)
    }

    /// A rejected command is dropped and its error returned so the UI can show it.
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: PlayerName) -> Result<bool, Error> {
        if !seat_to_act(engine, seat)? {
            return Ok(false);
        }
        match self.pending.take() {
            Some(cmd) => engine.play_move(cmd).map(|_| true),
            None => Ok(false),
        }
    }
}

/// One optional agent per seat; drives the agent for the player to move.
pub struct AgentTable {
    seats: [Option<Box<dyn PlayerAgent>>; 2],
    min_action_delay: Duration,
    next_action_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(AgentKind::Human) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTable {
    pub fn new() -> Self {
        Self { seats: [None, None], min_action_delay: Duration::ZERO, next_action_at: None }
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: PlayerName, agent: Option<Box<dyn PlayerAgent>>) {
        self.seats[seat.index()] = agent;
    }

    pub fn agent_kind(&self, seat: PlayerName) -> Option<AgentKind> {
        self.seats[seat.index()].as_deref().map(|ag| ag.kind())
    }

    pub fn has_agent(&self, seat: PlayerName) -> bool {
        self.seats[seat.index()].is_some()
    }

    pub fn any_bots(&self) -> bool {
        self.seats.iter().filter_map(|a| a.as_deref()).any(|ag| !ag.is_human())
    }

    /// Send a typed command to a seat's agent, if any.
    pub fn receive(&mut self, seat: PlayerName, command: Command) -> bool {
        match self.seats[seat.index()].as_deref_mut() {
            Some(agent) => agent.receive(command),
            None => false,
        }
    }

    /// Set a minimum delay after any applied move before a bot may act.
    pub fn set_min_action_delay_ms(&mut self, delay_ms: u64) {
        self.min_action_delay = Duration::from_millis(delay_ms);
    }

    /// Drive the agent assigned to the player to move, if any.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> Result<bool, Error> {
        if engine.is_closed() {
            return Ok(false);
        }
        let seat = engine.to_move()?;
        let Some(agent) = self.seats[seat.index()].as_deref_mut() else {
            return Ok(false);
        };
        let now = Instant::now();
        if !agent.is_human() {
            if let Some(next) = self.next_action_at {
                if now < next {
                    return Ok(false);
                }
            }
        }
        let acted = agent.on_turn(engine, seat)?;
        if acted && self.min_action_delay > Duration::ZERO {
            self.next_action_at = Some(now + self.min_action_delay);
        }
        Ok(acted)
    }

    /// Remove all agents.
    pub fn clear(&mut self) {
        self.seats = [None, None];
        self.next_action_at = None;
    }
}
