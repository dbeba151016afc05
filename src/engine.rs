// Game engine API boundary. Agents and the TUI drive a game through this trait
// so they only see moves and read-only views of the table and players.

use crate::command::Command;
use crate::error::Error;
use crate::game::Game;
use crate::player::{Player, PlayerName};
use crate::table::Table;

pub trait GameEngine {
    // Moves
    fn play_move(&mut self, command: Command) -> Result<(), Error>;

    // Queries
    fn is_closed(&self) -> bool;
    fn to_move(&self) -> Result<PlayerName, Error>;
    fn winner(&self) -> Result<Option<PlayerName>, Error>;
    fn table(&self) -> Result<&Table, Error>;
    fn player(&self, name: PlayerName) -> Result<&Player, Error>;
}

impl GameEngine for Game {
    fn play_move(&mut self, command: Command) -> Result<(), Error> {
        Game::play_move(self, command)
    }

    fn is_closed(&self) -> bool {
        Game::is_closed(self)
    }
    fn to_move(&self) -> Result<PlayerName, Error> {
        Game::to_move(self)
    }
    fn winner(&self) -> Result<Option<PlayerName>, Error> {
        Game::winner(self)
    }
    fn table(&self) -> Result<&Table, Error> {
        Game::table(self)
    }
    fn player(&self, name: PlayerName) -> Result<&Player, Error> {
        Game::player(self, name)
    }
}
