//! Terminal front end: a menu for game settings and the table view where the
//! bottom player types commands against a bot.

pub mod app;
pub mod controller;
mod ui;
