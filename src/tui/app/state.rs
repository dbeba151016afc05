use crate::agents::{AgentKind, AgentTable, BotAgent, BotProfile, Difficulty, HumanAgent};
use crate::command::Command;
use crate::config::GameConfig;
use crate::error::Error;
use crate::game::Game;
use crate::player::PlayerName;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    InputChar(char),
    InputBackspace,
    InputClear,
    Submit,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub game: Game,
    /// The seat typed commands are sent for; the other seat is a bot.
    pub human: PlayerName,
    pub agents: AgentTable,
    // Applied settings
    pub config: GameConfig,
    pub bot_delay_ms: u64,
    pub bot_difficulty: Difficulty,
    // Menu settings being edited
    pub menu_index: usize,
    pub cfg: GameConfig,
    pub cfg_bot_delay_ms: u64,
    pub cfg_bot_difficulty: Difficulty,
    /// Games dealt so far; offsets a fixed seed so each new game differs.
    pub(crate) games_started: u64,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    input: String,
    quit: bool,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    pub const INPUT_MAX: usize = 16;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(4);
    const DEFAULT_BOT_DELAY_MS: u64 = 500;

    /// Opens on the menu with a game already dealt from `config`.
    pub fn new(config: GameConfig) -> Result<Self, Error> {
        let game = Game::new(&config)?;
        let bot_difficulty = Difficulty::Normal;
        let mut app = Self {
            scene: Scene::Menu,
            game,
            human: PlayerName::Bottom,
            agents: AgentTable::new(),
            config: config.clone(),
            bot_delay_ms: Self::DEFAULT_BOT_DELAY_MS,
            bot_difficulty,
            menu_index: 0,
            cfg: config,
            cfg_bot_delay_ms: Self::DEFAULT_BOT_DELAY_MS,
            cfg_bot_difficulty: bot_difficulty,
            games_started: 1,
            help_open: false,
            history_open: false,
            history_offset: 0,
            input: String::new(),
            quit: false,
            action_error: None,
            action_error_at: None,
        };
        app.seat_agents();
        Ok(app)
    }

    pub(crate) fn seat_agents(&mut self) {
        let bot = self.human.other();
        let profile = Self::bot_profile(self.bot_delay_ms, self.bot_difficulty);
        self.agents = AgentTable::new();
        self.agents.set_min_action_delay_ms(150);
        self.agents.set_agent(self.human, Some(Box::new(HumanAgent::new())));
        self.agents.set_agent(bot, Some(Box::new(BotAgent::new(profile))));
    }

    pub(crate) fn bot_profile(delay_ms: u64, difficulty: Difficulty) -> BotProfile {
        BotProfile::for_difficulty(difficulty).with_delay_ms(delay_ms, delay_ms)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    pub(crate) fn close_overlays(&mut self) {
        self.help_open = false;
        self.history_open = false;
    }

    pub(crate) fn set_action_error(&mut self, msg: String) {
        self.action_error = Some(msg);
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    /// Who controls `seat`, for headers.
    pub fn seat_label(&self, seat: PlayerName) -> &'static str {
        match self.agents.agent_kind(seat) {
            Some(AgentKind::Human) => "you",
            Some(AgentKind::Bot) => "bot",
            None => "open",
        }
    }

    /// Whether the human may type a move right now.
    pub fn human_to_move(&self) -> bool {
        self.scene == Scene::Table
            && matches!(self.game.winner(), Ok(None))
            && self.game.to_move().ok() == Some(self.human)
    }

    /// Handles the typed line. `EXIT` quits; anything else must parse as a command.
    fn submit(&mut self) -> bool {
        let line = std::mem::take(&mut self.input);
        let line = line.trim();
        if line.is_empty() {
            return false;
        }
        if line.eq_ignore_ascii_case("EXIT") {
            self.quit = true;
            return false;
        }
        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(e) => {
                self.set_action_error(format!("{line}: {e}"));
                return false;
            }
        };
        if !self.human_to_move() {
            self.set_action_error("Not your turn".to_string());
            return false;
        }
        self.clear_action_error();
        let _ = self.agents.receive(self.human, cmd);
        self.agents_on_turn()
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let len = self.game.history().map(<[_]>::len).unwrap_or(0);
                    let max_offset = len.saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::InputChar(c) => {
                if self.scene == Scene::Table
                    && c.is_ascii_alphanumeric()
                    && self.input.len() < Self::INPUT_MAX
                {
                    self.input.push(c.to_ascii_uppercase());
                }
                false
            }
            InputAction::InputBackspace => {
                self.input.pop();
                false
            }
            InputAction::InputClear => {
                self.input.clear();
                false
            }
            InputAction::Submit => {
                if self.scene == Scene::Table {
                    self.submit()
                } else {
                    false
                }
            }
        }
    }

    /// Ticks the agent for the player to move. Returns whether a move was applied.
    pub fn agents_on_turn(&mut self) -> bool {
        if self.scene != Scene::Table {
            return false;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        match self.agents.on_turn(&mut self.game) {
            Ok(acted) => acted,
            Err(err) => {
                if !err.is_recoverable() {
                    tracing::warn!(error = %err, "agent hit a fatal error");
                }
                self.set_action_error(err.to_string());
                false
            }
        }
    }
}
