use crate::agents::Difficulty;
use crate::deck::{MAX_SAMPLE_DECKS, MIN_DECK_SIZE, STANDARD_DECK_SIZE};
use crate::game::Game;

use super::AppState;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    DeckSize,
    SampleDecks,
    Balanced,
    FirstPlayer,
    BotDifficulty,
    BotDelayMs,
}

const MENU_ITEMS: [MenuItem; 6] = [
    MenuItem::DeckSize,
    MenuItem::SampleDecks,
    MenuItem::Balanced,
    MenuItem::FirstPlayer,
    MenuItem::BotDifficulty,
    MenuItem::BotDelayMs,
];

const DECK_SIZE_STEP: usize = 6;

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        let deck = app.cfg.bottom;
        match self {
            MenuItem::DeckSize => format!("Deck Size: {}", deck.size),
            MenuItem::SampleDecks => format!("Sample Decks: {}", deck.sample_decks),
            MenuItem::Balanced => {
                format!("Balanced Sampling: {}", if deck.balanced { "Yes" } else { "No" })
            }
            MenuItem::FirstPlayer => format!("First Player: {}", app.cfg.first),
            MenuItem::BotDifficulty => format!("Bot Difficulty: {}", app.cfg_bot_difficulty.label()),
            MenuItem::BotDelayMs => format!("Bot Delay (ms): {}", app.cfg_bot_delay_ms),
        }
    }

    fn inc(self, app: &mut AppState) {
        let mut deck = app.cfg.bottom;
        match self {
            MenuItem::DeckSize => {
                deck.size = (deck.size + DECK_SIZE_STEP).min(STANDARD_DECK_SIZE * deck.sample_decks);
            }
            MenuItem::SampleDecks => {
                deck.sample_decks = (deck.sample_decks + 1).min(MAX_SAMPLE_DECKS);
            }
            MenuItem::Balanced => deck.balanced = !deck.balanced,
            MenuItem::FirstPlayer => app.cfg.first = app.cfg.first.other(),
            MenuItem::BotDifficulty => app.cfg_bot_difficulty = next_difficulty(app.cfg_bot_difficulty),
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_add(100);
            }
        }
        app.cfg = app.cfg.clone().with_decks(deck);
    }

    fn dec(self, app: &mut AppState) {
        let mut deck = app.cfg.bottom;
        match self {
            MenuItem::DeckSize => {
                deck.size = deck.size.saturating_sub(DECK_SIZE_STEP).max(MIN_DECK_SIZE);
            }
            MenuItem::SampleDecks => {
                if deck.sample_decks > 1 {
                    deck.sample_decks -= 1;
                    deck.size = deck.size.min(STANDARD_DECK_SIZE * deck.sample_decks);
                }
            }
            MenuItem::Balanced => deck.balanced = !deck.balanced,
            MenuItem::FirstPlayer => app.cfg.first = app.cfg.first.other(),
            MenuItem::BotDifficulty => app.cfg_bot_difficulty = next_difficulty(app.cfg_bot_difficulty),
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(100);
            }
        }
        app.cfg = app.cfg.clone().with_decks(deck);
    }
}

fn next_difficulty(d: Difficulty) -> Difficulty {
    match d {
        Difficulty::Easy => Difficulty::Normal,
        Difficulty::Normal => Difficulty::Easy,
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_overlays();
        self.scene = match self.scene {
            super::Scene::Menu => super::Scene::Table,
            _ => {
                self.open_menu();
                super::Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_overlays();
        self.menu_index = 0;
        self.cfg = self.config.clone();
        self.cfg_bot_delay_ms = self.bot_delay_ms;
        self.cfg_bot_difficulty = self.bot_difficulty;
        self.scene = super::Scene::Menu;
    }

    /// Starts a fresh game with the edited settings.
    ///
    /// A fixed seed still yields a new deal each time, and the same sequence of
    /// deals across runs.
    pub fn apply_menu(&mut self) {
        let mut dealt = self.cfg.clone();
        dealt.seed = dealt.seed.map(|s| s.wrapping_add(self.games_started));
        let game = match Game::new(&dealt) {
            Ok(g) => g,
            Err(e) => {
                self.set_action_error(e.to_string());
                return;
            }
        };
        self.game.close();
        self.game = game;
        self.games_started += 1;
        self.config = self.cfg.clone();
        self.bot_delay_ms = self.cfg_bot_delay_ms;
        self.bot_difficulty = self.cfg_bot_difficulty;
        self.seat_agents();
        let _ = self.handle_input(super::InputAction::InputClear);
        self.scene = super::Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = super::Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::player::PlayerName;
    use crate::tui::app::{AppState, InputAction};

    fn bottom(app: &AppState) -> crate::player::Player {
        app.game.player(PlayerName::Bottom).unwrap().clone()
    }

    #[test]
    fn fixed_seed_deals_a_new_game_each_time() {
        let mut a = AppState::new(GameConfig::default().with_seed(7)).unwrap();
        let first = bottom(&a);
        a.apply_menu();
        let second = bottom(&a);
        a.apply_menu();
        assert_ne!(first, second);
        assert_ne!(second, bottom(&a));

        let mut b = AppState::new(GameConfig::default().with_seed(7)).unwrap();
        assert_eq!(first, bottom(&b));
        b.apply_menu();
        assert_eq!(second, bottom(&b));
    }

    #[test]
    fn deck_size_stays_within_what_the_samples_hold() {
        let mut app = AppState::new(GameConfig::default().with_seed(1)).unwrap();
        for _ in 0..5 {
            app.menu_inc();
        }
        assert_eq!(app.cfg.bottom.size, 54);
        for _ in 0..10 {
            app.menu_dec();
        }
        assert_eq!(app.cfg.top.size, 30);
        let _ = app.handle_input(InputAction::MenuNext);
        app.menu_inc();
        app.menu_inc();
        app.menu_inc();
        assert_eq!(app.cfg.bottom.sample_decks, 3);
        assert!(app.cfg.validate().is_ok());
    }
}
