use caravan_rs::config::GameConfig;
use caravan_rs::player::PlayerName;
use caravan_rs::tui::app::{AppState, InputAction, Scene};
use caravan_rs::tui::controller::handle_key;
use crossterm::event::KeyCode;

fn menu_app() -> AppState {
    AppState::new(GameConfig::default().with_seed(8)).unwrap()
}

fn setup_table_app() -> AppState {
    let mut app = menu_app();
    app.apply_menu();
    app
}

fn type_keys(app: &mut AppState, text: &str) {
    for c in text.chars() {
        assert!(!handle_key(app, KeyCode::Char(c)));
    }
}

#[test]
fn menu_navigation_and_apply() {
    let mut app = menu_app();
    assert!(matches!(app.scene, Scene::Menu));
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuApply);
    assert!(matches!(app.scene, Scene::Table));
}

#[test]
fn menu_edits_apply_to_the_next_game_only() {
    let mut app = menu_app();
    // Deck size is the first item; shrink it twice.
    handle_key(&mut app, KeyCode::Char('-'));
    handle_key(&mut app, KeyCode::Char('-'));
    assert_eq!(app.cfg.bottom.size, 42);
    assert_eq!(app.config.bottom.size, 54);

    handle_key(&mut app, KeyCode::Enter);
    assert!(matches!(app.scene, Scene::Table));
    assert_eq!(app.config.top.size, 42);
    assert_eq!(app.game.player(PlayerName::Top).unwrap().deck_size(), 34);

    handle_key(&mut app, KeyCode::Char('m'));
    assert!(matches!(app.scene, Scene::Menu));
    handle_key(&mut app, KeyCode::Char('+'));
    handle_key(&mut app, KeyCode::Esc);
    assert!(matches!(app.scene, Scene::Table));
    assert_eq!(app.config.bottom.size, 42);
}

#[test]
fn help_and_history_toggle() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::ToggleHelp);
    assert!(app.help_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.help_open());
    assert!(app.history_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.history_open());

    handle_key(&mut app, KeyCode::Char('?'));
    assert!(app.help_open());
    // Typing is swallowed while help is up.
    handle_key(&mut app, KeyCode::Char('p'));
    assert_eq!(app.input(), "");
    handle_key(&mut app, KeyCode::Esc);
    assert!(!app.help_open());
}

#[test]
fn command_line_editing() {
    let mut app = setup_table_app();
    type_keys(&mut app, "p1a!");
    assert_eq!(app.input(), "P1A");
    handle_key(&mut app, KeyCode::Backspace);
    assert_eq!(app.input(), "P1");
    handle_key(&mut app, KeyCode::Esc);
    assert_eq!(app.input(), "");
    type_keys(&mut app, &"1".repeat(AppState::INPUT_MAX + 4));
    assert_eq!(app.input().len(), AppState::INPUT_MAX);
}

#[test]
fn typed_move_is_applied_on_enter() {
    let mut app = setup_table_app();
    let hand = app.game.player(PlayerName::Bottom).unwrap().hand().to_vec();
    let pos = hand.iter().position(|c| c.is_numeral()).unwrap() + 1;
    type_keys(&mut app, &format!("p{pos}b"));
    handle_key(&mut app, KeyCode::Enter);
    assert_eq!(app.game.history().unwrap().len(), 1);
    assert_eq!(app.game.table().unwrap().caravan(caravan_rs::table::CaravanName::B).size(), 1);
    assert!(!app.human_to_move());
}

#[test]
fn exit_and_q_quit() {
    let mut app = setup_table_app();
    type_keys(&mut app, "exit");
    assert!(handle_key(&mut app, KeyCode::Enter));
    assert!(app.should_quit());

    let mut app = menu_app();
    assert!(handle_key(&mut app, KeyCode::Char('q')));
}
