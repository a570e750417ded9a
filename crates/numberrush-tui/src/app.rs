//! Application state: screens, cursor, key handling and the message timer.

use crate::storage::{self, Progress};
use crate::theme::{Theme, ThemeSettings};
use crossterm::event::{KeyCode, KeyEvent};
use numberrush_core::{GameEvent, GameSession, Mode, Op, Position, GRID_SIZE};
use std::time::Duration;

/// How often the app ticks (animation-free, so this only drives timers).
pub const TICK_RATE: Duration = Duration::from_millis(100);
/// Status messages clear after ~3 seconds, like the original.
const MESSAGE_TICKS: u32 = 30;
/// Number of levels shown on the level-select screen.
pub const LEVEL_COUNT: u32 = 20;

pub const MENU_ITEMS: [&str; 4] = ["Play", "Levels", "Settings", "Quit"];

/// Palette the settings screen cycles through per color field.
pub const PALETTE: [&str; 12] = [
    "#f8f8f8", "#f0f0f0", "#cccccc", "#b3e0ff", "#333333", "#0080ff", "#14161e", "#20202c",
    "#e6e6f0", "#50b4ff", "#ff5a5a", "#5aff82",
];

/// Result of handling a key press.
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Levels,
    Settings,
}

/// The main application state.
pub struct App {
    /// The game engine.
    pub session: GameSession,
    /// Cell under the keyboard cursor.
    pub cursor: Position,
    /// Current screen.
    pub screen: Screen,
    /// Selected main-menu entry.
    pub menu_selection: usize,
    /// Highlighted level on the level-select screen.
    pub level_selection: u32,
    /// Highlighted field on the settings screen.
    pub settings_selection: usize,
    /// Editable copy of the persisted settings record.
    pub settings: ThemeSettings,
    /// Resolved colors.
    pub theme: Theme,
    /// Status message, if any.
    pub message: Option<String>,
    message_timer: u32,
}

impl App {
    pub fn new(session: GameSession, settings: ThemeSettings) -> Self {
        let theme = Theme::from_settings(&settings);
        Self {
            session,
            cursor: Position::new(3, 3),
            screen: Screen::Menu,
            menu_selection: 0,
            level_selection: 1,
            settings_selection: 0,
            settings,
            theme,
            message: None,
            message_timer: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        let action = match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Playing => self.handle_game_key(key),
            Screen::Levels => self.handle_levels_key(key),
            Screen::Settings => self.handle_settings_key(key),
        };
        self.drain_events();
        action
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Up => {
                self.menu_selection = self.menu_selection.saturating_sub(1);
            }
            KeyCode::Down => {
                self.menu_selection = (self.menu_selection + 1).min(MENU_ITEMS.len() - 1);
            }
            KeyCode::Enter => match self.menu_selection {
                0 => self.screen = Screen::Playing,
                1 => {
                    self.level_selection = self.session.config().level;
                    self.screen = Screen::Levels;
                }
                2 => self.screen = Screen::Settings,
                _ => return AppAction::Quit,
            },
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Up => self.cursor.row = self.cursor.row.saturating_sub(1),
            KeyCode::Down => self.cursor.row = (self.cursor.row + 1).min(GRID_SIZE - 1),
            KeyCode::Left => self.cursor.col = self.cursor.col.saturating_sub(1),
            KeyCode::Right => self.cursor.col = (self.cursor.col + 1).min(GRID_SIZE - 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.session.pick_cell(self.cursor.row, self.cursor.col);
            }
            KeyCode::Char(c @ ('+' | '-' | '*' | '/')) => self.pick_operator_key(c),
            KeyCode::Char('r') => self.session.reset_selection(),
            KeyCode::Char('n') => self.session.next_level(),
            KeyCode::Char('m') => {
                let next = match self.session.mode() {
                    Mode::Edit => Mode::Calculate,
                    Mode::Calculate => Mode::Edit,
                };
                self.session.set_mode(next);
            }
            KeyCode::Char('q') | KeyCode::Esc => self.screen = Screen::Menu,
            _ => {}
        }
        AppAction::Continue
    }

    /// Operator keys fill the first open operator slot.
    fn pick_operator_key(&mut self, symbol: char) {
        let Some(op) = Op::from_symbol(symbol) else {
            return;
        };
        match self.session.selection().next_operator_slot() {
            Some(slot) => self.session.pick_operator(slot, op),
            None => self.show_message("All operator slots are filled".to_string()),
        }
    }

    fn handle_levels_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Left => self.level_selection = self.level_selection.saturating_sub(1).max(1),
            KeyCode::Right => self.level_selection = (self.level_selection + 1).min(LEVEL_COUNT),
            KeyCode::Up => self.level_selection = self.level_selection.saturating_sub(5).max(1),
            KeyCode::Down => self.level_selection = (self.level_selection + 5).min(LEVEL_COUNT),
            KeyCode::Enter => {
                if self.level_selection <= self.session.max_unlocked_level() {
                    self.session.load_level(self.level_selection);
                    self.screen = Screen::Playing;
                } else {
                    self.show_message("That level is still locked".to_string());
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => self.screen = Screen::Menu,
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Up => self.settings_selection = self.settings_selection.saturating_sub(1),
            KeyCode::Down => {
                self.settings_selection =
                    (self.settings_selection + 1).min(self.settings.fields().len() - 1);
            }
            KeyCode::Left => self.cycle_color(-1),
            KeyCode::Right => self.cycle_color(1),
            KeyCode::Char('s') => {
                storage::save_record(storage::SETTINGS_KEY, &self.settings);
                self.show_message("Settings saved successfully".to_string());
            }
            KeyCode::Char('d') => {
                self.settings = ThemeSettings::default();
                self.theme = Theme::from_settings(&self.settings);
                self.show_message("Settings reset to defaults".to_string());
            }
            KeyCode::Char('q') | KeyCode::Esc => self.screen = Screen::Menu,
            _ => {}
        }
        AppAction::Continue
    }

    /// Step the highlighted field through the palette.
    fn cycle_color(&mut self, step: isize) {
        let field = self.settings.field_mut(self.settings_selection);
        let current = PALETTE.iter().position(|hex| *hex == field.as_str());
        let next = match current {
            Some(i) => {
                (i as isize + step).rem_euclid(PALETTE.len() as isize) as usize
            }
            None => 0,
        };
        *field = PALETTE[next].to_string();
        self.theme = Theme::from_settings(&self.settings);
    }

    /// Advance timers: the engine's auto-reset and the message clearer.
    pub fn tick(&mut self) {
        self.session.tick(TICK_RATE.as_secs_f64());
        self.drain_events();
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
    }

    /// Pull pending engine events into app state.
    fn drain_events(&mut self) {
        for event in self.session.take_events() {
            match event {
                GameEvent::Message(text) => self.show_message(text),
                GameEvent::LevelUnlocked(_) => {
                    storage::save_record(
                        storage::PROGRESS_KEY,
                        &Progress {
                            max_unlocked_level: self.session.max_unlocked_level(),
                        },
                    );
                }
                // Selection state is re-read at render time
                GameEvent::TargetReached
                | GameEvent::TargetMismatch
                | GameEvent::SelectionReset => {}
            }
        }
    }

    fn show_message(&mut self, text: String) {
        self.message = Some(text);
        self.message_timer = MESSAGE_TICKS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        App::new(GameSession::with_seed(42), ThemeSettings::default())
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut app = test_app();
        app.screen = Screen::Playing;
        for _ in 0..20 {
            app.handle_key(key(KeyCode::Up));
            app.handle_key(key(KeyCode::Left));
        }
        assert_eq!(app.cursor, Position::new(0, 0));
        for _ in 0..20 {
            app.handle_key(key(KeyCode::Down));
            app.handle_key(key(KeyCode::Right));
        }
        assert_eq!(app.cursor, Position::new(7, 7));
    }

    #[test]
    fn test_locked_level_refused() {
        let mut app = test_app();
        app.screen = Screen::Levels;
        app.level_selection = 5;
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Levels);
        assert!(app.message.as_deref().unwrap_or("").contains("locked"));
    }

    #[test]
    fn test_message_clears_after_timeout() {
        let mut app = test_app();
        app.show_message("hello".to_string());
        for _ in 0..MESSAGE_TICKS {
            app.tick();
        }
        assert_eq!(app.message, None);
    }

    #[test]
    fn test_palette_cycling_updates_theme() {
        let mut app = test_app();
        app.screen = Screen::Settings;
        app.settings_selection = 0;
        let before = app.settings.bg_color.clone();
        app.handle_key(key(KeyCode::Right));
        assert_ne!(app.settings.bg_color, before);
        assert!(PALETTE.contains(&app.settings.bg_color.as_str()));
    }

    #[test]
    fn test_mode_toggle_key() {
        let mut app = test_app();
        app.screen = Screen::Playing;
        assert_eq!(app.session.mode(), Mode::Edit);
        app.handle_key(key(KeyCode::Char('m')));
        assert_eq!(app.session.mode(), Mode::Calculate);
        app.handle_key(key(KeyCode::Char('m')));
        assert_eq!(app.session.mode(), Mode::Edit);
    }
}
