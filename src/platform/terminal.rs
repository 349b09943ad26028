//! Keyboard input from a raw-mode terminal
//!
//! Terminals report key presses and auto-repeats but rarely releases, so a key
//! counts as held until `hold` has passed since its last press or repeat. A
//! release event, when the terminal sends one, clears the key at once.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::InputSource;
use crate::error::Result;
use crate::sim::TickInput;

/// Keys that stay down across frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeldKey {
    Left = 0,
    Right,
    Up,
    Down,
    Shoot,
}

const HELD_KEY_COUNT: usize = 5;

/// What a single key event means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Hold(HeldKey),
    ExitToMenu,
    Quit,
}

fn map_key(key: &KeyEvent) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyAction::Quit);
    }
    let action = match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Hold(HeldKey::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Hold(HeldKey::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Hold(HeldKey::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Hold(HeldKey::Down),
        KeyCode::Char(' ') => KeyAction::Hold(HeldKey::Shoot),
        KeyCode::Esc => KeyAction::ExitToMenu,
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Key state tracker, fed by crossterm events
#[derive(Debug, Clone)]
pub struct TerminalInput {
    hold: Duration,
    last_seen: [Option<Instant>; HELD_KEY_COUNT],
    exit_to_menu: bool,
    quit: bool,
}

impl TerminalInput {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            last_seen: [None; HELD_KEY_COUNT],
            exit_to_menu: false,
            quit: false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) {
        let Some(action) = map_key(key) else {
            return;
        };
        let released = key.kind == KeyEventKind::Release;
        match action {
            KeyAction::Hold(k) => {
                self.last_seen[k as usize] = if released { None } else { Some(now) };
            }
            KeyAction::ExitToMenu if !released => self.exit_to_menu = true,
            KeyAction::Quit if !released => self.quit = true,
            _ => {}
        }
    }

    fn is_held(&self, key: HeldKey, now: Instant) -> bool {
        self.last_seen[key as usize]
            .is_some_and(|seen| now.saturating_duration_since(seen) < self.hold)
    }

    /// Build this frame's input and clear the one-shot signals
    fn snapshot(&mut self, now: Instant) -> TickInput {
        let input = TickInput {
            left: self.is_held(HeldKey::Left, now),
            right: self.is_held(HeldKey::Right, now),
            up: self.is_held(HeldKey::Up, now),
            down: self.is_held(HeldKey::Down, now),
            shoot: self.is_held(HeldKey::Shoot, now),
            exit_to_menu: self.exit_to_menu,
            quit: self.quit,
        };
        self.exit_to_menu = false;
        self.quit = false;
        input
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<TickInput> {
        let now = Instant::now();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.handle_key(&key, now),
                Event::FocusLost => self.last_seen = [None; HELD_KEY_COUNT],
                _ => {}
            }
        }
        Ok(self.snapshot(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(&press(KeyCode::Char('a'))), Some(KeyAction::Hold(HeldKey::Left)));
        assert_eq!(map_key(&press(KeyCode::Right)), Some(KeyAction::Hold(HeldKey::Right)));
        assert_eq!(map_key(&press(KeyCode::Char('W'))), Some(KeyAction::Hold(HeldKey::Up)));
        assert_eq!(map_key(&press(KeyCode::Down)), Some(KeyAction::Hold(HeldKey::Down)));
        assert_eq!(map_key(&press(KeyCode::Char(' '))), Some(KeyAction::Hold(HeldKey::Shoot)));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(KeyAction::ExitToMenu));
        assert_eq!(map_key(&press(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(map_key(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_key_held_until_timeout() {
        let mut input = TerminalInput::new(Duration::from_millis(100));
        let t0 = Instant::now();
        input.handle_key(&press(KeyCode::Right), t0);

        assert!(input.snapshot(t0 + Duration::from_millis(50)).right);
        assert!(!input.snapshot(t0 + Duration::from_millis(150)).right);
    }

    #[test]
    fn test_release_clears_key() {
        let mut input = TerminalInput::new(Duration::from_millis(100));
        let t0 = Instant::now();
        input.handle_key(&press(KeyCode::Char(' ')), t0);
        input.handle_key(&release(KeyCode::Char(' ')), t0);
        assert!(!input.snapshot(t0).shoot);
    }

    #[test]
    fn test_signals_are_one_shot() {
        let mut input = TerminalInput::new(Duration::from_millis(100));
        let t0 = Instant::now();
        input.handle_key(&press(KeyCode::Esc), t0);

        let first = input.snapshot(t0);
        assert!(first.exit_to_menu);
        assert!(!first.quit);
        assert!(!input.snapshot(t0).exit_to_menu);
    }
}
