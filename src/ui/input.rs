/// Input state tracker and key-to-action dispatch.
///
/// Tracks which keys are currently held down, enabling:
///   - Fresh presses vs. held auto-repeat (the cooldown distinction)
///   - Edge-triggered actions (inventory toggle, menu confirm)
///
/// Uses crossterm's keyboard enhancement for Release events when available.
/// Falls back to timeout-based release detection on terminals that don't
/// support it.
///
/// All key bindings live here: the rest of the game sees only the
/// `InputAction` enum, never raw key codes.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::domain::player::Direction;

/// After this duration without a Press/Repeat event, consider the key released.
/// Only used when the terminal doesn't report Release events.
const HOLD_TIMEOUT: Duration = Duration::from_millis(160);

/// Logical actions the game understands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputAction {
    /// Directional action. `repeat` = held auto-repeat rather than a
    /// fresh press; the resolver applies the longer cooldown to it.
    Move { dir: Direction, repeat: bool },
    ToggleInventory,
    Confirm,
    Quit,
}

// ── Key Bindings ──

const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_INVENTORY: &[KeyCode] = &[KeyCode::Char('e'), KeyCode::Char('E')];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

/// Keys bound to a direction, in `Direction::ALL` order.
fn direction_keys(dir: Direction) -> &'static [KeyCode] {
    match dir {
        Direction::Up => KEYS_UP,
        Direction::Down => KEYS_DOWN,
        Direction::Left => KEYS_LEFT,
        Direction::Right => KEYS_RIGHT,
    }
}

pub struct InputState {
    /// Timestamp of last Press/Repeat event for each key.
    last_active: HashMap<KeyCode, Instant>,

    /// Keys that transitioned from "not held" → "held" during the
    /// most recent drain_events() call.
    fresh_presses: Vec<KeyCode>,

    /// Raw key events collected during drain, for meta-key handling.
    raw_events: Vec<KeyEvent>,

    /// Whether to honor Release events. Only true when keyboard
    /// enhancement is confirmed working.
    pub honor_release: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            last_active: HashMap::with_capacity(16),
            fresh_presses: Vec::with_capacity(8),
            raw_events: Vec::with_capacity(8),
            honor_release: false,
        }
    }

    /// Drain all pending terminal events and update key states.
    /// Call this once per frame, before dispatching actions.
    pub fn drain_events(&mut self) {
        self.fresh_presses.clear();
        self.raw_events.clear();

        // Read all available events without blocking
        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                self.raw_events.push(key);

                match key.kind {
                    KeyEventKind::Release if self.honor_release => {
                        self.last_active.remove(&key.code);
                    }
                    KeyEventKind::Release => {
                        // Ignore release when enhancement not confirmed;
                        // rely on timeout-based expiry instead
                    }
                    _ => {
                        let was_held = self.is_held(key.code);
                        self.last_active.insert(key.code, Instant::now());
                        if !was_held {
                            self.fresh_presses.push(key.code);
                        }
                    }
                }
            }
        }

        // Expire keys that have timed out (fallback for terminals without Release)
        let now = Instant::now();
        self.last_active.retain(|_, t| now.duration_since(*t) < HOLD_TIMEOUT);
    }

    /// Map this frame's key activity to logical actions.
    ///
    /// A direction with a fresh press emits `repeat: false`; a
    /// direction that is merely still held emits `repeat: true` each
    /// frame (rate limiting is the resolver's concern, not ours).
    pub fn actions(&self) -> Vec<InputAction> {
        let mut out = Vec::new();

        for dir in Direction::ALL {
            let keys = direction_keys(dir);
            if self.any_pressed(keys) {
                out.push(InputAction::Move { dir, repeat: false });
            } else if self.any_held(keys) {
                out.push(InputAction::Move { dir, repeat: true });
            }
        }

        if self.any_pressed(KEYS_INVENTORY) {
            out.push(InputAction::ToggleInventory);
        }
        if self.any_pressed(KEYS_CONFIRM) {
            out.push(InputAction::Confirm);
        }
        if self.any_pressed(KEYS_QUIT) {
            out.push(InputAction::Quit);
        }

        out
    }

    /// Check if any raw event this frame has Ctrl+C
    pub fn ctrl_c_pressed(&self) -> bool {
        use crossterm::event::KeyModifiers;
        self.raw_events.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }

    // ── Internal ──

    fn is_held(&self, code: KeyCode) -> bool {
        self.last_active
            .get(&code)
            .map(|t| t.elapsed() < HOLD_TIMEOUT)
            .unwrap_or(false)
    }

    fn any_held(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.is_held(*c))
    }

    fn was_pressed(&self, code: KeyCode) -> bool {
        self.fresh_presses.contains(&code)
    }

    fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.was_pressed(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Simulate a press observed this frame.
    fn with_press(code: KeyCode) -> InputState {
        let mut st = InputState::new();
        st.last_active.insert(code, Instant::now());
        st.fresh_presses.push(code);
        st
    }

    /// Simulate a key that has been held since before this frame.
    fn with_held(code: KeyCode) -> InputState {
        let mut st = InputState::new();
        st.last_active.insert(code, Instant::now());
        st
    }

    #[test]
    fn arrows_and_wasd_map_to_the_same_action() {
        for code in [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')] {
            let actions = with_press(code).actions();
            assert_eq!(actions, vec![InputAction::Move { dir: Direction::Up, repeat: false }]);
        }
        for code in [KeyCode::Left, KeyCode::Char('a')] {
            let actions = with_press(code).actions();
            assert_eq!(actions, vec![InputAction::Move { dir: Direction::Left, repeat: false }]);
        }
    }

    #[test]
    fn held_key_is_flagged_as_repeat() {
        let actions = with_held(KeyCode::Down).actions();
        assert_eq!(actions, vec![InputAction::Move { dir: Direction::Down, repeat: true }]);
    }

    #[test]
    fn inventory_toggle_is_edge_triggered() {
        let actions = with_press(KeyCode::Char('e')).actions();
        assert_eq!(actions, vec![InputAction::ToggleInventory]);
        // Merely holding E does not re-toggle
        let actions = with_held(KeyCode::Char('e')).actions();
        assert!(actions.is_empty());
    }

    #[test]
    fn quit_and_confirm_bindings() {
        assert_eq!(with_press(KeyCode::Esc).actions(), vec![InputAction::Quit]);
        assert_eq!(with_press(KeyCode::Char('q')).actions(), vec![InputAction::Quit]);
        assert_eq!(with_press(KeyCode::Enter).actions(), vec![InputAction::Confirm]);
    }
}
