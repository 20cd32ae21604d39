use crate::constants::{CURSOR_GRACE_PERIOD, CURSOR_IDLE_DELAY};
use crate::timer::Timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorChange {
    Shown,
    Hidden,
}

/// Hides the pointer after the mouse has been still for `idle_delay`.
///
/// After an auto-hide, moves are ignored for `grace_period` so the move events produced by hiding
/// the pointer cannot bring it straight back.
#[derive(Debug, Clone)]
pub struct CursorIdle {
    hidden: bool,
    grace: bool,
    idle_timer: Timer,
    grace_timer: Timer,
    idle_delay: f32,
    grace_period: f32,
}

impl Default for CursorIdle {
    fn default() -> Self {
        Self::new(CURSOR_IDLE_DELAY, CURSOR_GRACE_PERIOD)
    }
}

impl CursorIdle {
    /// The cursor starts hidden.
    pub fn new(idle_delay: f32, grace_period: f32) -> Self {
        Self {
            hidden: true,
            grace: false,
            idle_timer: Timer::new(),
            grace_timer: Timer::new(),
            idle_delay,
            grace_period,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[cfg(test)]
    pub fn in_grace_period(&self) -> bool {
        self.grace
    }

    pub fn on_mouse_move(&mut self) -> Option<CursorChange> {
        if self.grace {
            return None;
        }

        let was_hidden = self.hidden;
        self.hidden = false;
        self.idle_timer.arm(self.idle_delay);

        was_hidden.then_some(CursorChange::Shown)
    }

    pub fn update(&mut self, dt: f32) -> Option<CursorChange> {
        if self.grace_timer.tick(dt) {
            self.grace = false;
        }

        if self.idle_timer.tick(dt) {
            self.hidden = true;
            self.grace = true;
            self.grace_timer.arm(self.grace_period);
            return Some(CursorChange::Hidden);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Exact in binary floating point, so timer arithmetic lands on whole steps.
    const STEP: f32 = 0.125;

    fn advance(cursor: &mut CursorIdle, seconds: f32) -> Vec<CursorChange> {
        let steps = (seconds / STEP).round() as usize;
        (0..steps).filter_map(|_| cursor.update(STEP)).collect()
    }

    #[test]
    fn starts_hidden() {
        let cursor = CursorIdle::default();
        assert!(cursor.is_hidden());
        assert!(!cursor.in_grace_period());
    }

    #[test]
    fn move_reveals_then_idle_hides() {
        let mut cursor = CursorIdle::new(1.0, 0.25);
        assert_eq!(cursor.on_mouse_move(), Some(CursorChange::Shown));
        assert!(!cursor.is_hidden());

        assert!(advance(&mut cursor, 0.875).is_empty());
        assert!(!cursor.is_hidden());

        assert_eq!(advance(&mut cursor, 0.125), vec![CursorChange::Hidden]);
        assert!(cursor.is_hidden());
        assert!(cursor.in_grace_period());
    }

    #[test]
    fn moving_keeps_postponing_the_hide() {
        let mut cursor = CursorIdle::new(1.0, 0.25);
        cursor.on_mouse_move();
        for _ in 0..10 {
            advance(&mut cursor, 0.75);
            assert_eq!(cursor.on_mouse_move(), None);
            assert!(!cursor.is_hidden());
        }
    }

    #[test]
    fn moves_during_grace_period_are_ignored() {
        let mut cursor = CursorIdle::new(1.0, 0.25);
        cursor.on_mouse_move();
        advance(&mut cursor, 1.0);
        assert!(cursor.is_hidden());

        assert_eq!(cursor.on_mouse_move(), None);
        assert!(cursor.is_hidden());

        // The ignored move did not arm a new idle timer.
        assert!(advance(&mut cursor, 0.125).is_empty());
        assert!(cursor.in_grace_period());

        assert!(advance(&mut cursor, 0.125).is_empty());
        assert!(!cursor.in_grace_period());

        assert_eq!(cursor.on_mouse_move(), Some(CursorChange::Shown));
        assert!(!cursor.is_hidden());
    }

    proptest! {
        #[test]
        fn hidden_within_idle_delay_of_last_move(gaps in proptest::collection::vec(8u32..32, 1..20)) {
            let mut cursor = CursorIdle::new(1.0, 0.2);
            for gap in gaps {
                cursor.on_mouse_move();
                advance(&mut cursor, gap as f32 * STEP);
                prop_assert!(cursor.is_hidden());
            }
        }

        #[test]
        fn grace_period_moves_never_reveal(moves in 1usize..20) {
            let mut cursor = CursorIdle::new(1.0, 0.25);
            cursor.on_mouse_move();
            advance(&mut cursor, 1.0);
            prop_assert!(cursor.in_grace_period());

            for _ in 0..moves {
                prop_assert_eq!(cursor.on_mouse_move(), None);
                prop_assert!(cursor.is_hidden());
            }

            // No idle timer was armed by the ignored moves.
            prop_assert!(advance(&mut cursor, 2.0).is_empty());
            prop_assert!(cursor.is_hidden());
        }
    }
}
