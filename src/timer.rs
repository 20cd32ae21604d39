/// One-shot countdown advanced by frame time.
///
/// A timer is either disarmed or counting down. `tick` reports `true` exactly once, on the frame
/// the countdown reaches zero, and leaves the timer disarmed. Arming an armed timer replaces the
/// pending deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timer {
    remaining: Option<f32>,
}

impl Timer {
    pub fn new() -> Self {
        Self { remaining: None }
    }

    pub fn arm(&mut self, seconds: f32) {
        self.remaining = Some(seconds.max(0.0));
    }

    #[cfg(test)]
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    #[cfg(test)]
    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    pub fn tick(&mut self, dt: f32) -> bool {
        match self.remaining {
            Some(remaining) if remaining - dt <= 0.0 => {
                self.remaining = None;
                true
            }
            Some(remaining) => {
                self.remaining = Some(remaining - dt);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Timer;

    #[test]
    fn disarmed_timer_never_fires() {
        let mut timer = Timer::new();
        assert!(!timer.tick(10.0));
        assert!(!timer.is_armed());
    }

    #[test]
    fn fires_once_then_disarms() {
        let mut timer = Timer::new();
        timer.arm(1.0);
        assert!(!timer.tick(0.5));
        assert!(timer.tick(0.5));
        assert!(!timer.is_armed());
        assert!(!timer.tick(0.5));
    }

    #[test]
    fn rearming_replaces_deadline() {
        let mut timer = Timer::new();
        timer.arm(1.0);
        assert!(!timer.tick(0.75));
        timer.arm(1.0);
        assert!(!timer.tick(0.75));
        assert!(timer.tick(0.25));
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut timer = Timer::new();
        timer.arm(0.25);
        timer.cancel();
        assert!(!timer.tick(1.0));
    }

    #[test]
    fn zero_delay_fires_on_next_tick() {
        let mut timer = Timer::new();
        timer.arm(0.0);
        assert_eq!(timer.remaining(), Some(0.0));
        assert!(timer.tick(0.0));
    }
}
