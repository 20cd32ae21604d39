use rand::Rng;
use rand::rngs::ThreadRng;

use crate::constants::MAX_CLIP_DRAWS;

/// Audio cues, ordered from -5 to +3 around the center clip.
pub const CLIPS: [&str; 9] = [
    "-5.wav", "-4.wav", "-3.wav", "-2.wav", "-1.wav", "0.wav", "+1.wav", "+2.wav", "+3.wav",
];

/// Always played first.
pub const OPENING_CLIP: &str = "0.wav";

/// Picks the next clip so that the same clip is never played twice in a row.
pub struct ClipPicker<R = ThreadRng> {
    rng: R,
    max_draws: usize,
}

impl ClipPicker<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl<R: Rng> ClipPicker<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            max_draws: MAX_CLIP_DRAWS,
        }
    }

    pub fn pick(&mut self, previous: Option<&str>) -> &'static str {
        let Some(previous) = previous else {
            return OPENING_CLIP;
        };

        for _ in 0..self.max_draws {
            let candidate = CLIPS[self.rng.random_range(0..CLIPS.len())];
            if candidate != previous {
                return candidate;
            }
        }

        // Out of draws: step to the neighbour of the previous clip.
        let index = CLIPS.iter().position(|clip| *clip == previous).unwrap_or(0);
        CLIPS[(index + 1) % CLIPS.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Always yields zero, so every draw lands on the first clip.
    struct Stuck;

    impl RngCore for Stuck {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
    }

    #[test]
    fn first_pick_is_opening_clip() {
        let mut picker = ClipPicker::with_rng(StdRng::seed_from_u64(7));
        assert_eq!(picker.pick(None), "0.wav");
    }

    #[test]
    fn stuck_rng_falls_back_to_neighbour() {
        let mut picker = ClipPicker::with_rng(Stuck);
        assert_eq!(picker.pick(Some("-4.wav")), "-5.wav");
        assert_eq!(picker.pick(Some("-5.wav")), "-4.wav");
    }

    #[test]
    fn fallback_wraps_at_end_of_list() {
        let mut picker = ClipPicker {
            rng: Stuck,
            max_draws: 0,
        };
        assert_eq!(picker.pick(Some("+3.wav")), "-5.wav");
    }

    #[test]
    fn every_clip_eventually_drawn() {
        let mut picker = ClipPicker::with_rng(StdRng::seed_from_u64(42));
        let mut seen = std::collections::HashSet::new();
        let mut previous = picker.pick(None);
        for _ in 0..500 {
            previous = picker.pick(Some(previous));
            seen.insert(previous);
        }
        assert_eq!(seen.len(), CLIPS.len());
    }

    proptest! {
        #[test]
        fn never_repeats_previous(seed in any::<u64>(), picks in 1usize..200) {
            let mut picker = ClipPicker::with_rng(StdRng::seed_from_u64(seed));
            let mut previous = picker.pick(None);
            prop_assert_eq!(previous, OPENING_CLIP);
            for _ in 0..picks {
                let next = picker.pick(Some(previous));
                prop_assert_ne!(next, previous);
                prop_assert!(CLIPS.contains(&next));
                previous = next;
            }
        }
    }
}
