use std::time::Duration;

use bevy::prelude::*;

use catalog::viewer_settings::{REVEAL_FADE_DELAY_MS, REVEAL_FADE_DURATION_MS};

/// Where the reveal currently stands after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealPhase {
    /// Initial delay before the fade starts.
    Waiting,
    /// Fade in progress; `progress` runs 0.0..1.0 across the fade duration.
    Fading { progress: f32 },
    /// Fade complete; the loading surface can be removed from the layout.
    Finished,
}

/// The two reveal timers as a single compound unit. Both delays live in one
/// resource so tearing the reveal down removes them both-or-neither; a
/// half-cancelled pair would leave the loading surface visually stuck.
#[derive(Resource)]
pub struct RevealSequence {
    elapsed: Duration,
    delay: Duration,
    fade: Duration,
}

impl RevealSequence {
    pub fn new(delay: Duration, fade: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            delay,
            fade,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            Duration::from_millis(REVEAL_FADE_DELAY_MS),
            Duration::from_millis(REVEAL_FADE_DURATION_MS),
        )
    }

    /// Advances the sequence and reports the phase it lands in.
    pub fn tick(&mut self, dt: Duration) -> RevealPhase {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.phase()
    }

    pub fn phase(&self) -> RevealPhase {
        if self.elapsed < self.delay {
            return RevealPhase::Waiting;
        }
        let into_fade = self.elapsed - self.delay;
        if into_fade < self.fade {
            RevealPhase::Fading {
                progress: into_fade.as_secs_f32() / self.fade.as_secs_f32(),
            }
        } else {
            RevealPhase::Finished
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_never_begins_before_the_delay() {
        let mut seq = RevealSequence::new(Duration::from_millis(160), Duration::from_millis(950));
        assert_eq!(seq.tick(Duration::from_millis(100)), RevealPhase::Waiting);
        assert_eq!(seq.tick(Duration::from_millis(59)), RevealPhase::Waiting);
        // t = 160ms: fade may begin.
        assert!(matches!(
            seq.tick(Duration::from_millis(1)),
            RevealPhase::Fading { .. }
        ));
    }

    #[test]
    fn surface_is_gone_only_after_delay_plus_duration() {
        let mut seq = RevealSequence::new(Duration::from_millis(160), Duration::from_millis(950));
        // t = 1109ms: still fading.
        assert!(matches!(
            seq.tick(Duration::from_millis(1109)),
            RevealPhase::Fading { .. }
        ));
        // t = 1110ms: finished.
        assert_eq!(seq.tick(Duration::from_millis(1)), RevealPhase::Finished);
    }

    #[test]
    fn fade_progress_is_monotonic() {
        let mut seq = RevealSequence::standard();
        let mut last = -1.0f32;
        for _ in 0..40 {
            if let RevealPhase::Fading { progress } = seq.tick(Duration::from_millis(33)) {
                assert!(progress > last);
                last = progress;
            }
        }
        assert_eq!(seq.phase(), RevealPhase::Finished);
    }
}
