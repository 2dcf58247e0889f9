//! Incremental text reveal used for the "typing" effect
//!
//! A [`Typewriter`] commits one more character of its target per tick. It
//! is restartable: observing a different target throws away the current
//! progress and replays against the new text only, and the completion
//! signal fires exactly once per observed target.

use std::time::{Duration, Instant};

/// Character-by-character reveal of a target string
#[derive(Debug, Clone)]
pub struct Typewriter {
    target: String,
    /// Committed prefix length in chars, not bytes
    revealed: usize,
    interval: Duration,
    last_advance: Option<Instant>,
    completion_fired: bool,
}

impl Typewriter {
    pub fn new(interval: Duration) -> Self {
        Self {
            target: String::new(),
            revealed: 0,
            interval,
            last_advance: None,
            completion_fired: false,
        }
    }

    /// Point the reveal at `target`. A changed target resets the committed
    /// prefix to empty and rearms the completion signal; re-observing the
    /// current target is a no-op.
    pub fn observe(&mut self, target: &str) {
        if self.target == target {
            return;
        }
        self.target = target.to_string();
        self.revealed = 0;
        self.last_advance = None;
        self.completion_fired = false;
    }

    /// Reveal one more character. Returns true if the prefix grew.
    pub fn tick(&mut self) -> bool {
        if self.revealed < self.target.chars().count() {
            self.revealed += 1;
            true
        } else {
            false
        }
    }

    /// Frame-loop driver: performs one tick per whole interval elapsed
    /// since the previous call. Returns true if the prefix grew.
    pub fn advance(&mut self, now: Instant) -> bool {
        let prev = match self.last_advance {
            Some(prev) => prev,
            None => {
                // First sighting arms the clock; the reveal starts on the
                // next whole interval.
                self.last_advance = Some(now);
                return false;
            }
        };
        if self.interval.is_zero() {
            self.last_advance = Some(now);
            let grew = !self.is_complete();
            self.revealed = self.target.chars().count();
            return grew;
        }
        let since = now.saturating_duration_since(prev);
        let ticks = (since.as_micros() / self.interval.as_micros()) as u64;
        if ticks == 0 {
            return false;
        }
        let mut grew = false;
        for _ in 0..ticks {
            if !self.tick() {
                break;
            }
            grew = true;
        }
        if self.is_complete() {
            self.last_advance = Some(now);
        } else {
            // Credit only the whole intervals consumed so a frame loop
            // coarser than the interval doesn't throttle the reveal to
            // one char per frame. An incomplete reveal means every tick
            // above landed, so `ticks` is bounded by the target length.
            self.last_advance = Some(prev + self.interval * ticks as u32);
        }
        grew
    }

    /// The committed prefix of the target
    pub fn visible(&self) -> &str {
        match self.target.char_indices().nth(self.revealed) {
            Some((byte_idx, _)) => &self.target[..byte_idx],
            None => &self.target,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether the full target is visible. An empty target is complete
    /// with zero ticks.
    pub fn is_complete(&self) -> bool {
        self.revealed >= self.target.chars().count()
    }

    /// One-shot completion signal: true the first time it is called after
    /// the reveal finishes, false afterwards until the target changes.
    pub fn poll_completion(&mut self) -> bool {
        if self.is_complete() && !self.completion_fired {
            self.completion_fired = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticked(tw: &mut Typewriter) -> String {
        tw.tick();
        tw.visible().to_string()
    }

    #[test]
    fn reveals_one_char_per_tick() {
        let mut tw = Typewriter::new(Duration::from_millis(10));
        tw.observe("hello");
        assert_eq!(tw.visible(), "");
        assert_eq!(ticked(&mut tw), "h");
        assert_eq!(ticked(&mut tw), "he");
        assert_eq!(ticked(&mut tw), "hel");
        assert_eq!(ticked(&mut tw), "hell");
        assert_eq!(ticked(&mut tw), "hello");
        assert!(tw.is_complete());
        assert!(tw.poll_completion());
        assert!(!tw.poll_completion());
        assert!(!tw.tick());
        assert_eq!(tw.visible(), "hello");
    }

    #[test]
    fn retarget_mid_reveal_restarts_from_empty() {
        let mut tw = Typewriter::new(Duration::from_millis(10));
        tw.observe("hello");
        tw.tick();
        tw.tick();
        assert_eq!(tw.visible(), "he");

        tw.observe("hi");
        assert_eq!(tw.visible(), "");
        assert!(!tw.poll_completion());
        assert_eq!(ticked(&mut tw), "h");
        assert_eq!(ticked(&mut tw), "hi");
        assert!(tw.poll_completion());
    }

    #[test]
    fn same_target_is_a_noop() {
        let mut tw = Typewriter::new(Duration::from_millis(10));
        tw.observe("hello");
        tw.tick();
        tw.tick();
        tw.observe("hello");
        assert_eq!(tw.visible(), "he");
    }

    #[test]
    fn empty_target_completes_immediately() {
        let mut tw = Typewriter::new(Duration::from_millis(10));
        tw.observe("");
        assert!(tw.is_complete());
        assert!(tw.poll_completion());
        assert!(!tw.poll_completion());
    }

    #[test]
    fn completion_rearms_per_target() {
        let mut tw = Typewriter::new(Duration::from_millis(10));
        tw.observe("a");
        tw.tick();
        assert!(tw.poll_completion());
        tw.observe("b");
        assert!(!tw.poll_completion());
        tw.tick();
        assert!(tw.poll_completion());
    }

    #[test]
    fn multibyte_targets_reveal_on_char_boundaries() {
        let mut tw = Typewriter::new(Duration::from_millis(10));
        tw.observe("é⌕a");
        assert_eq!(ticked(&mut tw), "é");
        assert_eq!(ticked(&mut tw), "é⌕");
        assert_eq!(ticked(&mut tw), "é⌕a");
        assert!(tw.is_complete());
    }

    #[test]
    fn advance_ticks_once_per_elapsed_interval() {
        let mut tw = Typewriter::new(Duration::from_millis(10));
        tw.observe("hello");
        let t0 = Instant::now();
        // First call arms the clock.
        assert!(!tw.advance(t0));
        assert!(!tw.advance(t0 + Duration::from_millis(5)));
        assert_eq!(tw.visible(), "");
        assert!(tw.advance(t0 + Duration::from_millis(10)));
        assert_eq!(tw.visible(), "h");
        // A long gap catches up without overshooting.
        assert!(tw.advance(t0 + Duration::from_millis(200)));
        assert_eq!(tw.visible(), "hello");
    }

    #[test]
    fn coarse_frame_loop_keeps_the_configured_cadence() {
        // A 30ms reveal driven at a 50ms frame cadence must not degrade
        // to one char per frame: the sub-interval remainder carries over.
        let mut tw = Typewriter::new(Duration::from_millis(30));
        tw.observe("hello");
        let t0 = Instant::now();
        tw.advance(t0);
        tw.advance(t0 + Duration::from_millis(50)); // 1 tick, 20ms carried
        assert_eq!(tw.visible(), "h");
        tw.advance(t0 + Duration::from_millis(100)); // 2 ticks, 10ms carried
        assert_eq!(tw.visible(), "hel");
        tw.advance(t0 + Duration::from_millis(150)); // 2 ticks
        assert_eq!(tw.visible(), "hello");
    }
}
