//! Level debouncing

/// A change in the debounced level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

/// Accepts a level only after it has been stable for the window
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    window_ms: u32,
    stable: bool,
    stable_since_ms: u64,
    candidate: bool,
    candidate_since_ms: u64,
}

impl Debouncer {
    /// Create a new debouncer, initially released
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            stable: false,
            stable_since_ms: 0,
            candidate: false,
            candidate_since_ms: 0,
        }
    }

    /// Feed one raw reading (`true` = pressed)
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Option<Edge> {
        if pressed != self.candidate {
            self.candidate = pressed;
            self.candidate_since_ms = now_ms;
        }

        let settled = now_ms.saturating_sub(self.candidate_since_ms) >= self.window_ms as u64;
        if self.candidate == self.stable || !settled {
            return None;
        }

        self.stable = self.candidate;
        self.stable_since_ms = now_ms;
        Some(if self.stable {
            Edge::Pressed
        } else {
            Edge::Released
        })
    }

    /// Debounced level
    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    /// Restart the stability window without changing the candidate level
    ///
    /// Used when a reading is missing: the level is unknown for that poll.
    pub fn restart(&mut self, now_ms: u64) {
        self.candidate_since_ms = now_ms;
    }

    /// Released, with the raw level unchanged for a full window
    pub fn is_settled_released(&self, now_ms: u64) -> bool {
        !self.stable
            && !self.candidate
            && now_ms.saturating_sub(self.candidate_since_ms) >= self.window_ms as u64
    }

    /// How long the debounced level has been pressed
    pub fn held_ms(&self, now_ms: u64) -> u64 {
        if self.stable {
            now_ms.saturating_sub(self.stable_since_ms)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_after_window() {
        let mut d = Debouncer::new(50);
        assert_eq!(d.update(true, 0), None);
        assert_eq!(d.update(true, 30), None);
        assert_eq!(d.update(true, 50), Some(Edge::Pressed));
        assert_eq!(d.update(true, 60), None);
        assert!(d.is_pressed());
    }

    #[test]
    fn test_bounce_ignored() {
        let mut d = Debouncer::new(50);
        d.update(true, 0);
        d.update(false, 10);
        d.update(true, 20);
        d.update(false, 30);
        assert_eq!(d.update(false, 70), None);
        assert!(!d.is_pressed());
    }

    #[test]
    fn test_bounce_restarts_window() {
        let mut d = Debouncer::new(50);
        d.update(true, 0);
        d.update(false, 40);
        d.update(true, 45);
        assert_eq!(d.update(true, 90), None);
        assert_eq!(d.update(true, 95), Some(Edge::Pressed));
    }

    #[test]
    fn test_release_and_hold_time() {
        let mut d = Debouncer::new(10);
        d.update(true, 0);
        d.update(true, 10);
        assert_eq!(d.held_ms(1_010), 1_000);

        d.update(false, 1_020);
        assert_eq!(d.update(false, 1_030), Some(Edge::Released));
        assert_eq!(d.held_ms(2_000), 0);
        assert!(d.is_settled_released(1_030));
    }

    #[test]
    fn test_restart_delays_settled_release() {
        let mut d = Debouncer::new(50);
        d.update(false, 0);
        assert!(d.is_settled_released(100));

        d.restart(100);
        assert!(!d.is_settled_released(120));
        d.update(false, 120);
        assert!(!d.is_settled_released(140));
        assert!(d.is_settled_released(150));
    }

    #[test]
    fn test_zero_window() {
        let mut d = Debouncer::new(0);
        assert_eq!(d.update(true, 5), Some(Edge::Pressed));
        assert_eq!(d.update(false, 6), Some(Edge::Released));
    }
}
