//! Capped exponential backoff

/// Retry delay that doubles from a base up to a ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Backoff {
    base_ms: u32,
    ceiling_ms: u32,
    next_ms: u32,
    attempt: u8,
}

impl Backoff {
    /// Create a new backoff
    ///
    /// A base above the ceiling is clamped to it; a zero base becomes 1 ms.
    pub fn new(base_ms: u32, ceiling_ms: u32) -> Self {
        let ceiling_ms = ceiling_ms.max(1);
        let base_ms = base_ms.clamp(1, ceiling_ms);
        Self {
            base_ms,
            ceiling_ms,
            next_ms: base_ms,
            attempt: 0,
        }
    }

    /// Delay before the next attempt; doubles the one after it
    pub fn next_delay(&mut self) -> u32 {
        let delay = self.next_ms;
        self.next_ms = self.next_ms.saturating_mul(2).min(self.ceiling_ms);
        self.attempt = self.attempt.saturating_add(1);
        delay
    }

    /// Start again from the base delay
    pub fn reset(&mut self) {
        self.next_ms = self.base_ms;
        self.attempt = 0;
    }

    /// Delays handed out since the last reset
    pub fn attempt(&self) -> u8 {
        self.attempt
    }

    pub fn ceiling_ms(&self) -> u32 {
        self.ceiling_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubles_to_ceiling() {
        let mut backoff = Backoff::new(5_000, 60_000);
        let delays: [u32; 6] = core::array::from_fn(|_| backoff.next_delay());
        assert_eq!(delays, [5_000, 10_000, 20_000, 40_000, 60_000, 60_000]);
        assert_eq!(backoff.attempt(), 6);
    }

    #[test]
    fn test_reset() {
        let mut backoff = Backoff::new(100, 1_000);
        backoff.next_delay();
        backoff.next_delay();
        backoff.reset();
        assert_eq!(backoff.attempt(), 0);
        assert_eq!(backoff.next_delay(), 100);
    }

    #[test]
    fn test_base_clamped() {
        let mut backoff = Backoff::new(90_000, 60_000);
        assert_eq!(backoff.next_delay(), 60_000);

        let mut backoff = Backoff::new(0, 10);
        assert_eq!(backoff.next_delay(), 1);
    }
}
