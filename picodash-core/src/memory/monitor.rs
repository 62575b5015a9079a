//! Memory monitor

use super::MemoryStats;
use crate::config::MemoryConfig;
use crate::traits::MemoryProbe;

/// Samples heap usage and runs reclamation on fixed cadences
///
/// Both cadences are independent of the render tick. The scheduler also
/// calls [`sample`](Self::sample) directly before a diagnostics draw so
/// that screen never shows stale figures.
pub struct MemoryMonitor<P> {
    probe: P,
    config: MemoryConfig,
    latest: MemoryStats,
    last_sample_ms: Option<u64>,
    last_reclaim_ms: u64,
}

impl<P: MemoryProbe> MemoryMonitor<P> {
    /// Create a new memory monitor
    pub fn new(probe: P, config: MemoryConfig) -> Self {
        Self {
            probe,
            config,
            latest: MemoryStats::default(),
            last_sample_ms: None,
            last_reclaim_ms: 0,
        }
    }

    /// Service the sample and reclaim cadences
    ///
    /// Returns the number of bytes released if a reclamation pass ran.
    pub fn poll(&mut self, now_ms: u64) -> Option<usize> {
        let sample_due = match self.last_sample_ms {
            None => true,
            Some(last) => {
                now_ms.saturating_sub(last) >= self.config.sample_interval_ms as u64
            }
        };
        if sample_due {
            self.sample();
            self.last_sample_ms = Some(now_ms);
        }

        if now_ms.saturating_sub(self.last_reclaim_ms) >= self.config.reclaim_interval_ms as u64 {
            self.last_reclaim_ms = now_ms;
            let released = self.probe.reclaim();
            self.sample();
            return Some(released);
        }

        None
    }

    /// Read fresh statistics from the probe
    pub fn sample(&mut self) -> MemoryStats {
        self.latest = self.probe.stats();
        self.latest
    }

    /// Most recent sample
    pub fn latest(&self) -> MemoryStats {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockProbe {
        used: usize,
        reclaims: u32,
    }

    impl MockProbe {
        fn new(used: usize) -> Self {
            Self { used, reclaims: 0 }
        }
    }

    impl MemoryProbe for &mut MockProbe {
        fn stats(&self) -> MemoryStats {
            MemoryStats::new(4096 - self.used, self.used)
        }

        fn reclaim(&mut self) -> usize {
            self.reclaims += 1;
            self.used -= 100;
            100
        }
    }

    fn config() -> MemoryConfig {
        MemoryConfig {
            sample_interval_ms: 1_000,
            reclaim_interval_ms: 5_000,
        }
    }

    #[test]
    fn test_first_poll_samples() {
        let mut probe = MockProbe::new(1024);
        let mut monitor = MemoryMonitor::new(&mut probe, config());
        assert_eq!(monitor.latest(), MemoryStats::default());

        assert_eq!(monitor.poll(0), None);
        assert_eq!(monitor.latest(), MemoryStats::new(3072, 1024));
    }

    #[test]
    fn test_reclaim_cadence() {
        let mut probe = MockProbe::new(1024);
        let mut monitor = MemoryMonitor::new(&mut probe, config());

        let mut released = 0;
        for t in (0..=10_000).step_by(100) {
            if let Some(bytes) = monitor.poll(t) {
                released += bytes;
            }
        }
        drop(monitor);

        assert_eq!(probe.reclaims, 2);
        assert_eq!(released, 200);
    }

    #[test]
    fn test_reclaim_refreshes_sample() {
        let mut probe = MockProbe::new(1024);
        let mut monitor = MemoryMonitor::new(&mut probe, config());
        monitor.poll(0);
        monitor.poll(5_000);
        assert_eq!(monitor.latest().used_bytes, 924);
    }

    #[test]
    fn test_sample_reads_probe() {
        let mut probe = MockProbe::new(2048);
        let mut monitor = MemoryMonitor::new(&mut probe, config());
        let stats = monitor.sample();
        assert_eq!(stats.usage_percent(), 50);
        assert_eq!(monitor.latest(), stats);
    }
}
