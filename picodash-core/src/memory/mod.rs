//! Heap usage reporting and periodic reclamation

mod monitor;

pub use monitor::MemoryMonitor;

/// One heap usage sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MemoryStats {
    pub free_bytes: usize,
    pub used_bytes: usize,
}

impl MemoryStats {
    /// Create a new sample
    pub const fn new(free_bytes: usize, used_bytes: usize) -> Self {
        Self {
            free_bytes,
            used_bytes,
        }
    }

    /// Heap size
    pub fn total(&self) -> usize {
        self.free_bytes + self.used_bytes
    }

    /// Used share of the heap, 0-100
    pub fn usage_percent(&self) -> u8 {
        match self.total() {
            0 => 0,
            total => (self.used_bytes as u64 * 100 / total as u64) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_percent() {
        assert_eq!(MemoryStats::new(3 * 1024, 1024).usage_percent(), 25);
        assert_eq!(MemoryStats::new(0, 10).usage_percent(), 100);
        assert_eq!(MemoryStats::default().usage_percent(), 0);
        assert_eq!(MemoryStats::new(100, 28).total(), 128);
    }
}
