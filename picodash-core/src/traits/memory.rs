//! Memory probe trait

use crate::memory::MemoryStats;

/// Source of allocator statistics
pub trait MemoryProbe {
    /// Read current free/used byte counts
    fn stats(&self) -> MemoryStats;

    /// Run a reclamation pass and return the number of bytes released
    ///
    /// Allocators without deferred frees have nothing to do here.
    fn reclaim(&mut self) -> usize {
        0
    }
}
