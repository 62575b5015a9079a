//! Heap allocator and its memory probe

use embedded_alloc::LlffHeap as Heap;

use picodash_core::memory::MemoryStats;
use picodash_core::traits::MemoryProbe;

// Heap size: 96KB (the framebuffer lives here)
pub const HEAP_SIZE: usize = 96 * 1024;

#[global_allocator]
pub static HEAP: Heap = Heap::empty();

/// Initialize the heap allocator
pub fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}

/// Reads free/used counts from the global heap
///
/// The linked-list allocator frees eagerly, so `reclaim` keeps the
/// default no-op.
pub struct HeapProbe;

impl MemoryProbe for HeapProbe {
    fn stats(&self) -> MemoryStats {
        MemoryStats::new(HEAP.free(), HEAP.used())
    }
}
