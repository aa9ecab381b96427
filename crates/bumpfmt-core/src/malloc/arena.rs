//! Fixed-capacity bump arena.
//!
//! Invariants:
//! - `offset <= storage.len()` at all times.
//! - `offset` only grows, except through an explicit [`ScratchArena::reset`].
//! - A failed request leaves `offset` unchanged.

use std::ops::Range;

use parking_lot::{Mutex, MutexGuard};

use crate::error::FmtError;

/// Capacity of [`ScratchArena::default`] in bytes.
pub const DEFAULT_ARENA_CAPACITY: usize = 1024;

/// Offset-only allocator over an owned byte buffer.
#[derive(Debug)]
pub struct ScratchArena {
    storage: Box<[u8]>,
    offset: usize,
}

impl ScratchArena {
    /// Create an arena with `capacity` bytes, starting at offset zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: vec![0u8; capacity].into_boxed_slice(),
            offset: 0,
        }
    }

    /// Total bytes the arena can ever hand out.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Start of the next allocation.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left before exhaustion.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.storage.len() - self.offset
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Reserve `size` bytes and return their offsets within the arena.
    pub fn alloc_range(&mut self, size: usize) -> Result<Range<usize>, FmtError> {
        let remaining = self.remaining();
        if size > remaining {
            return Err(FmtError::ArenaExhausted {
                requested: size,
                remaining,
            });
        }
        let start = self.offset;
        self.offset += size;
        Ok(start..self.offset)
    }

    /// Reserve `size` bytes and borrow them.
    ///
    /// The returned slice may hold bytes from an earlier reset cycle.
    pub fn allocate(&mut self, size: usize) -> Result<&mut [u8], FmtError> {
        let range = self.alloc_range(size)?;
        Ok(&mut self.storage[range])
    }

    /// Rewind to offset zero, making the whole capacity available again.
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

impl Default for ScratchArena {
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_CAPACITY)
    }
}

/// A [`ScratchArena`] behind a mutex, for callers that share one arena
/// across threads. Each formatting call holds the lock until it returns.
#[derive(Debug, Default)]
pub struct SharedArena {
    inner: Mutex<ScratchArena>,
}

impl SharedArena {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(ScratchArena::new(capacity)),
        }
    }

    /// Lock the arena for the duration of the returned guard.
    pub fn lock(&self) -> MutexGuard<'_, ScratchArena> {
        self.inner.lock()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.inner.lock().remaining()
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocations_are_contiguous() {
        let mut arena = ScratchArena::new(64);
        let sizes = [10usize, 1, 20, 0, 33];
        let mut expected_start = 0;
        for size in sizes {
            let range = arena.alloc_range(size).unwrap();
            assert_eq!(range.start, expected_start);
            assert_eq!(range.len(), size);
            expected_start += size;
        }
        assert_eq!(arena.offset(), 64);
        assert!(arena.is_exhausted());
    }

    #[test]
    fn failed_request_does_not_move_offset() {
        let mut arena = ScratchArena::new(16);
        arena.alloc_range(10).unwrap();
        let err = arena.alloc_range(7).unwrap_err();
        assert!(matches!(
            err,
            FmtError::ArenaExhausted {
                requested: 7,
                remaining: 6
            }
        ));
        assert_eq!(arena.offset(), 10);
        // The remainder is still usable by a request that fits.
        assert_eq!(arena.alloc_range(6).unwrap(), 10..16);
    }

    #[test]
    fn allocate_returns_exact_length() {
        let mut arena = ScratchArena::default();
        assert_eq!(arena.capacity(), DEFAULT_ARENA_CAPACITY);
        let block = arena.allocate(100).unwrap();
        assert_eq!(block.len(), 100);
        block[99] = b'x';
        assert_eq!(arena.remaining(), DEFAULT_ARENA_CAPACITY - 100);
    }

    #[test]
    fn default_arena_serves_ten_scratch_buffers() {
        let mut arena = ScratchArena::default();
        for _ in 0..10 {
            arena.allocate(100).unwrap();
        }
        assert_eq!(arena.remaining(), 24);
        assert!(arena.allocate(100).is_err());
        assert!(arena.allocate(24).is_ok());
        assert!(arena.is_exhausted());
    }

    #[test]
    fn reset_rewinds() {
        let mut arena = ScratchArena::new(8);
        arena.allocate(8).unwrap();
        assert!(arena.allocate(1).is_err());
        arena.reset();
        assert_eq!(arena.offset(), 0);
        assert_eq!(arena.alloc_range(8).unwrap(), 0..8);
    }

    #[test]
    fn shared_arena_serializes_threads() {
        let shared = std::sync::Arc::new(SharedArena::new(400));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = std::sync::Arc::clone(&shared);
                std::thread::spawn(move || shared.lock().alloc_range(100).map(|r| r.start))
            })
            .collect();
        let mut starts: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        starts.sort_unstable();
        assert_eq!(starts, vec![0, 100, 200, 300]);
        assert_eq!(shared.remaining(), 0);
        shared.reset();
        assert_eq!(shared.remaining(), 400);
    }
}
