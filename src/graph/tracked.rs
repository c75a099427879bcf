//! Latest evaluated point, handed from the solver to the overlay worker.
//!
//! The pair is published as one unit through a sequence lock: readers never
//! block and never observe an `x` from one update with a `y` from another.
//! Writers are serialized by a short mutex.

use parking_lot::Mutex;
use std::sync::atomic::{fence, AtomicU64, Ordering};

/// An evaluated `(x, y)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPoint {
    /// Input value.
    pub x: f64,
    /// Evaluated output.
    pub y: f64,
}

impl TrackedPoint {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Versioned single-slot cell holding the most recent [`TrackedPoint`].
///
/// The version is even when the slot is stable and odd while a write is in
/// progress; version 0 means nothing has been stored yet.
#[derive(Debug, Default)]
pub struct TrackedCell {
    version: AtomicU64,
    x: AtomicU64,
    y: AtomicU64,
    writer: Mutex<()>,
}

impl TrackedCell {
    /// Create an empty cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored point.
    pub fn store(&self, point: TrackedPoint) {
        let _guard = self.writer.lock();

        let version = self.version.load(Ordering::Relaxed);
        self.version.store(version.wrapping_add(1), Ordering::Relaxed);
        fence(Ordering::Release);

        self.x.store(point.x.to_bits(), Ordering::Relaxed);
        self.y.store(point.y.to_bits(), Ordering::Relaxed);

        self.version.store(version.wrapping_add(2), Ordering::Release);
    }

    /// Read the stored point, or `None` if nothing was stored yet.
    #[must_use]
    pub fn load(&self) -> Option<TrackedPoint> {
        loop {
            let before = self.version.load(Ordering::Acquire);
            if before & 1 == 1 {
                std::hint::spin_loop();
                continue;
            }

            let x = self.x.load(Ordering::Relaxed);
            let y = self.y.load(Ordering::Relaxed);
            fence(Ordering::Acquire);

            let after = self.version.load(Ordering::Relaxed);
            if before == after {
                if before == 0 {
                    return None;
                }
                return Some(TrackedPoint::new(f64::from_bits(x), f64::from_bits(y)));
            }
        }
    }

    /// Number of completed stores.
    #[must_use]
    pub fn updates(&self) -> u64 {
        self.version.load(Ordering::Acquire) / 2
    }
}
