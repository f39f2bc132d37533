//! Free-list of retired tween records

use crate::tween::Tween;
use flit_core::TweenHost;

/// A reset tween parked in the pool.
///
/// The only way out is [`TweenPool::acquire`], so a retired record can never
/// be ticked or reconfigured by whoever last held it.
struct RetiredTween<H: TweenHost>(Tween<H>);

/// LIFO store of retired tweens.
///
/// Unbounded: `release` never rejects a record.
pub struct TweenPool<H: TweenHost> {
    free: Vec<RetiredTween<H>>,
    allocated: usize,
}

impl<H: TweenHost> TweenPool<H> {
    pub fn new() -> Self {
        Self {
            free: Vec::new(),
            allocated: 0,
        }
    }

    /// Create a pool prewarmed with `capacity` blank records
    pub fn with_capacity(capacity: usize) -> Self {
        let mut pool = Self {
            free: Vec::with_capacity(capacity),
            allocated: 0,
        };
        for _ in 0..capacity {
            pool.allocated += 1;
            pool.free.push(RetiredTween(Tween::new()));
        }
        pool
    }

    /// Pop the most recently retired record, or construct a new one
    pub fn acquire(&mut self) -> Tween<H> {
        match self.free.pop() {
            Some(RetiredTween(tween)) => {
                tracing::trace!(pooled = self.free.len(), "reusing pooled tween");
                tween
            }
            None => {
                self.allocated += 1;
                Tween::new()
            }
        }
    }

    /// Reset `tween` and park it for reuse
    pub fn release(&mut self, mut tween: Tween<H>) {
        tween.reset();
        self.free.push(RetiredTween(tween));
    }

    /// Number of records waiting for reuse
    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Total records this pool has ever constructed
    pub fn allocated(&self) -> usize {
        self.allocated
    }
}

impl<H: TweenHost> Default for TweenPool<H> {
    fn default() -> Self {
        Self::new()
    }
}
