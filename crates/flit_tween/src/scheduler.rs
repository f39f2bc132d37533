//! Tween scheduler
//!
//! Owns every active tween and the pool, and advances them once per frame.
//! The host constructs one scheduler at startup, calls [`update`] from its
//! frame loop, and calls [`shutdown`] before tearing the scene down.
//!
//! [`update`]: TweenScheduler::update
//! [`shutdown`]: TweenScheduler::shutdown

use crate::config::{is_valid_time_scale, SchedulerConfig};
use crate::pool::TweenPool;
use crate::tween::{TickResult, Tween, TweenId};
use flit_core::TweenHost;
use smallvec::SmallVec;

/// The scheduler that ticks all active tweens
pub struct TweenScheduler<H: TweenHost> {
    active: Vec<Tween<H>>,
    pool: TweenPool<H>,
    next_id: u64,
    config: SchedulerConfig,
}

impl<H: TweenHost> TweenScheduler<H> {
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        let config = if is_valid_time_scale(config.time_scale) {
            config
        } else {
            tracing::warn!(
                time_scale = config.time_scale,
                "invalid time scale, falling back to 1.0"
            );
            config.with_time_scale(1.0)
        };

        Self {
            active: Vec::with_capacity(config.pool_capacity),
            pool: TweenPool::with_capacity(config.pool_capacity),
            next_id: 1,
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Scale applied to every `update` delta. Invalid values are ignored.
    pub fn set_time_scale(&mut self, time_scale: f32) {
        if is_valid_time_scale(time_scale) {
            self.config.time_scale = time_scale;
        } else {
            tracing::warn!(time_scale, "ignoring invalid time scale");
        }
    }

    /// Take a blank record from the pool for manual configuration.
    ///
    /// Configure it, [`prepare`](Tween::prepare) it, then hand it to
    /// [`register`](Self::register).
    pub fn acquire(&mut self) -> Tween<H> {
        self.pool.acquire()
    }

    /// Add a prepared tween to the active set.
    ///
    /// The returned reference lets the caller chain completion and loop
    /// options before the first tick. It cannot outlive this borrow of the
    /// scheduler, so nobody can hold on to a record after it is retired.
    pub fn register(&mut self, mut tween: Tween<H>) -> &mut Tween<H> {
        let id = TweenId::new(self.next_id);
        self.next_id += 1;
        tween.assign_id(id);

        tracing::debug!(
            %id,
            kind = ?tween.kind(),
            duration = tween.duration(),
            delay = tween.delay(),
            "registered tween"
        );

        self.active.push(tween);
        let last = self.active.len() - 1;
        &mut self.active[last]
    }

    /// Advance every active tween by `dt` seconds (scaled by the time scale).
    ///
    /// Completed tweens fire their completion callback and go back to the
    /// pool. Abandoned tweens go back to the pool silently.
    pub fn update(&mut self, host: &mut H, dt: f32) {
        let dt = dt * self.config.time_scale;
        let default_easing = self.config.default_easing;

        // Back to front so swap_remove never moves an unvisited tween
        let mut i = self.active.len();
        while i > 0 {
            i -= 1;
            let tween = &mut self.active[i];
            if !tween.is_prepared() {
                tween.prepare(host, default_easing);
            }

            match tween.tick(host, dt) {
                TickResult::Running => {}
                TickResult::Completed => {
                    if let Some((mut handler, target)) = tween.take_completion() {
                        handler(target);
                    }
                    let done = self.active.swap_remove(i);
                    self.pool.release(done);
                }
                TickResult::Abandoned => {
                    tracing::debug!(
                        id = %tween.id(),
                        target = ?tween.target(),
                        "target gone, abandoning tween"
                    );
                    let done = self.active.swap_remove(i);
                    self.pool.release(done);
                }
            }
        }
    }

    /// Stop the tween with `id`. Returns `false` if no such tween is active.
    ///
    /// With `bring_to_completion`, remaining loop legs are dropped, the final
    /// value is written and the completion callback fires before the tween
    /// is retired. Otherwise the target is left where it is.
    pub fn stop(&mut self, host: &mut H, id: TweenId, bring_to_completion: bool) -> bool {
        let Some(index) = self.active.iter().position(|t| t.id() == id) else {
            return false;
        };

        tracing::debug!(%id, bring_to_completion, "stopping tween");
        self.stop_at(host, index, bring_to_completion);
        true
    }

    /// Stop every tween driving `target`. Returns how many were stopped.
    pub fn stop_target(
        &mut self,
        host: &mut H,
        target: H::Handle,
        bring_to_completion: bool,
    ) -> usize {
        let mut stopped = 0;
        let mut i = self.active.len();
        while i > 0 {
            i -= 1;
            if self.active[i].target() == Some(target) {
                self.stop_at(host, i, bring_to_completion);
                stopped += 1;
            }
        }
        if stopped > 0 {
            tracing::debug!(?target, stopped, bring_to_completion, "stopped tweens on target");
        }
        stopped
    }

    /// Stop every active tween. Returns how many were stopped.
    pub fn stop_all(&mut self, host: &mut H, bring_to_completion: bool) -> usize {
        let count = self.active.len();
        while !self.active.is_empty() {
            self.stop_at(host, self.active.len() - 1, bring_to_completion);
        }
        count
    }

    fn stop_at(&mut self, host: &mut H, index: usize, bring_to_completion: bool) {
        let mut tween = self.active.swap_remove(index);
        if bring_to_completion {
            if !tween.is_prepared() {
                tween.prepare(host, self.config.default_easing);
            }
            tween.clear_loop();
            if tween.tick(host, f32::INFINITY) == TickResult::Completed {
                if let Some((mut handler, target)) = tween.take_completion() {
                    handler(target);
                }
            }
        }
        self.pool.release(tween);
    }

    /// Retire every active tween without touching targets or firing callbacks.
    ///
    /// Call on host shutdown, before the objects being animated go away.
    pub fn shutdown(&mut self) {
        let drained = self.active.len();
        for tween in self.active.drain(..) {
            self.pool.release(tween);
        }
        tracing::debug!(drained, pooled = self.pool.len(), "tween scheduler shut down");
    }

    /// Ids of every active tween driving `target`
    pub fn tweens_for_target(&self, target: H::Handle) -> SmallVec<[TweenId; 4]> {
        self.active
            .iter()
            .filter(|t| t.target() == Some(target))
            .map(|t| t.id())
            .collect()
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween<H>> {
        self.active.iter().find(|t| t.id() == id)
    }

    pub fn get_mut(&mut self, id: TweenId) -> Option<&mut Tween<H>> {
        self.active.iter_mut().find(|t| t.id() == id)
    }

    pub fn is_active(&self, id: TweenId) -> bool {
        self.get(id).is_some()
    }

    /// Get the number of active tweens
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Check if any tweens are still running
    pub fn has_active_tweens(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn pool(&self) -> &TweenPool<H> {
        &self.pool
    }

    /// Iterate over all active tweens
    pub fn iter(&self) -> impl Iterator<Item = &Tween<H>> {
        self.active.iter()
    }
}

impl<H: TweenHost> Default for TweenScheduler<H> {
    fn default() -> Self {
        Self::new()
    }
}
