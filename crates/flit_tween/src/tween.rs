//! A single tween: one property on one target, interpolated over time
//!
//! A [`Tween`] is a reusable record. It is configured by a request call,
//! prepared against the host (which captures the start value and the diff),
//! then ticked once per frame until it completes or is stopped. Retired
//! tweens are reset and parked in the [`TweenPool`](crate::pool::TweenPool).
//!
//! # Time model
//!
//! `elapsed` runs from `-delay` to `duration` and is clamped to that range
//! on every tick. While `elapsed <= 0` the tween is in its delay phase and
//! leaves the target untouched. A tick reports completion exactly when the
//! clamped `elapsed` equals `duration` on the logically final leg.

use crate::easing::Easing;
use flit_core::{shortest_rotation, Color, TweenHost, Vec3};
use std::fmt;

/// Identifier assigned to a tween when it is registered with a scheduler.
///
/// Ids are never reused within a scheduler, even though the underlying
/// record is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

impl TweenId {
    /// Id carried by a tween that has not been registered yet
    pub const UNASSIGNED: TweenId = TweenId(0);

    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}

/// The property a tween drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Position,
    LocalPosition,
    Rotation,
    LocalRotation,
    Scale,
    Color,
    CustomAction,
}

/// The vector-valued subset of [`PropertyKind`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VectorProperty {
    Position,
    LocalPosition,
    /// World Euler angles, degrees
    Rotation,
    /// Local Euler angles, degrees
    LocalRotation,
    /// Local scale
    Scale,
}

impl VectorProperty {
    pub fn kind(self) -> PropertyKind {
        match self {
            VectorProperty::Position => PropertyKind::Position,
            VectorProperty::LocalPosition => PropertyKind::LocalPosition,
            VectorProperty::Rotation => PropertyKind::Rotation,
            VectorProperty::LocalRotation => PropertyKind::LocalRotation,
            VectorProperty::Scale => PropertyKind::Scale,
        }
    }

    /// Rotations interpolate along the shortest arc per axis
    pub fn is_rotation(self) -> bool {
        matches!(self, VectorProperty::Rotation | VectorProperty::LocalRotation)
    }

    pub fn read<H: TweenHost>(self, host: &H, target: H::Handle) -> Vec3 {
        match self {
            VectorProperty::Position => host.position(target),
            VectorProperty::LocalPosition => host.local_position(target),
            VectorProperty::Rotation => host.euler_angles(target),
            VectorProperty::LocalRotation => host.local_euler_angles(target),
            VectorProperty::Scale => host.local_scale(target),
        }
    }

    pub fn write<H: TweenHost>(self, host: &mut H, target: H::Handle, value: Vec3) {
        match self {
            VectorProperty::Position => host.set_position(target, value),
            VectorProperty::LocalPosition => host.set_local_position(target, value),
            VectorProperty::Rotation => host.set_euler_angles(target, value),
            VectorProperty::LocalRotation => host.set_local_euler_angles(target, value),
            VectorProperty::Scale => host.set_local_scale(target, value),
        }
    }
}

/// What happens when a leg of the tween reaches its end
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopKind {
    #[default]
    None,
    /// Snap back to the start value and play the same leg again
    RestartFromBeginning,
    /// Play back towards where the previous leg began
    PingPong,
}

/// Outcome of a single [`Tween::tick`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickResult {
    /// Still in its delay phase, mid-leg, or about to start another loop leg
    Running,
    /// Reached the end of its final leg
    Completed,
    /// The target (or its color surface) is gone; the tween is dropped
    /// without firing its completion callback
    Abandoned,
}

impl TickResult {
    /// Whether the scheduler should retire the tween
    pub fn is_complete(self) -> bool {
        !matches!(self, TickResult::Running)
    }
}

/// Callback fired with the target handle when a tween completes
pub type CompletionHandler<Handle> = Box<dyn FnMut(Handle)>;

/// Callback fed eased progress every tick by a custom-action tween
pub type CustomAction = Box<dyn FnMut(f32)>;

/// Per-kind payload. Vector kinds share one shape; color and custom-action
/// tweens carry their own.
enum Channel<S> {
    Vector {
        property: VectorProperty,
        start: Vec3,
        target: Vec3,
        diff: Vec3,
    },
    Color {
        surface: Option<S>,
        start: Color,
        target: Color,
        diff: Color,
    },
    Custom {
        action: CustomAction,
    },
}

/// One scheduled interpolation of a single property on a single target
pub struct Tween<H: TweenHost> {
    id: TweenId,
    target: Option<H::Handle>,
    channel: Option<Channel<H::Surface>>,
    duration: f32,
    delay: f32,
    elapsed: f32,
    easing: Option<Easing>,
    relative: bool,
    on_complete: Option<CompletionHandler<H::Handle>>,
    loop_kind: LoopKind,
    loops_remaining: u32,
    prepared: bool,
}

impl<H: TweenHost> Default for Tween<H> {
    fn default() -> Self {
        Self {
            id: TweenId::UNASSIGNED,
            target: None,
            channel: None,
            duration: 0.0,
            delay: 0.0,
            elapsed: 0.0,
            easing: None,
            relative: false,
            on_complete: None,
            loop_kind: LoopKind::None,
            loops_remaining: 0,
            prepared: false,
        }
    }
}

impl<H: TweenHost> Tween<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every field back to its default.
    ///
    /// Drops the target handle and both callbacks, so a retired record never
    /// keeps a destroyed object or its captures alive.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Animate a vector property of `target` towards `to`
    pub fn animate_vector(
        &mut self,
        target: H::Handle,
        property: VectorProperty,
        to: Vec3,
        duration: f32,
    ) -> &mut Self {
        self.target = Some(target);
        self.duration = sanitize_duration(duration);
        self.channel = Some(Channel::Vector {
            property,
            start: Vec3::ZERO,
            target: to,
            diff: Vec3::ZERO,
        });
        self.prepared = false;
        self
    }

    /// Animate the color of `target`'s surface towards `to`
    pub fn animate_color(&mut self, target: H::Handle, to: Color, duration: f32) -> &mut Self {
        self.target = Some(target);
        self.duration = sanitize_duration(duration);
        self.channel = Some(Channel::Color {
            surface: None,
            start: Color::TRANSPARENT,
            target: to,
            diff: Color::TRANSPARENT,
        });
        self.prepared = false;
        self
    }

    /// Feed eased progress to `action` every tick instead of writing a property.
    ///
    /// `target` is only used for liveness checks and the completion callback.
    pub fn animate_custom(
        &mut self,
        target: H::Handle,
        duration: f32,
        action: impl FnMut(f32) + 'static,
    ) -> &mut Self {
        self.target = Some(target);
        self.duration = sanitize_duration(duration);
        self.channel = Some(Channel::Custom {
            action: Box::new(action),
        });
        self.prepared = false;
        self
    }

    /// Treat the destination as a delta from the prepared start value.
    ///
    /// Takes effect on the next [`prepare`](Self::prepare).
    pub fn set_relative(&mut self, relative: bool) -> &mut Self {
        self.relative = relative;
        self
    }

    /// Set the delay before interpolation starts.
    ///
    /// Meant for use before the first tick; it restarts the delay countdown
    /// if the tween has not begun interpolating yet.
    pub fn set_delay(&mut self, delay: f32) -> &mut Self {
        self.delay = sanitize_delay(delay);
        if self.elapsed <= 0.0 {
            self.elapsed = -self.delay;
        }
        self
    }

    pub fn set_easing(&mut self, easing: Easing) -> &mut Self {
        self.easing = Some(easing);
        self
    }

    /// Loop for `count` legs in total. A count of zero or `LoopKind::None`
    /// disables looping.
    pub fn set_loop(&mut self, kind: LoopKind, count: u32) -> &mut Self {
        if kind == LoopKind::None || count == 0 {
            self.loop_kind = LoopKind::None;
            self.loops_remaining = 0;
        } else {
            self.loop_kind = kind;
            self.loops_remaining = count;
        }
        self
    }

    /// Fire `handler` with the target handle once the tween completes
    pub fn on_complete(&mut self, handler: impl FnMut(H::Handle) + 'static) -> &mut Self {
        self.on_complete = Some(Box::new(handler));
        self
    }

    pub(crate) fn assign_id(&mut self, id: TweenId) {
        self.id = id;
    }

    /// Cancel any remaining loop legs so the current leg is the last one
    pub(crate) fn clear_loop(&mut self) {
        self.loop_kind = LoopKind::None;
        self.loops_remaining = 0;
    }

    /// Take the completion callback paired with the target it should receive
    pub(crate) fn take_completion(
        &mut self,
    ) -> Option<(CompletionHandler<H::Handle>, H::Handle)> {
        let handler = self.on_complete.take()?;
        self.target.map(|target| (handler, target))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> TweenId {
        self.id
    }

    pub fn target(&self) -> Option<H::Handle> {
        self.target
    }

    /// The property being driven, or `None` for a blank record
    pub fn kind(&self) -> Option<PropertyKind> {
        self.channel.as_ref().map(|channel| match channel {
            Channel::Vector { property, .. } => property.kind(),
            Channel::Color { .. } => PropertyKind::Color,
            Channel::Custom { .. } => PropertyKind::CustomAction,
        })
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Elapsed time, in `[-delay, duration]`
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn easing(&self) -> Option<Easing> {
        self.easing
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    pub fn loop_kind(&self) -> LoopKind {
        self.loop_kind
    }

    pub fn loops_remaining(&self) -> u32 {
        self.loops_remaining
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Whether the tween is still waiting out its delay
    pub fn is_in_delay(&self) -> bool {
        if self.duration > 0.0 {
            self.elapsed <= 0.0
        } else {
            self.elapsed < 0.0
        }
    }

    pub fn has_completion_handler(&self) -> bool {
        self.on_complete.is_some()
    }

    /// Captured start value of a vector tween
    pub fn vector_start(&self) -> Option<Vec3> {
        match &self.channel {
            Some(Channel::Vector { start, .. }) => Some(*start),
            _ => None,
        }
    }

    /// Diff applied over a leg of a vector tween
    pub fn vector_diff(&self) -> Option<Vec3> {
        match &self.channel {
            Some(Channel::Vector { diff, .. }) => Some(*diff),
            _ => None,
        }
    }

    /// Diff applied over a leg of a color tween
    pub fn color_diff(&self) -> Option<Color> {
        match &self.channel {
            Some(Channel::Color { diff, .. }) => Some(*diff),
            _ => None,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Capture the start value and diff from the host and rewind to `-delay`.
    ///
    /// Installs `default_easing` when none was configured. Must run once
    /// before the first tick; loop legs re-run the capture on their own.
    pub fn prepare(&mut self, host: &H, default_easing: Easing) {
        if self.easing.is_none() {
            self.easing = Some(default_easing);
        }

        self.delay = sanitize_delay(self.delay);

        self.capture(host);
        self.elapsed = -self.delay;
        self.prepared = true;
    }

    /// Read the current value from the host and compute this leg's diff
    fn capture(&mut self, host: &H) {
        let Some(handle) = self.target.filter(|t| host.is_valid(*t)) else {
            return;
        };
        let relative = self.relative;

        match &mut self.channel {
            Some(Channel::Vector {
                property,
                start,
                target,
                diff,
            }) => {
                *start = property.read(host, handle);
                *diff = if relative {
                    *target
                } else if property.is_rotation() {
                    shortest_rotation(*start, *target)
                } else {
                    *target - *start
                };
            }
            Some(Channel::Color {
                surface,
                start,
                target,
                diff,
            }) => {
                *surface = host.color_surface(handle);
                *start = surface
                    .map(|s| host.surface_color(s))
                    .unwrap_or(Color::TRANSPARENT);
                *diff = if relative { *target } else { *target - *start };
            }
            Some(Channel::Custom { .. }) | None => {}
        }
    }

    /// Advance by `dt` seconds and write the interpolated value to the host
    pub fn tick(&mut self, host: &mut H, dt: f32) -> TickResult {
        let Some(handle) = self.target.filter(|t| host.is_valid(*t)) else {
            return TickResult::Abandoned;
        };
        if let Some(Channel::Color { surface, .. }) = &self.channel {
            match surface {
                Some(s) if host.is_surface_valid(*s) => {}
                _ => return TickResult::Abandoned,
            }
        }

        let dt = if dt.is_nan() { 0.0 } else { dt };
        self.elapsed = (self.elapsed + dt).clamp(-self.delay, self.duration);

        if self.is_in_delay() {
            return TickResult::Running;
        }

        let progress = if self.duration > 0.0 {
            self.easing
                .unwrap_or_default()
                .ease(self.elapsed, self.duration)
        } else {
            1.0
        };

        match &mut self.channel {
            Some(Channel::Custom { action }) => action(progress),
            Some(Channel::Vector {
                property,
                start,
                diff,
                ..
            }) => property.write(host, handle, start.lerp_unclamped(*diff, progress)),
            Some(Channel::Color {
                surface: Some(surface),
                start,
                diff,
                ..
            }) => host.set_surface_color(*surface, start.lerp_unclamped(*diff, progress)),
            Some(Channel::Color { surface: None, .. }) | None => return TickResult::Abandoned,
        }

        if self.elapsed < self.duration {
            return TickResult::Running;
        }

        if self.loop_kind != LoopKind::None && self.begin_next_leg(host, handle) {
            return TickResult::Running;
        }

        TickResult::Completed
    }

    /// Consume one loop leg. Returns `true` when another leg follows, and
    /// `false` when the leg that just ended was the final one.
    fn begin_next_leg(&mut self, host: &mut H, handle: H::Handle) -> bool {
        self.loops_remaining = self.loops_remaining.saturating_sub(1);
        if self.loops_remaining == 0 {
            tracing::trace!(id = %self.id, "final loop leg finished");
            self.loop_kind = LoopKind::None;
            return false;
        }

        let relative = self.relative;
        match (self.loop_kind, &mut self.channel) {
            (
                LoopKind::RestartFromBeginning,
                Some(Channel::Vector {
                    property, start, ..
                }),
            ) => property.write(host, handle, *start),
            (
                LoopKind::RestartFromBeginning,
                Some(Channel::Color {
                    surface: Some(surface),
                    start,
                    ..
                }),
            ) => host.set_surface_color(*surface, *start),
            (
                LoopKind::PingPong,
                Some(Channel::Vector {
                    start, target, diff, ..
                }),
            ) => *target = if relative { -*diff } else { *start },
            (
                LoopKind::PingPong,
                Some(Channel::Color {
                    start, target, diff, ..
                }),
            ) => *target = if relative { *diff * -1.0 } else { *start },
            _ => {}
        }

        tracing::trace!(
            id = %self.id,
            loop_kind = ?self.loop_kind,
            remaining = self.loops_remaining,
            "starting next loop leg"
        );

        self.delay = 0.0;
        self.capture(host);
        self.elapsed = 0.0;
        true
    }
}

impl<H: TweenHost> fmt::Debug for Tween<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("kind", &self.kind())
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("elapsed", &self.elapsed)
            .field("easing", &self.easing)
            .field("relative", &self.relative)
            .field("loop_kind", &self.loop_kind)
            .field("loops_remaining", &self.loops_remaining)
            .finish_non_exhaustive()
    }
}

/// Durations that are not positive and finite collapse to zero: the tween
/// jumps to its end value once the delay has elapsed.
fn sanitize_duration(duration: f32) -> f32 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        tracing::warn!(
            duration,
            "non-positive tween duration, completing once the delay has elapsed"
        );
        0.0
    }
}

fn sanitize_delay(delay: f32) -> f32 {
    if delay.is_finite() && delay > 0.0 {
        delay
    } else {
        0.0
    }
}
