//! Request API: the entry points that build, prepare and register tweens
//!
//! Every property has a `*_to` form that animates from the current value to a
//! destination, and a `*_from` form that snaps the property to a value right
//! away and animates back to where it was. All of them return the registered
//! tween so completion and loop options can be chained before the first tick:
//!
//! ```rust
//! use flit_core::{Scene, TweenHost, Vec3};
//! use flit_tween::{Easing, LoopKind, TweenOptions, TweenScheduler};
//!
//! let mut scene = Scene::new();
//! let node = scene.spawn(Vec3::ZERO);
//! let mut tweens = TweenScheduler::new();
//!
//! let id = tweens
//!     .position_to(
//!         &mut scene,
//!         node,
//!         Vec3::new(10.0, 0.0, 0.0),
//!         1.0,
//!         TweenOptions::new().easing(Easing::EaseOutQuad),
//!     )
//!     .set_loop(LoopKind::PingPong, 2)
//!     .id();
//!
//! tweens.update(&mut scene, 1.0);
//! assert_eq!(scene.position(node), Vec3::new(10.0, 0.0, 0.0));
//! assert!(tweens.is_active(id));
//! ```

use crate::easing::Easing;
use crate::scheduler::TweenScheduler;
use crate::tween::{Tween, VectorProperty};
use flit_core::{Color, TweenHost, Vec3};

/// Optional settings shared by every request call
#[derive(Clone, Copy, Debug, Default)]
pub struct TweenOptions {
    /// Seconds to wait before interpolating
    pub delay: f32,
    /// Easing curve; the scheduler's default is used when `None`
    pub easing: Option<Easing>,
    /// Interpret the destination as a delta from the current value
    pub relative: bool,
}

impl TweenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set delay
    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    /// Builder: set easing
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Builder: treat the destination as a delta
    pub fn relative(mut self) -> Self {
        self.relative = true;
        self
    }

    fn apply<H: TweenHost>(&self, tween: &mut Tween<H>) {
        tween.set_relative(self.relative).set_delay(self.delay);
        if let Some(easing) = self.easing {
            tween.set_easing(easing);
        }
    }
}

impl<H: TweenHost> TweenScheduler<H> {
    fn request_vector(
        &mut self,
        host: &mut H,
        target: H::Handle,
        property: VectorProperty,
        to: Vec3,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        let mut tween = self.acquire();
        tween.animate_vector(target, property, to, duration);
        options.apply(&mut tween);
        tween.prepare(host, self.config().default_easing);
        self.register(tween)
    }

    /// Snap `property` to `from`, then animate back to its prior value
    fn request_vector_from(
        &mut self,
        host: &mut H,
        target: H::Handle,
        property: VectorProperty,
        from: Vec3,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        let original = property.read(host, target);
        property.write(host, target, from);
        let options = TweenOptions {
            relative: false,
            ..options
        };
        self.request_vector(host, target, property, original, duration, options)
    }

    pub fn position_to(
        &mut self,
        host: &mut H,
        target: H::Handle,
        to: Vec3,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        self.request_vector(host, target, VectorProperty::Position, to, duration, options)
    }

    pub fn position_from(
        &mut self,
        host: &mut H,
        target: H::Handle,
        from: Vec3,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        self.request_vector_from(host, target, VectorProperty::Position, from, duration, options)
    }

    pub fn local_position_to(
        &mut self,
        host: &mut H,
        target: H::Handle,
        to: Vec3,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        self.request_vector(
            host,
            target,
            VectorProperty::LocalPosition,
            to,
            duration,
            options,
        )
    }

    pub fn local_position_from(
        &mut self,
        host: &mut H,
        target: H::Handle,
        from: Vec3,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        self.request_vector_from(
            host,
            target,
            VectorProperty::LocalPosition,
            from,
            duration,
            options,
        )
    }

    /// Rotate to world Euler angles `to` (degrees) along the shortest arc
    pub fn rotation_to(
        &mut self,
        host: &mut H,
        target: H::Handle,
        to: Vec3,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        self.request_vector(host, target, VectorProperty::Rotation, to, duration, options)
    }

    pub fn rotation_from(
        &mut self,
        host: &mut H,
        target: H::Handle,
        from: Vec3,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        self.request_vector_from(host, target, VectorProperty::Rotation, from, duration, options)
    }

    pub fn local_rotation_to(
        &mut self,
        host: &mut H,
        target: H::Handle,
        to: Vec3,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        self.request_vector(
            host,
            target,
            VectorProperty::LocalRotation,
            to,
            duration,
            options,
        )
    }

    pub fn local_rotation_from(
        &mut self,
        host: &mut H,
        target: H::Handle,
        from: Vec3,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        self.request_vector_from(
            host,
            target,
            VectorProperty::LocalRotation,
            from,
            duration,
            options,
        )
    }

    pub fn scale_to(
        &mut self,
        host: &mut H,
        target: H::Handle,
        to: Vec3,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        self.request_vector(host, target, VectorProperty::Scale, to, duration, options)
    }

    pub fn scale_from(
        &mut self,
        host: &mut H,
        target: H::Handle,
        from: Vec3,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        self.request_vector_from(host, target, VectorProperty::Scale, from, duration, options)
    }

    /// Animate the color of `target`'s surface.
    ///
    /// A target without a surface yields a tween that is abandoned on its
    /// first tick.
    pub fn color_to(
        &mut self,
        host: &mut H,
        target: H::Handle,
        to: Color,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        let mut tween = self.acquire();
        tween.animate_color(target, to, duration);
        options.apply(&mut tween);
        tween.prepare(host, self.config().default_easing);
        self.register(tween)
    }

    pub fn color_from(
        &mut self,
        host: &mut H,
        target: H::Handle,
        from: Color,
        duration: f32,
        options: TweenOptions,
    ) -> &mut Tween<H> {
        let original = match host.color_surface(target) {
            Some(surface) => {
                let original = host.surface_color(surface);
                host.set_surface_color(surface, from);
                original
            }
            None => from,
        };
        let options = TweenOptions {
            relative: false,
            ..options
        };
        self.color_to(host, target, original, duration, options)
    }

    /// Feed eased progress to `action` every tick for `duration` seconds.
    ///
    /// `target` ties the tween's lifetime to an object: if it goes away the
    /// tween is abandoned.
    pub fn custom_action(
        &mut self,
        host: &mut H,
        target: H::Handle,
        duration: f32,
        options: TweenOptions,
        action: impl FnMut(f32) + 'static,
    ) -> &mut Tween<H> {
        let mut tween = self.acquire();
        tween.animate_custom(target, duration, action);
        options.apply(&mut tween);
        tween.prepare(host, self.config().default_easing);
        self.register(tween)
    }
}
