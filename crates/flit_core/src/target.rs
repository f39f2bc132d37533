//! The host contract the tween engine animates through
//!
//! The engine never owns the objects it animates. It holds an opaque
//! [`TweenHost::Handle`] and reads or writes properties through the host
//! each time it prepares or ticks a tween.

use crate::color::Color;
use crate::math::Vec3;
use std::fmt::Debug;

/// Accessors for every property a tween can drive.
///
/// Rotations are Euler angles in degrees. "Local" accessors are relative to
/// the parent, the others are in world space; hosts without a hierarchy may
/// implement both pairs identically.
pub trait TweenHost {
    /// Opaque reference to an animatable object
    type Handle: Copy + Eq + Debug;
    /// Opaque reference to a color-bearing surface owned by an object
    type Surface: Copy + Eq + Debug;

    /// Whether `target` still refers to a live object.
    ///
    /// Queried on every tick; a tween whose target is gone is abandoned.
    fn is_valid(&self, target: Self::Handle) -> bool;

    fn position(&self, target: Self::Handle) -> Vec3;
    fn set_position(&mut self, target: Self::Handle, value: Vec3);

    fn local_position(&self, target: Self::Handle) -> Vec3;
    fn set_local_position(&mut self, target: Self::Handle, value: Vec3);

    fn euler_angles(&self, target: Self::Handle) -> Vec3;
    fn set_euler_angles(&mut self, target: Self::Handle, value: Vec3);

    fn local_euler_angles(&self, target: Self::Handle) -> Vec3;
    fn set_local_euler_angles(&mut self, target: Self::Handle, value: Vec3);

    fn local_scale(&self, target: Self::Handle) -> Vec3;
    fn set_local_scale(&mut self, target: Self::Handle, value: Vec3);

    /// The surface whose color a color tween mutates, if the object has one
    fn color_surface(&self, target: Self::Handle) -> Option<Self::Surface>;

    /// Whether `surface` is still alive. Defaults to `true`.
    fn is_surface_valid(&self, _surface: Self::Surface) -> bool {
        true
    }

    fn surface_color(&self, surface: Self::Surface) -> Color;
    fn set_surface_color(&mut self, surface: Self::Surface, value: Color);
}
