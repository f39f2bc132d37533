//! Flit Core
//!
//! Foundational types shared by the Flit tween engine and its hosts:
//!
//! - **Math**: `Vec3` and `Color` with the unclamped arithmetic tweens need
//! - **Angles**: shortest-path Euler deltas so rotations never take the long way
//! - **Host contract**: the `TweenHost` trait through which tweens read and
//!   write properties on objects they do not own
//! - **Scene**: a slotmap-backed reference host
//!
//! # Example
//!
//! ```rust
//! use flit_core::{Scene, TweenHost, Vec3};
//!
//! let mut scene = Scene::new();
//! let node = scene.spawn(Vec3::new(1.0, 0.0, 0.0));
//! scene.set_local_scale(node, Vec3::splat(2.0));
//!
//! assert!(scene.is_valid(node));
//! assert_eq!(scene.local_scale(node), Vec3::splat(2.0));
//! ```

pub mod angle;
pub mod color;
pub mod math;
pub mod scene;
pub mod target;

pub use angle::{delta_angle, shortest_rotation};
pub use color::Color;
pub use math::Vec3;
pub use scene::{Node, NodeId, Scene, Surface, SurfaceId};
pub use target::TweenHost;
