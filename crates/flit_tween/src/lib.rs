//! Flit Tween Engine
//!
//! Pooled, per-frame tweening of transform and color properties.
//!
//! # Features
//!
//! - **Clamped time model**: elapsed time runs from `-delay` to `duration`
//! - **Shortest-arc rotations**: Euler tweens never wrap the long way round
//! - **Relative tweens**: destinations can be deltas from the current value
//! - **Looping**: restart or ping-pong for a fixed number of legs
//! - **Pooling**: retired tweens are reset and reused instead of reallocated
//!
//! The host owns a [`TweenScheduler`], drives it with
//! [`TweenScheduler::update`] once per frame, and implements
//! [`flit_core::TweenHost`] for whatever it wants to animate.

pub mod config;
pub mod easing;
pub mod error;
pub mod pool;
pub mod request;
pub mod scheduler;
pub mod tween;

pub use config::SchedulerConfig;
pub use easing::{EaseFn, Easing};
pub use error::ConfigError;
pub use pool::TweenPool;
pub use request::TweenOptions;
pub use scheduler::TweenScheduler;
pub use tween::{
    CompletionHandler, CustomAction, LoopKind, PropertyKind, TickResult, Tween, TweenId,
    VectorProperty,
};
