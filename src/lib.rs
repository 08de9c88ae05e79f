//! Animated "digital grid" background: drifting grid lines, a field of
//! particles joined by proximity lines, and ripples left behind by the
//! pointer.
//!
//! [`animator::ParticleFieldAnimator`] owns the simulation and renders each
//! frame into any [`surface::Surface`]. [`pacing`] drives it at a fixed frame
//! rate until its [`pacing::AnimationHandle`] is stopped.

pub mod animator;
pub mod config;
pub mod error;
pub mod field;
pub mod pacing;
pub mod surface;

#[cfg(test)]
mod property_tests;
