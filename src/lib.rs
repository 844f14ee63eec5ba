//! # Spring Particles
//!
//! A pooled CPU particle system for real-time game loops.
//!
//! ## Features
//!
//! - **Fixed-capacity pool**: particles are allocated once and recycled in a ring
//! - **Randomized emission**: bursts with randomized count, direction cone, speed,
//!   lifetime, color and scale, drawn from a per-system seedable RNG
//! - **Lifetime interpolation**: color and scale blend linearly from start to end
//! - **Draw ordering**: render indices re-sorted by distance to the camera every update
//! - **ECS integration**: `ParticleSystem` is a `bevy_ecs` component with an update system
//! - **Debug inspection**: live config editing through the `Inspector` trait (egui implementation included)
//!
//! ## Example
//!
//! ```ignore
//! use spring_particles::config::ParticlePreset;
//! use spring_particles::render::{Camera, ParticleSystem};
//!
//! let mut system = ParticleSystem::with_seed(42);
//! system.initialize(ParticlePreset::Smoke.to_config())?;
//! system.set_camera(Camera::default().into_handle());
//! system.update(1.0 / 60.0)?;
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Errors, logging and shared macros
//! - [`config`]: Particle system configuration, presets and file loading
//! - [`ecs`]: Transform, time resource and the particle update system
//! - [`physics`]: Physics placeholder carried by each particle
//! - [`render`]: Particle system, camera, meshes and the render sink interface

/// Errors, logging and shared macros
#[macro_use]
pub mod core;
/// Configuration system
pub mod config;
/// ECS components, resources and systems
pub mod ecs;
/// Physics placeholder bodies
pub mod physics;
/// Particle system and rendering collaborators
pub mod render;
