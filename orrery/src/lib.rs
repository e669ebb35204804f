//! Orrery - animated solar system
//!
//! A sun, eight textured planets on circular orbits and Earth's moon, viewed
//! through an orbit/zoom/pan camera. The model advances a fixed amount per
//! rendered frame:
//!
//! - [`registry`]: static body descriptors
//! - [`simulation`]: orbital state and the per-tick update
//! - [`config`]: scene, camera and lighting settings
//! - [`renderer`]: textured sphere drawing

pub mod config;
pub mod error;
pub mod registry;
pub mod renderer;
pub mod simulation;

pub use config::SceneConfig;
pub use error::OrreryError;
pub use simulation::SolarSystem;
