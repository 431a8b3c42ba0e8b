//! Mechanical Oscillator Simulations
//!
//! Fixed-step simulation of two small oscillators:
//!
//! - **Gravity pendulum**: point mass on a rod, hard-limited to ±90°
//! - **Spring oscillator**: mass hanging on a spring, with a floor clamp
//!
//! Both run behind the same [`AnimationController`], which owns the model,
//! validates the safety envelope at start and advances the physics by a
//! constant 16 ms per tick. Rendering and input handling live in the optional
//! `viewer` feature; the engine itself has no windowing dependencies.

pub mod config;
pub mod controller;
pub mod energy;
pub mod error;
pub mod integrator;
pub mod model;
pub mod params;
pub mod pendulum;
pub mod scene;
pub mod spring;
pub mod state;
pub mod validator;

#[cfg(feature = "viewer")]
pub mod equations_ui;
#[cfg(feature = "viewer")]
pub mod renderer;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use controller::{AnimationController, AnimationState, FrameClock};
pub use error::{StartError, ValidationError};
pub use model::{Motion, OscillatorModel, ReferenceValues};
pub use params::{PendulumField, SpringField};
pub use pendulum::{MathPendulumModel, PendulumSnapshot};
pub use spring::{SpringOscillatorModel, SpringSnapshot};
pub use validator::RangeValidator;
