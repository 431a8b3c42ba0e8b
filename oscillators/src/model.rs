//! The capability surface shared by both oscillators
//!
//! The animation controller is written once against this trait; the pendulum
//! and the spring only supply their own parameters, force law and energy
//! formulas.

use std::fmt::Debug;

use crate::error::{StartError, ValidationError};

/// Values captured once at `start()` and held for the whole run.
pub trait ReferenceValues {
    /// Period chosen at start
    fn period(&self) -> f64;
    /// Mechanical energy at the starting state. Not a running total.
    fn mechanical_energy(&self) -> f64;
}

/// Whether the run is allowed to move.
///
/// `Frozen` reports zero kinetic energy and velocity whatever the state says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Live,
    Frozen,
}

impl Motion {
    pub fn is_live(self) -> bool {
        self == Motion::Live
    }
}

pub trait OscillatorModel {
    type Field: Copy + Debug;
    type Reference: ReferenceValues + Copy + Debug + PartialEq;
    type Snapshot: Clone + Debug;

    /// Short name used in log lines
    fn name(&self) -> &'static str;

    fn field_name(field: Self::Field) -> &'static str;

    /// Validate and store one parameter. A rejected value changes nothing.
    fn set_parameter(&mut self, field: Self::Field, value: f64) -> Result<(), ValidationError>;

    fn reset_parameter(&mut self, field: Self::Field);

    fn set_air_friction(&mut self, enabled: bool);

    fn air_friction(&self) -> bool;

    /// Restore default parameters and a state at rest.
    fn reset(&mut self);

    /// Preconditions that keep the controller in Idle when unmet
    fn check_startable(&self) -> Result<(), StartError> {
        Ok(())
    }

    /// Whether the current parameters fit the safety envelope
    fn is_safe(&self) -> bool;

    /// Capture the per-run reference values from the current state.
    fn capture_reference(&self) -> Self::Reference;

    /// Stop all motion. Called when a start lands outside the envelope.
    fn freeze(&mut self);

    /// Advance one fixed tick.
    fn step(&mut self);

    /// Derive the read-out for the current state.
    fn snapshot(&self, reference: Option<&Self::Reference>, motion: Motion) -> Self::Snapshot;
}
