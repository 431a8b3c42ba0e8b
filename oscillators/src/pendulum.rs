//! Simple gravity pendulum

use log::debug;

use crate::config::PendulumConfig;
use crate::energy::pendulum::{self as formulas, PeriodBranch};
use crate::error::ValidationError;
use crate::integrator;
use crate::model::{Motion, OscillatorModel, ReferenceValues};
use crate::params::{PendulumField, PendulumParams};
use crate::state::PendulumState;
use crate::validator::RangeValidator;

/// Captured when the pendulum is released
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumReference {
    pub initial_angle_deg: f64,
    pub branch: PeriodBranch,
    pub period: f64,
    pub mechanical_energy: f64,
}

impl ReferenceValues for PendulumReference {
    fn period(&self) -> f64 {
        self.period
    }

    fn mechanical_energy(&self) -> f64 {
        self.mechanical_energy
    }
}

/// Everything the renderer and read-outs need for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumSnapshot {
    pub angle_deg: f64,
    pub display_length: f64,
    pub height: f64,
    pub potential_energy: f64,
    pub kinetic_energy: f64,
    /// Reference energy from start, `None` before the first start
    pub total_mechanical_energy: Option<f64>,
    pub velocity: f64,
    pub amplitude: Option<f64>,
    pub period: Option<f64>,
    pub oscillations_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MathPendulumModel {
    params: PendulumParams,
    state: PendulumState,
}

impl MathPendulumModel {
    pub fn new() -> Self {
        Self::with_config(PendulumConfig::default())
    }

    pub fn with_config(config: PendulumConfig) -> Self {
        Self {
            params: PendulumParams::new(config),
            state: PendulumState::default(),
        }
    }

    pub fn params(&self) -> &PendulumParams {
        &self.params
    }

    pub fn state(&self) -> &PendulumState {
        &self.state
    }
}

impl Default for MathPendulumModel {
    fn default() -> Self {
        Self::new()
    }
}

impl OscillatorModel for MathPendulumModel {
    type Field = PendulumField;
    type Reference = PendulumReference;
    type Snapshot = PendulumSnapshot;

    fn name(&self) -> &'static str {
        "pendulum"
    }

    fn field_name(field: PendulumField) -> &'static str {
        field.name()
    }

    fn set_parameter(&mut self, field: PendulumField, value: f64) -> Result<(), ValidationError> {
        self.params.set(field, value)?;
        if field == PendulumField::Angle {
            self.state = PendulumState::at_rest(self.params.angle_deg);
        }
        debug!("pendulum {} set to {}", field.name(), value);
        Ok(())
    }

    fn reset_parameter(&mut self, field: PendulumField) {
        self.params.reset_field(field);
        if field == PendulumField::Angle {
            self.state = PendulumState::at_rest(self.params.angle_deg);
        }
    }

    fn set_air_friction(&mut self, enabled: bool) {
        self.params.air_friction_enabled = enabled;
    }

    fn air_friction(&self) -> bool {
        self.params.air_friction_enabled
    }

    fn reset(&mut self) {
        self.params = PendulumParams::new(self.params.config);
        self.state = PendulumState::default();
    }

    fn is_safe(&self) -> bool {
        self.params.is_safe()
    }

    fn capture_reference(&self) -> PendulumReference {
        let initial_angle_deg = self.state.angle_deg;
        let branch = PeriodBranch::for_angle(initial_angle_deg);
        PendulumReference {
            initial_angle_deg,
            branch,
            period: formulas::period(&self.params, initial_angle_deg, branch),
            mechanical_energy: formulas::potential_energy(&self.params, &self.state),
        }
    }

    fn freeze(&mut self) {
        self.state.angular_velocity_deg = 0.0;
    }

    fn step(&mut self) {
        integrator::step_pendulum(&self.params, &mut self.state);
    }

    fn snapshot(&self, reference: Option<&PendulumReference>, motion: Motion) -> PendulumSnapshot {
        let (kinetic_energy, velocity) = if motion.is_live() {
            (
                formulas::kinetic_energy(&self.params, &self.state),
                formulas::velocity(&self.params, &self.state),
            )
        } else {
            (0.0, 0.0)
        };

        PendulumSnapshot {
            angle_deg: self.state.angle_deg,
            display_length: self.params.display_length,
            height: formulas::height(&self.params, &self.state),
            potential_energy: formulas::potential_energy(&self.params, &self.state),
            kinetic_energy,
            total_mechanical_energy: reference.map(|r| r.mechanical_energy),
            velocity,
            amplitude: reference.map(|r| formulas::amplitude(&self.params, r.initial_angle_deg)),
            period: reference.map(|r| r.period),
            oscillations_enabled: motion.is_live(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_write_poses_the_bob() {
        let mut m = MathPendulumModel::new();
        m.set_parameter(PendulumField::Angle, -35.0).unwrap();
        assert_eq!(m.state().angle_deg, -35.0);
        assert_eq!(m.state().angular_velocity_deg, 0.0);

        m.reset_parameter(PendulumField::Angle);
        assert_eq!(m.state().angle_deg, 0.0);
    }

    #[test]
    fn test_reference_captures_branch_once() {
        let mut m = MathPendulumModel::new();
        m.set_parameter(PendulumField::Angle, 45.0).unwrap();
        let reference = m.capture_reference();
        assert_eq!(reference.branch, PeriodBranch::SeriesCorrection);
        assert_eq!(reference.initial_angle_deg, 45.0);

        // Swinging through small angles does not change the fixed period
        for _ in 0..50 {
            m.step();
        }
        let snap = m.snapshot(Some(&reference), Motion::Live);
        assert_eq!(snap.period, Some(reference.period));
        let expected_amp = 10.0 * 45.0f64.to_radians().sin();
        assert!((snap.amplitude.unwrap() - expected_amp).abs() < 1e-9);
    }

    #[test]
    fn test_reference_energy_is_starting_potential() {
        let mut m = MathPendulumModel::new();
        m.set_parameter(PendulumField::Angle, 60.0).unwrap();
        let reference = m.capture_reference();
        assert!((reference.mechanical_energy - 9.81 * 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_frozen_snapshot_reports_no_motion() {
        let mut m = MathPendulumModel::new();
        m.set_parameter(PendulumField::Angle, 30.0).unwrap();
        for _ in 0..10 {
            m.step();
        }
        assert!(m.state().angular_velocity_deg != 0.0);

        let snap = m.snapshot(None, Motion::Frozen);
        assert_eq!(snap.kinetic_energy, 0.0);
        assert_eq!(snap.velocity, 0.0);
        assert!(snap.potential_energy > 0.0);
        assert!(!snap.oscillations_enabled);
        assert_eq!(snap.period, None);
    }

    #[test]
    fn test_reset_restores_defaults_and_keeps_config() {
        let config = PendulumConfig {
            gravity: 1.62,
            ..PendulumConfig::default()
        };
        let mut m = MathPendulumModel::with_config(config);
        m.set_parameter(PendulumField::Length, 70.0).unwrap();
        m.set_parameter(PendulumField::Angle, 10.0).unwrap();
        m.set_air_friction(true);
        m.step();

        m.reset();
        assert_eq!(m, MathPendulumModel::with_config(config));
        assert_eq!(m.params().config.gravity, 1.62);
    }
}
