//! Mass-on-spring oscillator

use log::{debug, trace};

use crate::config::SpringConfig;
use crate::energy::spring as formulas;
use crate::error::{StartError, ValidationError};
use crate::integrator;
use crate::model::{Motion, OscillatorModel, ReferenceValues};
use crate::params::{SpringField, SpringParams};
use crate::state::SpringState;
use crate::validator::RangeValidator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringReference {
    pub period: f64,
    pub mechanical_energy: f64,
}

impl ReferenceValues for SpringReference {
    fn period(&self) -> f64 {
        self.period
    }

    fn mechanical_energy(&self) -> f64 {
        self.mechanical_energy
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSnapshot {
    pub position: f64,
    pub equilibrium_length: f64,
    pub displacement: f64,
    pub velocity: f64,
    pub potential_energy: f64,
    pub kinetic_energy: f64,
    pub total_mechanical_energy: Option<f64>,
    pub amplitude: f64,
    pub period: f64,
    pub oscillations_enabled: bool,
    /// No stretch is requested, the spring is drawn at its compressed length
    pub at_rest_length: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpringOscillatorModel {
    params: SpringParams,
    state: SpringState,
    /// Floor clamps since the last reset, for diagnostics
    floor_hits: u64,
}

impl SpringOscillatorModel {
    pub fn new() -> Self {
        Self::with_config(SpringConfig::default())
    }

    pub fn with_config(config: SpringConfig) -> Self {
        Self {
            params: SpringParams::new(config),
            state: SpringState::default(),
            floor_hits: 0,
        }
    }

    pub fn params(&self) -> &SpringParams {
        &self.params
    }

    pub fn state(&self) -> &SpringState {
        &self.state
    }

    pub fn floor_hits(&self) -> u64 {
        self.floor_hits
    }
}

impl Default for SpringOscillatorModel {
    fn default() -> Self {
        Self::new()
    }
}

impl OscillatorModel for SpringOscillatorModel {
    type Field = SpringField;
    type Reference = SpringReference;
    type Snapshot = SpringSnapshot;

    fn name(&self) -> &'static str {
        "spring"
    }

    fn field_name(field: SpringField) -> &'static str {
        field.name()
    }

    fn set_parameter(&mut self, field: SpringField, value: f64) -> Result<(), ValidationError> {
        self.params.set(field, value)?;
        // Requesting a stretch pulls the bob down to it
        if field == SpringField::MaxStretch {
            self.state = SpringState::at_rest(self.params.max_stretch);
        }
        debug!(
            "spring {} set to {} (equilibrium length {:.3})",
            field.name(),
            value,
            self.params.equilibrium_length()
        );
        Ok(())
    }

    fn reset_parameter(&mut self, field: SpringField) {
        self.params.reset_field(field);
        if field == SpringField::MaxStretch {
            self.state = SpringState::at_rest(self.params.max_stretch);
        }
    }

    fn set_air_friction(&mut self, enabled: bool) {
        self.params.air_friction_enabled = enabled;
    }

    fn air_friction(&self) -> bool {
        self.params.air_friction_enabled
    }

    fn reset(&mut self) {
        self.params = SpringParams::new(self.params.config);
        self.state = SpringState::default();
        self.floor_hits = 0;
    }

    fn check_startable(&self) -> Result<(), StartError> {
        if self.params.max_stretch <= 0.0 {
            return Err(StartError::NotDisplaced);
        }
        Ok(())
    }

    fn is_safe(&self) -> bool {
        self.params.is_safe()
    }

    fn capture_reference(&self) -> SpringReference {
        SpringReference {
            period: formulas::period(&self.params),
            mechanical_energy: formulas::potential_energy(&self.params, &self.state),
        }
    }

    fn freeze(&mut self) {
        self.state.velocity = 0.0;
    }

    fn step(&mut self) {
        if integrator::step_spring(&self.params, &mut self.state) {
            self.floor_hits += 1;
            trace!("spring bob clamped at floor {:.3}", self.state.position);
        }
    }

    fn snapshot(&self, reference: Option<&SpringReference>, motion: Motion) -> SpringSnapshot {
        let (kinetic_energy, velocity) = if motion.is_live() {
            (
                formulas::kinetic_energy(&self.params, &self.state),
                formulas::velocity(&self.state),
            )
        } else {
            (0.0, 0.0)
        };

        SpringSnapshot {
            position: self.state.position,
            equilibrium_length: self.params.equilibrium_length(),
            displacement: formulas::displacement(&self.state),
            velocity,
            potential_energy: formulas::potential_energy(&self.params, &self.state),
            kinetic_energy,
            total_mechanical_energy: reference.map(|r| r.mechanical_energy),
            amplitude: formulas::amplitude(&self.params),
            period: formulas::period(&self.params),
            oscillations_enabled: motion.is_live(),
            at_rest_length: self.params.max_stretch <= 0.0,
        }
    }
}
