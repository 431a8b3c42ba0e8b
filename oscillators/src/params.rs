//! Validated physical inputs of each oscillator
//!
//! Writes go through `set`, which checks the field's domain first and only
//! then stores the value, so a rejected write never leaves a field half
//! updated.

use crate::config::{pendulum, spring, Interval, PendulumConfig, SpringConfig};
use crate::error::{check, ValidationError};

/// Numeric inputs of the gravity pendulum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendulumField {
    Length,
    Angle,
    Mass,
}

impl PendulumField {
    pub const ALL: [PendulumField; 3] = [Self::Length, Self::Angle, Self::Mass];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Angle => "angle",
            Self::Mass => "mass",
        }
    }
}

/// Numeric inputs of the spring oscillator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpringField {
    Mass,
    SpringConstant,
    MaxStretch,
}

impl SpringField {
    pub const ALL: [SpringField; 3] = [Self::Mass, Self::SpringConstant, Self::MaxStretch];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mass => "mass",
            Self::SpringConstant => "spring constant",
            Self::MaxStretch => "stretch",
        }
    }
}

/// Pendulum parameters.
///
/// The rod is kept twice: `length_for_calculations` is the value the user
/// entered and drives all physics, `display_length` is the same value clamped
/// into the drawable range. Neither is recomputed from the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumParams {
    pub display_length: f64,
    pub length_for_calculations: f64,
    pub angle_deg: f64,
    pub mass: f64,
    pub air_friction_enabled: bool,
    pub config: PendulumConfig,
}

impl PendulumParams {
    pub fn new(config: PendulumConfig) -> Self {
        Self {
            display_length: config.display_length.clamp(pendulum::DEFAULT_LENGTH),
            length_for_calculations: pendulum::DEFAULT_LENGTH,
            angle_deg: pendulum::DEFAULT_ANGLE_DEG,
            mass: pendulum::DEFAULT_MASS,
            air_friction_enabled: false,
            config,
        }
    }

    pub fn set(&mut self, field: PendulumField, value: f64) -> Result<(), ValidationError> {
        match field {
            PendulumField::Length => {
                let length = check(field.name(), pendulum::LENGTH_DOMAIN, value)?;
                self.length_for_calculations = length;
                self.display_length = self.config.display_length.clamp(length);
            }
            PendulumField::Angle => {
                self.angle_deg = check(field.name(), pendulum::ANGLE_DOMAIN, value)?;
            }
            PendulumField::Mass => {
                self.mass = check(field.name(), pendulum::MASS_DOMAIN, value)?;
            }
        }
        Ok(())
    }

    pub fn reset_field(&mut self, field: PendulumField) {
        let defaults = Self::new(self.config);
        match field {
            PendulumField::Length => {
                self.length_for_calculations = defaults.length_for_calculations;
                self.display_length = defaults.display_length;
            }
            PendulumField::Angle => self.angle_deg = defaults.angle_deg,
            PendulumField::Mass => self.mass = defaults.mass,
        }
    }

    pub fn get(&self, field: PendulumField) -> f64 {
        match field {
            PendulumField::Length => self.length_for_calculations,
            PendulumField::Angle => self.angle_deg,
            PendulumField::Mass => self.mass,
        }
    }
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self::new(PendulumConfig::default())
    }
}

/// Spring oscillator parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub mass: f64,
    pub spring_constant: f64,
    /// Requested release amplitude
    pub max_stretch: f64,
    pub air_friction_enabled: bool,
    pub config: SpringConfig,
}

impl SpringParams {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            mass: spring::DEFAULT_MASS,
            spring_constant: spring::DEFAULT_SPRING_CONSTANT,
            max_stretch: spring::DEFAULT_STRETCH,
            air_friction_enabled: false,
            config,
        }
    }

    pub fn set(&mut self, field: SpringField, value: f64) -> Result<(), ValidationError> {
        match field {
            SpringField::Mass => {
                self.mass = check(field.name(), spring::MASS_DOMAIN, value)?;
            }
            SpringField::SpringConstant => {
                self.spring_constant = check(field.name(), spring::SPRING_CONSTANT_DOMAIN, value)?;
            }
            SpringField::MaxStretch => {
                self.max_stretch = check(field.name(), spring::STRETCH_DOMAIN, value)?;
            }
        }
        Ok(())
    }

    pub fn reset_field(&mut self, field: SpringField) {
        match field {
            SpringField::Mass => self.mass = spring::DEFAULT_MASS,
            SpringField::SpringConstant => self.spring_constant = spring::DEFAULT_SPRING_CONSTANT,
            SpringField::MaxStretch => self.max_stretch = spring::DEFAULT_STRETCH,
        }
    }

    pub fn get(&self, field: SpringField) -> f64 {
        match field {
            SpringField::Mass => self.mass,
            SpringField::SpringConstant => self.spring_constant,
            SpringField::MaxStretch => self.max_stretch,
        }
    }

    /// Rest length under load: `compressed + m·g/k`
    pub fn equilibrium_length(&self) -> f64 {
        self.config.compressed_length + self.mass * self.config.gravity / self.spring_constant
    }

    /// Extreme spring lengths reached when released from `max_stretch`
    pub fn sweep(&self) -> Interval {
        let eq = self.equilibrium_length();
        Interval::new(eq - self.max_stretch, eq + self.max_stretch)
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}
