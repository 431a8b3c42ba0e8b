//! Physical configuration and parameter domains
//!
//! Everything here is plain data. Models take a config at construction time
//! and never mutate it.

use std::time::Duration;

/// Wall-clock cadence of the tick source
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Simulated time applied by one tick, in seconds.
///
/// Not measured: a late or early tick still advances the physics by exactly
/// this much.
pub const DT: f64 = 0.016;

/// Standard gravity in m/s²
pub const GRAVITY: f64 = 9.81;

/// A closed numeric domain for a single parameter.
///
/// `min_exclusive` turns the lower bound into a strict inequality, which is
/// how the domains that feed a denominator keep it non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDomain {
    pub min: f64,
    pub max: f64,
    pub min_exclusive: bool,
}

impl FieldDomain {
    pub const fn inclusive(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_exclusive: false,
        }
    }

    pub const fn above(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_exclusive: true,
        }
    }

    /// NaN and infinities are never contained.
    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let above_min = if self.min_exclusive {
            value > self.min
        } else {
            value >= self.min
        };
        above_min && value <= self.max
    }
}

/// Closed interval used for the safety envelopes and display clamps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

// ============================================================================
// Pendulum
// ============================================================================

pub mod pendulum {
    use super::{FieldDomain, Interval};

    pub const LENGTH_DOMAIN: FieldDomain = FieldDomain::inclusive(1e-5, 1e6);
    pub const ANGLE_DOMAIN: FieldDomain = FieldDomain::inclusive(-90.0, 90.0);
    pub const MASS_DOMAIN: FieldDomain = FieldDomain::above(0.0, 1e6);

    pub const DEFAULT_LENGTH: f64 = 10.0;
    pub const DEFAULT_ANGLE_DEG: f64 = 0.0;
    pub const DEFAULT_MASS: f64 = 1.0;

    /// Hard limiter on the swing, degrees either side of vertical
    pub const ANGLE_LIMIT_DEG: f64 = 90.0;

    /// At or below this starting amplitude the small-angle period is used
    pub const SMALL_ANGLE_THRESHOLD_DEG: f64 = 20.0;

    pub const SAFE_LENGTH: Interval = Interval::new(0.05, 100.0);
    pub const DISPLAY_LENGTH: Interval = Interval::new(3.0, 50.0);
}

/// Constants of the gravity pendulum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumConfig {
    pub gravity: f64,
    pub air_friction_coeff: f64,
    /// Physics lengths outside this envelope disable oscillation
    pub safe_length: Interval,
    /// Range the drawn rod length is clamped to
    pub display_length: Interval,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            air_friction_coeff: 0.02,
            safe_length: pendulum::SAFE_LENGTH,
            display_length: pendulum::DISPLAY_LENGTH,
        }
    }
}

// ============================================================================
// Spring
// ============================================================================

pub mod spring {
    use super::{FieldDomain, Interval};

    pub const MASS_DOMAIN: FieldDomain = FieldDomain::above(0.0, 1e6);
    pub const SPRING_CONSTANT_DOMAIN: FieldDomain = FieldDomain::above(0.0, 1e6);
    pub const STRETCH_DOMAIN: FieldDomain = FieldDomain::inclusive(0.0, 1e6);

    pub const DEFAULT_MASS: f64 = 1.0;
    pub const DEFAULT_SPRING_CONSTANT: f64 = 10.0;
    pub const DEFAULT_STRETCH: f64 = 0.0;

    /// Screen-space span the bob may sweep, measured from the support
    pub const OSCILLATION_LENGTH: Interval = Interval::new(50.0, 500.0);
}

/// Constants of the mass-on-spring oscillator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub gravity: f64,
    pub air_friction_coeff: f64,
    /// Unloaded spring length, screen units
    pub compressed_length: f64,
    /// The bob centre never rises closer than this to the support
    pub bob_radius: f64,
    pub oscillation_length: Interval,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            air_friction_coeff: 0.1,
            compressed_length: 200.0,
            bob_radius: 20.0,
            oscillation_length: spring::OSCILLATION_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_bounds() {
        let d = FieldDomain::above(0.0, 1.0);
        assert!(!d.contains(0.0));
        assert!(d.contains(1e-12));
        assert!(d.contains(1.0));
        assert!(!d.contains(1.0 + 1e-9));

        let d = FieldDomain::inclusive(-90.0, 90.0);
        assert!(d.contains(-90.0));
        assert!(d.contains(90.0));
    }

    #[test]
    fn test_domain_rejects_non_finite() {
        let d = FieldDomain::inclusive(f64::MIN, f64::MAX);
        assert!(!d.contains(f64::NAN));
        assert!(!d.contains(f64::INFINITY));
        assert!(!d.contains(f64::NEG_INFINITY));
    }

    #[test]
    fn test_fixed_step_matches_tick() {
        assert_eq!(TICK_INTERVAL.as_secs_f64(), DT);
    }
}
