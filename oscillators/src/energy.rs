//! Energy and kinematics derived from state and parameters
//!
//! Pure functions only. Every quantity here is recomputed on demand and never
//! stored alongside the state.

use std::f64::consts::{PI, TAU};

/// Pendulum energy model.
///
/// Lengths are the physics length (`length_for_calculations`), never the
/// clamped display length.
pub mod pendulum {
    use super::*;
    use crate::config::pendulum::SMALL_ANGLE_THRESHOLD_DEG;
    use crate::params::PendulumParams;
    use crate::state::PendulumState;

    /// Which period formula a run uses, decided once at start
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum PeriodBranch {
        /// `T = 2π·√(L/g)`
        SmallAngle,
        /// `T = 2π·√(L/g)·(1 + θ₀²/16 + 11θ₀⁴/3072)`
        SeriesCorrection,
    }

    impl PeriodBranch {
        pub fn for_angle(angle_deg: f64) -> Self {
            if angle_deg.abs() <= SMALL_ANGLE_THRESHOLD_DEG {
                Self::SmallAngle
            } else {
                Self::SeriesCorrection
            }
        }
    }

    /// Rise of the bob above its lowest point: `h = L·(1 − cos θ)`
    pub fn height(params: &PendulumParams, state: &PendulumState) -> f64 {
        params.length_for_calculations * (1.0 - state.angle_deg.to_radians().cos())
    }

    /// `½·m·(ω·L)²` with ω converted to rad/s
    pub fn kinetic_energy(params: &PendulumParams, state: &PendulumState) -> f64 {
        let omega = state.angular_velocity_deg.to_radians();
        let linear = omega * params.length_for_calculations;
        0.5 * params.mass * linear * linear
    }

    pub fn potential_energy(params: &PendulumParams, state: &PendulumState) -> f64 {
        params.mass * params.config.gravity * height(params, state)
    }

    /// Bob speed recovered from kinetic energy: `√(2·Eₖ/m)`
    pub fn velocity(params: &PendulumParams, state: &PendulumState) -> f64 {
        (2.0 * kinetic_energy(params, state) / params.mass).sqrt()
    }

    /// Horizontal reach of the swing: `L·sin|θ₀|`
    pub fn amplitude(params: &PendulumParams, initial_angle_deg: f64) -> f64 {
        params.length_for_calculations * initial_angle_deg.abs().to_radians().sin()
    }

    pub fn period(params: &PendulumParams, initial_angle_deg: f64, branch: PeriodBranch) -> f64 {
        let base = TAU * (params.length_for_calculations / params.config.gravity).sqrt();
        match branch {
            PeriodBranch::SmallAngle => base,
            PeriodBranch::SeriesCorrection => {
                let theta0 = initial_angle_deg.abs() * PI / 180.0;
                let theta0_sq = theta0 * theta0;
                base * (1.0 + theta0_sq / 16.0 + 11.0 / 3072.0 * theta0_sq * theta0_sq)
            }
        }
    }
}

/// Spring energy model
pub mod spring {
    use super::*;
    use crate::params::SpringParams;
    use crate::state::SpringState;

    /// Elastic energy stored relative to equilibrium: `½·k·x²`
    pub fn potential_energy(params: &SpringParams, state: &SpringState) -> f64 {
        0.5 * params.spring_constant * state.position * state.position
    }

    pub fn kinetic_energy(params: &SpringParams, state: &SpringState) -> f64 {
        0.5 * params.mass * state.velocity * state.velocity
    }

    pub fn velocity(state: &SpringState) -> f64 {
        state.velocity.abs()
    }

    pub fn displacement(state: &SpringState) -> f64 {
        state.position.abs()
    }

    /// The requested stretch, not the live excursion
    pub fn amplitude(params: &SpringParams) -> f64 {
        params.max_stretch
    }

    /// `T = 2π·√(m/k)`
    pub fn period(params: &SpringParams) -> f64 {
        TAU * (params.mass / params.spring_constant).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::pendulum::PeriodBranch;
    use super::*;
    use crate::params::{PendulumField, PendulumParams, SpringField, SpringParams};
    use crate::state::{PendulumState, SpringState};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_pendulum_height_and_potential() {
        let p = PendulumParams::default();
        let s = PendulumState::at_rest(60.0);
        // cos 60° = 0.5
        assert!((pendulum::height(&p, &s) - 5.0).abs() < EPS);
        assert!((pendulum::potential_energy(&p, &s) - 9.81 * 5.0).abs() < EPS);

        let s = PendulumState::at_rest(0.0);
        assert_eq!(pendulum::height(&p, &s), 0.0);
    }

    #[test]
    fn test_pendulum_kinetic_uses_radians() {
        let p = PendulumParams::default();
        let s = PendulumState {
            angle_deg: 0.0,
            angular_velocity_deg: 180.0 / PI, // 1 rad/s
        };
        // v = ω·L = 10 m/s
        assert!((pendulum::kinetic_energy(&p, &s) - 50.0).abs() < EPS);
        assert!((pendulum::velocity(&p, &s) - 10.0).abs() < EPS);
    }

    #[test]
    fn test_pendulum_amplitude_uses_magnitude() {
        let p = PendulumParams::default();
        assert!((pendulum::amplitude(&p, -30.0) - 5.0).abs() < EPS);
        assert!((pendulum::amplitude(&p, 30.0) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_period_branch_boundary() {
        assert_eq!(PeriodBranch::for_angle(20.0), PeriodBranch::SmallAngle);
        assert_eq!(PeriodBranch::for_angle(-20.0), PeriodBranch::SmallAngle);
        assert_eq!(PeriodBranch::for_angle(20.0001), PeriodBranch::SeriesCorrection);

        let p = PendulumParams::default();
        let small = pendulum::period(&p, 20.0, PeriodBranch::SmallAngle);
        let series = pendulum::period(&p, 20.0, PeriodBranch::SeriesCorrection);
        assert!(series > small);
        // The correction is under 3% at the threshold
        assert!(series / small < 1.03);
    }

    #[test]
    fn test_pendulum_periods() {
        let mut p = PendulumParams::default();
        let small = pendulum::period(&p, 15.0, PeriodBranch::SmallAngle);
        assert!((small - TAU * (10.0f64 / 9.81).sqrt()).abs() < EPS);
        assert!((small - 6.34).abs() < 0.01);

        let large = pendulum::period(&p, 45.0, PeriodBranch::SeriesCorrection);
        let theta = PI / 4.0;
        let expected = small * (1.0 + theta.powi(2) / 16.0 + 11.0 * theta.powi(4) / 3072.0);
        assert!((large - expected).abs() < EPS);

        p.set(PendulumField::Length, 40.0).unwrap();
        let longer = pendulum::period(&p, 15.0, PeriodBranch::SmallAngle);
        assert!((longer / small - 2.0).abs() < EPS);
    }

    #[test]
    fn test_spring_formulas() {
        let mut p = SpringParams::default();
        p.set(SpringField::MaxStretch, 50.0).unwrap();
        let s = SpringState {
            position: -2.0,
            velocity: -3.0,
        };
        assert!((spring::potential_energy(&p, &s) - 20.0).abs() < EPS);
        assert!((spring::kinetic_energy(&p, &s) - 4.5).abs() < EPS);
        assert_eq!(spring::velocity(&s), 3.0);
        assert_eq!(spring::displacement(&s), 2.0);
        assert_eq!(spring::amplitude(&p), 50.0);
        assert!((spring::period(&p) - 1.987).abs() < 1e-3);
    }
}
