//! Fixed-step semi-implicit Euler integrator
//!
//! Velocity is updated first and the new velocity moves the position, which
//! keeps the undamped oscillators from spiralling outward the way explicit
//! Euler does.

use crate::config::{pendulum::ANGLE_LIMIT_DEG, DT};
use crate::params::{PendulumParams, SpringParams};
use crate::state::{PendulumState, SpringState};

/// Angular acceleration in deg/s² for the current swing
pub fn pendulum_acceleration(params: &PendulumParams, state: &PendulumState) -> f64 {
    let g = params.config.gravity;
    let mut alpha =
        -(g / params.length_for_calculations) * state.angle_deg.to_radians().sin() * (180.0 / std::f64::consts::PI);
    if params.air_friction_enabled {
        alpha -= params.config.air_friction_coeff * state.angular_velocity_deg;
    }
    alpha
}

/// Advance the pendulum by one tick.
///
/// The angle is hard-limited to ±90°. Hitting the limiter does not touch the
/// angular velocity.
pub fn step_pendulum(params: &PendulumParams, state: &mut PendulumState) {
    let alpha = pendulum_acceleration(params, state);
    state.angular_velocity_deg += alpha * DT;
    state.angle_deg += state.angular_velocity_deg * DT;
    state.angle_deg = state.angle_deg.clamp(-ANGLE_LIMIT_DEG, ANGLE_LIMIT_DEG);
}

/// Force on the spring bob relative to equilibrium (gravity is absorbed into
/// the equilibrium length)
pub fn spring_force(params: &SpringParams, state: &SpringState) -> f64 {
    let mut force = -params.spring_constant * state.position;
    if params.air_friction_enabled {
        force -= params.config.air_friction_coeff * state.velocity;
    }
    force
}

/// Lowest allowed `position`: the bob centre sits `bob_radius` below the
/// support.
pub fn spring_floor(params: &SpringParams) -> f64 {
    params.config.bob_radius - params.equilibrium_length()
}

/// Advance the spring by one tick.
///
/// Returns `true` when the floor clamp fired; the clamp zeroes velocity.
pub fn step_spring(params: &SpringParams, state: &mut SpringState) -> bool {
    let acceleration = spring_force(params, state) / params.mass;
    state.velocity += acceleration * DT;
    state.position += state.velocity * DT;

    let floor = spring_floor(params);
    if state.position < floor {
        state.position = floor;
        state.velocity = 0.0;
        return true;
    }
    false
}
