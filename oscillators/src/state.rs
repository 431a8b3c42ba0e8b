//! Mutable simulation state, owned by a model and only changed by its `step`

/// Swing of the pendulum, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendulumState {
    pub angle_deg: f64,
    pub angular_velocity_deg: f64,
}

impl PendulumState {
    pub fn at_rest(angle_deg: f64) -> Self {
        Self {
            angle_deg,
            angular_velocity_deg: 0.0,
        }
    }
}

/// Spring bob relative to equilibrium; positive is downward (spring longer)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpringState {
    pub position: f64,
    pub velocity: f64,
}

impl SpringState {
    pub fn at_rest(position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }
}
