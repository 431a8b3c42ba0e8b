//! Play / pause / reset state machine shared by both oscillators
//!
//! ```text
//!            start (safe)            pause
//!   Idle ───────────────► Running ◄────────► Paused
//!    │                       ▲      pause/start
//!    │ start (unsafe)        │
//!    ▼                       │
//!  Disabled                  │
//!    └──── reset ──► Idle ◄──┴── reset (from any state)
//! ```
//!
//! The controller owns the model and the tick clock. All mutation happens
//! through `&mut self`, so a tick always completes before the next parameter
//! write can be applied.

use std::time::Duration;

use log::{debug, info, trace, warn};

use crate::config::TICK_INTERVAL;
use crate::error::{StartError, ValidationError};
use crate::model::{Motion, OscillatorModel, ReferenceValues};

/// Upper bound on ticks replayed after a long frame
pub const MAX_CATCH_UP_TICKS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running,
    Paused,
    /// Started outside the safety envelope. Only `reset` leaves this state.
    Disabled,
}

impl AnimationState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
            Self::Disabled => "DISABLED",
        }
    }
}

/// Turns elapsed wall-clock time into whole fixed-length ticks.
///
/// Each tick still applies exactly `DT` of simulated motion; the clock only
/// decides how many ticks a frame owes.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    interval: Duration,
    accumulated: Duration,
    active: bool,
    max_catch_up: u32,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            active: false,
            max_catch_up: MAX_CATCH_UP_TICKS,
        }
    }

    pub fn start(&mut self) {
        self.active = true;
        self.accumulated = Duration::ZERO;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.accumulated = Duration::ZERO;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks due after `elapsed` more wall-clock time
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.active || self.interval.is_zero() {
            return 0;
        }

        self.accumulated += elapsed;
        let due = self.accumulated.as_nanos() / self.interval.as_nanos();
        if due > u128::from(self.max_catch_up) {
            // Too far behind; drop the backlog instead of fast-forwarding
            self.accumulated = Duration::ZERO;
            return self.max_catch_up;
        }

        let due = due as u32;
        self.accumulated -= self.interval * due;
        due
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

pub struct AnimationController<M: OscillatorModel> {
    model: M,
    state: AnimationState,
    reference: Option<M::Reference>,
    clock: FrameClock,
}

impl<M: OscillatorModel> AnimationController<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            state: AnimationState::Idle,
            reference: None,
            clock: FrameClock::default(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_ticking(&self) -> bool {
        self.clock.is_active()
    }

    /// Inputs stay locked from `start()` until `reset()`.
    pub fn requires_input_lock(&self) -> bool {
        self.state != AnimationState::Idle
    }

    pub fn oscillations_enabled(&self) -> bool {
        self.state != AnimationState::Disabled
    }

    pub fn reference(&self) -> Option<&M::Reference> {
        self.reference.as_ref()
    }

    pub fn initial_period(&self) -> Option<f64> {
        self.reference.as_ref().map(|r| r.period())
    }

    pub fn total_mechanical_energy(&self) -> Option<f64> {
        self.reference.as_ref().map(|r| r.mechanical_energy())
    }

    fn unlocked(&self, field: M::Field) -> Result<(), ValidationError> {
        if self.requires_input_lock() {
            return Err(ValidationError::InputLocked {
                field: M::field_name(field),
            });
        }
        Ok(())
    }

    pub fn set_parameter(&mut self, field: M::Field, value: f64) -> Result<(), ValidationError> {
        self.unlocked(field)?;
        let result = self.model.set_parameter(field, value);
        if let Err(err) = &result {
            debug!("{} rejected {value}: {err}", self.model.name());
        }
        result
    }

    pub fn reset_parameter(&mut self, field: M::Field) -> Result<(), ValidationError> {
        self.unlocked(field)?;
        self.model.reset_parameter(field);
        Ok(())
    }

    pub fn set_air_friction(&mut self, enabled: bool) -> Result<(), ValidationError> {
        if self.requires_input_lock() {
            return Err(ValidationError::InputLocked {
                field: "air friction",
            });
        }
        self.model.set_air_friction(enabled);
        Ok(())
    }

    /// Release the oscillator.
    ///
    /// From Idle this validates the envelope: a safe start captures the
    /// reference values and begins ticking, an unsafe one freezes the model
    /// and lands in Disabled. From Paused it resumes. Running and Disabled
    /// are left untouched.
    pub fn start(&mut self) -> Result<AnimationState, StartError> {
        match self.state {
            AnimationState::Running | AnimationState::Disabled => {}
            AnimationState::Paused => self.resume(),
            AnimationState::Idle => {
                self.model.check_startable()?;

                if self.model.is_safe() {
                    self.reference = Some(self.model.capture_reference());
                    self.state = AnimationState::Running;
                    self.clock.start();
                    info!(
                        "{} started: period {:.5}, reference energy {:.5}",
                        self.model.name(),
                        self.initial_period().unwrap_or_default(),
                        self.total_mechanical_energy().unwrap_or_default()
                    );
                } else {
                    self.model.freeze();
                    self.reference = Some(self.model.capture_reference());
                    self.state = AnimationState::Disabled;
                    self.clock.stop();
                    warn!(
                        "{} parameters are outside the safe oscillation range, oscillations disabled",
                        self.model.name()
                    );
                }
            }
        }
        Ok(self.state)
    }

    fn resume(&mut self) {
        self.state = AnimationState::Running;
        self.clock.start();
        info!("{} resumed", self.model.name());
    }

    /// Toggle between Running and Paused; other states ignore it.
    pub fn pause(&mut self) {
        match self.state {
            AnimationState::Running => {
                self.state = AnimationState::Paused;
                self.clock.stop();
                info!("{} paused", self.model.name());
            }
            AnimationState::Paused => self.resume(),
            AnimationState::Idle | AnimationState::Disabled => {}
        }
    }

    /// Back to Idle with default parameters, a state at rest and no
    /// reference values.
    pub fn reset(&mut self) {
        self.clock.stop();
        self.model.reset();
        self.reference = None;
        self.state = AnimationState::Idle;
        info!("{} reset", self.model.name());
    }

    /// One fixed step. Only Running integrates; every other state is a no-op
    /// and returns `None`.
    pub fn tick(&mut self) -> Option<M::Snapshot> {
        if self.state != AnimationState::Running {
            return None;
        }
        self.model.step();
        trace!("{} tick", self.model.name());
        Some(self.snapshot())
    }

    /// Run the ticks owed for `elapsed` wall-clock time. Returns how many ran.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self.clock.advance(elapsed);
        let mut ran = 0;
        for _ in 0..due {
            if self.tick().is_some() {
                ran += 1;
            }
        }
        ran
    }

    pub fn snapshot(&self) -> M::Snapshot {
        let motion = if self.oscillations_enabled() {
            Motion::Live
        } else {
            Motion::Frozen
        };
        self.model.snapshot(self.reference.as_ref(), motion)
    }
}
