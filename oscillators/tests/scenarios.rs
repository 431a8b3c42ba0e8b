//! End-to-end runs of both oscillators through the animation controller.

use oscillators::energy::pendulum::PeriodBranch;
use oscillators::{
    AnimationController, AnimationState, MathPendulumModel, PendulumField, SpringField,
    SpringOscillatorModel,
};
use std::f64::consts::TAU;

fn pendulum(length: f64, angle: f64, mass: f64) -> AnimationController<MathPendulumModel> {
    let mut c = AnimationController::new(MathPendulumModel::new());
    c.set_parameter(PendulumField::Length, length).unwrap();
    c.set_parameter(PendulumField::Angle, angle).unwrap();
    c.set_parameter(PendulumField::Mass, mass).unwrap();
    c
}

fn spring(mass: f64, k: f64, stretch: f64) -> AnimationController<SpringOscillatorModel> {
    let mut c = AnimationController::new(SpringOscillatorModel::new());
    c.set_parameter(SpringField::Mass, mass).unwrap();
    c.set_parameter(SpringField::SpringConstant, k).unwrap();
    c.set_parameter(SpringField::MaxStretch, stretch).unwrap();
    c
}

#[test]
fn small_angle_pendulum_period() {
    let mut c = pendulum(10.0, 15.0, 1.0);
    assert_eq!(c.start(), Ok(AnimationState::Running));

    let period = c.initial_period().unwrap();
    assert!((period - TAU * (10.0f64 / 9.81).sqrt()).abs() < 1e-9);
    assert!((period - 6.34).abs() < 0.01);
    assert_eq!(c.reference().unwrap().branch, PeriodBranch::SmallAngle);
}

#[test]
fn large_angle_pendulum_uses_series() {
    let mut c = pendulum(10.0, 45.0, 1.0);
    c.start().unwrap();
    assert_eq!(c.reference().unwrap().branch, PeriodBranch::SeriesCorrection);
    assert!(c.initial_period().unwrap() > 6.3437);
}

#[test]
fn threshold_angle_uses_small_angle_formula() {
    let mut c = pendulum(10.0, 20.0, 1.0);
    c.start().unwrap();
    assert_eq!(c.reference().unwrap().branch, PeriodBranch::SmallAngle);

    let mut c = pendulum(10.0, -20.5, 1.0);
    c.start().unwrap();
    assert_eq!(c.reference().unwrap().branch, PeriodBranch::SeriesCorrection);
}

#[test]
fn spring_scenario_period_and_equilibrium() {
    let mut c = spring(1.0, 10.0, 50.0);
    let snap = c.snapshot();
    assert!((snap.equilibrium_length - (200.0 + 0.981)).abs() < 1e-9);

    assert_eq!(c.start(), Ok(AnimationState::Running));
    assert!((c.initial_period().unwrap() - TAU * 0.1f64.sqrt()).abs() < 1e-9);
    assert!((c.snapshot().period - 1.987).abs() < 1e-3);
}

#[test]
fn oversized_stretch_disables_spring() {
    let mut c = spring(1.0, 10.0, 600.0);
    assert_eq!(c.start(), Ok(AnimationState::Disabled));

    let before = *c.model().state();
    for _ in 0..100 {
        assert!(c.tick().is_none());
    }
    assert_eq!(*c.model().state(), before);

    let snap = c.snapshot();
    assert_eq!(snap.kinetic_energy, 0.0);
    assert_eq!(snap.velocity, 0.0);
    assert!(!snap.oscillations_enabled);
    // Static quantities are still reported
    assert_eq!(snap.amplitude, 600.0);
    assert!(snap.potential_energy > 0.0);
    assert!(c.initial_period().is_some());
}

#[test]
fn long_pendulum_disables() {
    let mut c = pendulum(150.0, 30.0, 1.0);
    assert_eq!(c.start(), Ok(AnimationState::Disabled));

    let snap = c.snapshot();
    assert_eq!(snap.kinetic_energy, 0.0);
    assert_eq!(snap.velocity, 0.0);
    assert_eq!(snap.angle_deg, 30.0);
    assert_eq!(snap.display_length, 50.0);
    assert!(snap.period.is_some());
    assert!(snap.amplitude.is_some());

    c.pause();
    assert_eq!(c.state(), AnimationState::Disabled);
    c.reset();
    assert_eq!(c.state(), AnimationState::Idle);
}

#[test]
fn reference_energy_constant_for_whole_run() {
    let mut c = pendulum(5.0, 40.0, 2.0);
    c.start().unwrap();
    let energy = c.total_mechanical_energy().unwrap();

    for i in 0..500 {
        let snap = c.tick().unwrap();
        assert_eq!(snap.total_mechanical_energy, Some(energy));
        if i == 250 {
            c.pause();
            c.pause();
        }
    }
}

#[test]
fn undamped_pendulum_roughly_conserves_energy() {
    let mut c = pendulum(10.0, 30.0, 1.0);
    c.start().unwrap();
    let reference = c.total_mechanical_energy().unwrap();

    for _ in 0..1000 {
        let snap = c.tick().unwrap();
        let live = snap.kinetic_energy + snap.potential_energy;
        assert!((live - reference).abs() / reference < 0.05, "drifted to {live}");
    }
}

#[test]
fn friction_bleeds_spring_energy() {
    let mut c = spring(1.0, 10.0, 50.0);
    c.set_air_friction(true).unwrap();
    c.start().unwrap();
    let reference = c.total_mechanical_energy().unwrap();

    let mut last = None;
    for _ in 0..3000 {
        last = c.tick();
    }
    let snap = last.unwrap();
    assert!(snap.kinetic_energy + snap.potential_energy < 0.5 * reference);
}

#[test]
fn reset_is_idempotent() {
    let mut once = pendulum(20.0, 45.0, 3.0);
    once.start().unwrap();
    for _ in 0..20 {
        once.tick();
    }
    once.reset();
    let first = (once.state(), once.model().clone(), once.reference().copied());

    once.reset();
    let second = (once.state(), once.model().clone(), once.reference().copied());
    assert_eq!(first, second);
    assert_eq!(first.1, MathPendulumModel::new());
}

#[test]
fn spring_reset_restores_defaults() {
    let mut c = spring(4.0, 30.0, 40.0);
    c.start().unwrap();
    c.tick();
    c.reset();

    let params = c.model().params();
    assert_eq!(params.mass, 1.0);
    assert_eq!(params.spring_constant, 10.0);
    assert_eq!(params.max_stretch, 0.0);
    assert!(!params.air_friction_enabled);
    assert_eq!(c.model().state().position, 0.0);
    assert!(c.total_mechanical_energy().is_none());
}
