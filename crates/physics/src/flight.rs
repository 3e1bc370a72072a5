//! Flight dynamics: scalar-speed arcade model.
//!
//! An aircraft carries a pose and a single forward speed. Each step bleeds or gains speed
//! with nose attitude, applies throttle and quadratic drag, checks for a stall, clamps,
//! rotates from control input, then translates along the updated nose.

use engine_core::{Transform, Vec3};
use serde::{Deserialize, Serialize};

/// Tuning for the full flight model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightParams {
    /// Speed lost per second per unit of nose-up (gained when diving).
    pub gravity_coupling: f32,
    /// Speed gained per second at full throttle.
    pub throttle_accel: f32,
    /// Throttle acceleration while boost is held.
    pub boost_accel: f32,
    /// Quadratic drag coefficient.
    pub drag: f32,
    /// Below this speed the aircraft stalls.
    pub stall_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Speed ceiling while boost is held.
    pub boost_max_speed: f32,
    /// Radians per second at full deflection.
    pub pitch_rate: f32,
    pub roll_rate: f32,
    pub yaw_rate: f32,
    /// Nose-down rate forced while stalling.
    pub stall_pitch_rate: f32,
    /// World units travelled per second per unit of speed.
    pub distance_scale: f32,
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            gravity_coupling: 0.6,
            throttle_accel: 0.8,
            boost_accel: 1.6,
            drag: 0.02,
            stall_speed: 0.45,
            min_speed: 0.0,
            max_speed: 3.0,
            boost_max_speed: 4.5,
            pitch_rate: 1.2,
            roll_rate: 2.0,
            yaw_rate: 0.6,
            stall_pitch_rate: 0.9,
            distance_scale: 100.0,
        }
    }
}

impl FlightParams {
    /// Speed ceiling for this frame.
    pub fn current_max_speed(&self, boost: bool) -> f32 {
        if boost {
            self.boost_max_speed
        } else {
            self.max_speed
        }
    }
}

/// Pilot (or autopilot) deflections, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightControls {
    pub throttle: f32,
    /// Positive raises the nose.
    pub pitch: f32,
    /// Positive lifts the left wing.
    pub roll: f32,
    /// Positive swings the nose toward the left wing.
    pub yaw: f32,
    pub boost: bool,
}

impl FlightControls {
    /// Same controls with every axis clamped to `[-1, 1]`; non-finite axes read as zero.
    pub fn clamped(&self) -> Self {
        fn axis(v: f32) -> f32 {
            if v.is_finite() {
                v.clamp(-1.0, 1.0)
            } else {
                0.0
            }
        }
        Self {
            throttle: axis(self.throttle),
            pitch: axis(self.pitch),
            roll: axis(self.roll),
            yaw: axis(self.yaw),
            boost: self.boost,
        }
    }
}

/// Kinematic state integrated by the flight model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    pub transform: Transform,
    pub speed: f32,
    pub stalling: bool,
}

impl FlightState {
    pub fn new(transform: Transform, speed: f32) -> Self {
        Self {
            transform,
            speed,
            stalling: false,
        }
    }

    /// Vertical component of the scalar speed (positive climbing).
    pub fn vertical_speed(&self) -> f32 {
        self.speed * self.transform.forward().y
    }
}

/// Quadratic drag that always opposes motion and never reverses it.
pub fn apply_drag(speed: f32, coefficient: f32, dt: f32) -> f32 {
    let drag = coefficient * speed * speed.abs() * dt;
    if drag.abs() >= speed.abs() {
        0.0
    } else {
        speed - drag
    }
}

/// Advance `state` by one step of the full model. Returns the translation applied.
pub fn step(state: &mut FlightState, controls: &FlightControls, params: &FlightParams, dt: f32) -> Vec3 {
    let controls = controls.clamped();
    let forward_y = state.transform.forward().y;

    let mut speed = if state.speed.is_finite() {
        state.speed
    } else {
        params.min_speed
    };
    speed -= forward_y * params.gravity_coupling * dt;

    let accel = if controls.boost {
        params.boost_accel
    } else {
        params.throttle_accel
    };
    speed += controls.throttle * accel * dt;
    speed = apply_drag(speed, params.drag, dt);

    state.stalling = speed < params.stall_speed;

    state.speed = speed.clamp(params.min_speed, params.current_max_speed(controls.boost));

    state.transform.roll_local(controls.roll * params.roll_rate * dt);
    if state.stalling {
        state.transform.pitch_local(-params.stall_pitch_rate * dt);
    } else {
        state.transform.pitch_local(controls.pitch * params.pitch_rate * dt);
    }
    state.transform.yaw_local(controls.yaw * params.yaw_rate * dt);

    let translation = state.transform.forward() * state.speed * params.distance_scale * dt;
    state.transform.translate(translation);
    translation
}

/// Reduced model used by AI pilots: gravity coupling and a speed band only.
///
/// Orientation is left to the caller. Returns the translation applied.
pub fn step_gliding(
    state: &mut FlightState,
    gravity_coupling: f32,
    speed_band: (f32, f32),
    distance_scale: f32,
    dt: f32,
) -> Vec3 {
    let (min, max) = speed_band;
    let speed = if state.speed.is_finite() { state.speed } else { min };
    let speed = speed - state.transform.forward().y * gravity_coupling * dt;
    state.speed = speed.clamp(min, max);
    state.stalling = false;

    let translation = state.transform.forward() * state.speed * distance_scale * dt;
    state.transform.translate(translation);
    translation
}
