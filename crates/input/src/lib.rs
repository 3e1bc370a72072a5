//! Device-independent pilot input.
//!
//! The host maps whatever devices it has onto [`ControlInput`] once per frame. Axes are
//! continuous; fire and camera toggle are edges (true only on the frame they were pressed).

/// Continuous flight axes, each nominally in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlAxes {
    pub throttle: f32,
    /// Positive raises the nose.
    pub pitch: f32,
    /// Positive lifts the left wing.
    pub roll: f32,
    /// Positive swings the nose toward the left wing.
    pub yaw: f32,
}

impl ControlAxes {
    pub fn new(throttle: f32, pitch: f32, roll: f32, yaw: f32) -> Self {
        Self {
            throttle,
            pitch,
            roll,
            yaw,
        }
    }
}

/// Everything the simulation reads from the pilot for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInput {
    pub axes: ControlAxes,
    /// Held: raises throttle authority and the speed ceiling.
    pub boost: bool,
    /// Edge: fire one round this frame.
    pub fire_pressed: bool,
    /// Edge: switch between chase and cockpit view.
    pub camera_toggle_pressed: bool,
}

impl ControlInput {
    /// Drop the edge-triggered buttons once a frame has consumed them.
    pub fn consume_edges(&mut self) {
        self.fire_pressed = false;
        self.camera_toggle_pressed = false;
    }
}

/// Turns a held button into a press edge.
///
/// Hosts that only know "is this button down right now" feed [`ButtonLatch::update`] once
/// per frame and get `true` only on the frame the button went down.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonLatch {
    held: bool,
}

impl ButtonLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current held state; returns true on the press edge.
    pub fn update(&mut self, held: bool) -> bool {
        let pressed = held && !self.held;
        self.held = held;
        if pressed {
            log::trace!("button press edge");
        }
        pressed
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}
