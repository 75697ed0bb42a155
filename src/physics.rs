//! Per-frame movement model, loosely following the player's normal-state
//! update. Velocity is updated before position on every frame.
//!
//! Units are pixels and pixels/second; one step is one frame at 60 fps.

use crate::config::SimConfig;
use crate::inputs::InputSymbol;

pub const FRAME_RATE: f64 = 60.0;

/// Fractional digits kept on final results.
pub const RESULT_DECIMALS: i32 = 10;

// Horizontal.
const MAX_RUN: f64 = 90.0;
const MAX_RUN_HOLDING_SLOW: f64 = 70.0;
const RUN_ACCEL: f64 = 1000.0;
const RUN_REDUCE: f64 = 400.0;
const DUCK_FRICTION: f64 = 500.0;
const AIR_MULT: f64 = 0.65;
const COLD_CORE_MULT: f64 = 0.3;

// Vertical.
pub const MAX_FALL: f64 = 160.0;
const FAST_MAX_FALL: f64 = 240.0;
const FAST_MAX_ACCEL: f64 = 300.0;
const GRAVITY: f64 = 900.0;
const HALF_GRAV_THRESHOLD: f64 = 40.0;

const SPACE_MULT: f64 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimState {
    pub position: f64,
    pub velocity: f64,
}

/// Extra state carried by the vertical axis between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalState {
    pub max_fall: f64,
    /// Frames of variable jump left. Drops to zero for good the first frame
    /// jump is released, and keeps counting down (saturating) after that.
    pub jump_timer: i32,
}

impl VerticalState {
    pub fn new(jump_timer: i32) -> Self {
        Self {
            max_fall: MAX_FALL,
            jump_timer,
        }
    }
}

/// Move `val` toward `target` by at most `max_move`, never past it.
#[inline]
pub fn approach(val: f64, target: f64, max_move: f64) -> f64 {
    if val <= target {
        (val + max_move).min(target)
    } else {
        (val - max_move).max(target)
    }
}

/// Round to [`RESULT_DECIMALS`] digits so equal outcomes compare equal.
/// Goes through the decimal text, which is correctly rounded at any
/// magnitude. Negative zero is folded into zero.
pub fn round_to_precision(value: f64) -> f64 {
    format!("{value:.prec$}", prec = RESULT_DECIMALS as usize)
        .parse::<f64>()
        .unwrap_or(value)
        + 0.0
}

#[inline]
fn sign(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        1f64.copysign(value)
    }
}

pub fn step_x(state: &mut SimState, input: InputSymbol, config: &SimConfig) {
    let move_x = input.move_x();

    if config.ducking && config.on_ground {
        state.velocity = approach(state.velocity, 0.0, DUCK_FRICTION / FRAME_RATE);
    } else {
        let mut mult = if config.on_ground { 1.0 } else { AIR_MULT };
        if config.on_ground && config.cold_core {
            mult *= COLD_CORE_MULT;
        }

        let mut max = if config.holdable_slow {
            MAX_RUN_HOLDING_SLOW
        } else {
            MAX_RUN
        };
        if config.in_space {
            max *= SPACE_MULT;
        }

        // Past max speed and still holding that way: slow down gently.
        let accel = if state.velocity.abs() <= max || sign(state.velocity) != move_x {
            RUN_ACCEL
        } else {
            RUN_REDUCE
        };
        state.velocity = approach(state.velocity, max * move_x, accel / FRAME_RATE * mult);
    }

    state.position += state.velocity / FRAME_RATE;
}

pub fn step_y(
    state: &mut SimState,
    vertical: &mut VerticalState,
    input: InputSymbol,
    config: &SimConfig,
) {
    let fast_fall = input == InputSymbol::Duck;
    let jump = input == InputSymbol::Jump;
    let jump_held = jump || config.auto_jump;

    let mut normal_max = MAX_FALL;
    let mut fast_max = FAST_MAX_FALL;
    if config.in_space {
        normal_max *= SPACE_MULT;
        fast_max *= SPACE_MULT;
    }

    let max_fall_target = if fast_fall && state.velocity >= normal_max {
        fast_max
    } else {
        normal_max
    };
    vertical.max_fall = approach(vertical.max_fall, max_fall_target, FAST_MAX_ACCEL / FRAME_RATE);

    let mut mult = if state.velocity.abs() <= HALF_GRAV_THRESHOLD && jump_held {
        0.5
    } else {
        1.0
    };
    if config.in_space {
        mult *= SPACE_MULT;
    }
    state.velocity = approach(state.velocity, vertical.max_fall, GRAVITY * mult / FRAME_RATE);

    if vertical.jump_timer > 0 {
        if jump_held {
            state.velocity = state.velocity.min(config.jump_speed);
        } else {
            vertical.jump_timer = 0;
        }
    }
    vertical.jump_timer = vertical.jump_timer.saturating_sub(1);

    state.position += state.velocity / FRAME_RATE;
}
