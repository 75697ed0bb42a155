use serde::Serialize;

use crate::config::{Axis, SimConfig};
use crate::inputs::{InputSequence, InputSymbol};
use crate::physics::{round_to_precision, step_x, step_y, SimState, VerticalState};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Outcome {
    pub position: f64,
    pub velocity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateResult {
    pub position: f64,
    pub velocity: f64,
    pub inputs: InputSequence,
}

impl CandidateResult {
    pub fn new(outcome: Outcome, inputs: InputSequence) -> Self {
        Self {
            position: outcome.position,
            velocity: outcome.velocity,
            inputs,
        }
    }

    #[inline]
    pub fn same_outcome(&self, other: &Self) -> bool {
        self.position == other.position && self.velocity == other.velocity
    }
}

/// One simulated object, starting from the configured initial state.
#[derive(Clone, Debug)]
pub struct Body<'a> {
    config: &'a SimConfig,
    state: SimState,
    vertical: VerticalState,
}

impl<'a> Body<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Self {
            config,
            state: SimState {
                position: config.pos_init,
                velocity: config.speed_init,
            },
            vertical: VerticalState::new(config.jump_timer),
        }
    }

    pub fn step(&mut self, input: InputSymbol) {
        match self.config.axis {
            Axis::X => step_x(&mut self.state, input, self.config),
            Axis::Y => step_y(&mut self.state, &mut self.vertical, input, self.config),
        }
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Final state, rounded for exact comparison.
    pub fn outcome(&self) -> Outcome {
        Outcome {
            position: round_to_precision(self.state.position),
            velocity: round_to_precision(self.state.velocity),
        }
    }
}

pub fn simulate(inputs: &InputSequence, config: &SimConfig) -> Outcome {
    let mut body = Body::new(config);
    for input in inputs.frames() {
        body.step(input);
    }
    body.outcome()
}

/// Unrounded state after every frame; `trace(..).len()` equals the frame count.
pub fn trace(inputs: &InputSequence, config: &SimConfig) -> Vec<SimState> {
    let mut body = Body::new(config);
    inputs
        .frames()
        .map(|input| {
            body.step(input);
            body.state()
        })
        .collect()
}
