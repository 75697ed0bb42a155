//! Random input sequence sampling.
//!
//! Despite the name this does not enumerate anything: each sequence is an
//! independent random composition of the frame budget. Duplicates are
//! allowed and expected for small budgets.

use rand::Rng;

use crate::config::Axis;
use crate::inputs::{InputSequence, InputSymbol, Run};

/// Draw run lengths uniformly from what is left of `frames` until it is used
/// up, each run getting a uniformly chosen symbol from `alphabet`.
pub fn random_sequence<R: Rng + ?Sized>(
    rng: &mut R,
    alphabet: &[InputSymbol],
    frames: u32,
) -> InputSequence {
    let mut runs = Vec::new();
    let mut used = 0u32;
    while used < frames {
        let length = rng.random_range(1..=frames - used);
        let symbol = alphabet[rng.random_range(0..alphabet.len())];
        used += length;
        runs.push(Run::new(length, symbol));
    }
    InputSequence::new(runs)
}

pub fn generate_sequences<R: Rng + ?Sized>(
    rng: &mut R,
    axis: Axis,
    frames: u32,
    count: u32,
) -> Vec<InputSequence> {
    let alphabet = axis.alphabet();
    (0..count)
        .map(|_| random_sequence(rng, &alphabet, frames))
        .collect()
}
