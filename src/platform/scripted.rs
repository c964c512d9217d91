//! Replayable input source

use std::collections::VecDeque;

use glam::DVec2;

use super::InputSource;
use crate::sim::TickInput;

/// Replays a fixed sequence of inputs, then requests close
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            queue: inputs.into_iter().collect(),
        }
    }

    /// One full clockwise sweep around `center` with the button held, then a release
    pub fn sweep(center: DVec2, reach: f64, ticks: u32) -> Self {
        let ticks = ticks.max(1);
        let mut inputs: Vec<TickInput> = (0..ticks)
            .map(|i| {
                let theta = std::f64::consts::FRAC_PI_2
                    - std::f64::consts::TAU * f64::from(i) / f64::from(ticks);
                TickInput {
                    pointer: center + DVec2::new(theta.cos(), theta.sin()) * reach,
                    primary_pressed: true,
                    close_requested: false,
                }
            })
            .collect();
        if let Some(last) = inputs.last().copied() {
            inputs.push(TickInput {
                primary_pressed: false,
                ..last
            });
        }
        Self::new(inputs)
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        self.queue.pop_front().unwrap_or(TickInput {
            close_requested: true,
            ..Default::default()
        })
    }
}
