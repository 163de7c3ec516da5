//! Settings shared by the command-line front end and the simulator.

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::error::BestOfAssertion;
use crate::sim::Simulator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub best_of: u8,
    pub simulation: SimulationOptions,
}

impl Config {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        BestOfAssertion::check(self.best_of)?;
        self.simulation.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            best_of: 3,
            simulation: SimulationOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOptions {
    pub trials: u64,
    pub seed: u64,
}

impl SimulationOptions {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        const MIN_TRIALS: u64 = 1_000;
        if self.trials < MIN_TRIALS {
            bail!("number of simulation trials cannot be fewer than {MIN_TRIALS}");
        }
        Ok(())
    }

    pub fn simulator(&self) -> Simulator {
        Simulator::default()
            .with_trials(self.trials)
            .with_seed(self.seed)
    }
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            trials: 100_000,
            seed: 42,
        }
    }
}
