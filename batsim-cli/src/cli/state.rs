use std::path::PathBuf;

use clap::Parser;

use crate::{
    core::{Engine, SimulationConfig},
    prelude::*,
    store::StateFile,
};

#[must_use]
#[derive(Parser)]
pub struct StateArgs {
    /// JSON file to resume the simulation from and to save it into.
    #[clap(long = "state-file", env = "STATE_FILE")]
    pub path: Option<PathBuf>,

    /// State of charge of a fresh battery, in percent.
    #[clap(long = "initial-soc-percent", env = "INITIAL_SOC_PERCENT", default_value = "50")]
    pub initial_state_of_charge: f64,
}

impl StateArgs {
    pub fn file(&self) -> Option<StateFile> {
        self.path.clone().map(StateFile::new)
    }

    /// Resume from the state file, or start a fresh battery.
    pub fn load_engine(&self, config: SimulationConfig) -> Result<Engine> {
        if let Some(state) = self.file().and_then(|file| file.read()) {
            info!(n_steps = state.n_steps, phase = ?state.phase(), "resuming");
            return Ok(Engine::restore(config, state)?);
        }
        info!(initial_state_of_charge = self.initial_state_of_charge, "starting a fresh battery");
        Ok(Engine::fresh(config, self.initial_state_of_charge / 100.0)?)
    }
}
