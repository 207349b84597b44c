use clap::Parser;

use crate::{
    cli::{simulation::SimulationArgs, state::StateArgs},
    prelude::*,
    tables::{build_battery_table, build_summary_table},
};

#[derive(Parser)]
pub struct ShowArgs {
    #[clap(flatten)]
    simulation: SimulationArgs,

    #[clap(flatten)]
    state: StateArgs,
}

impl ShowArgs {
    pub fn run(self) -> Result {
        ensure!(self.state.path.is_some(), "`--state-file` is required to show the state");
        let engine = self.state.load_engine(self.simulation.config()?)?;
        info!(
            n_steps = engine.state().n_steps,
            phase = ?engine.phase(),
            capacity = %engine.config().battery.capacity,
            dynamic_tariff = %engine.state().dynamic_tariff.current(),
            "loaded",
        );
        let outputs = engine.outputs();
        println!("{}", build_battery_table(&outputs));
        println!("{}", build_summary_table(&outputs));
        Ok(())
    }
}
