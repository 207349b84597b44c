use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use chrono::{DateTime, Local};
use clap::Parser;

use crate::{
    api::domoticz::{Decoder, DeviceIndices, Message, TariffUnit},
    cli::{simulation::SimulationArgs, state::StateArgs},
    core::{Engine, Event, Observation, Outputs},
    prelude::*,
    store::StateFile,
    tables::{build_battery_table, build_steps_table, build_summary_table},
};

#[derive(Parser)]
pub struct ReplayArgs {
    /// JSON-lines capture of the Domoticz messages.
    #[clap(long, env = "CAPTURE")]
    capture: PathBuf,

    /// Meter and tariff device indices, for example `12,34`.
    #[clap(long, env = "DEVICES")]
    devices: DeviceIndices,

    #[clap(long, env = "TARIFF_UNIT", value_enum, default_value_t = TariffUnit::KilowattHour)]
    tariff_unit: TariffUnit,

    /// Also print every step.
    #[clap(long)]
    steps: bool,

    #[clap(flatten)]
    simulation: SimulationArgs,

    #[clap(flatten)]
    state: StateArgs,
}

impl ReplayArgs {
    #[instrument(skip_all, fields(capture = %self.capture.display()))]
    pub fn run(self) -> Result {
        let mut engine = self.state.load_engine(self.simulation.config()?)?;
        let state_file = self.state.file();
        let decoder = Decoder::new(self.devices, self.tariff_unit);
        let reader = BufReader::new(
            File::open(&self.capture)
                .with_context(|| format!("failed to open `{}`", self.capture.display()))?,
        );

        let mut replayer =
            Replayer { engine: &mut engine, state_file: state_file.as_ref(), steps: Vec::new() };
        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Message>(&line) {
                Ok(message) => replayer.feed(&decoder, &message),
                Err(error) => warn!(line_number = line_number + 1, %error, "skipping the line"),
            }
        }
        let steps = replayer.steps;

        info!(n_steps = steps.len(), phase = ?engine.phase(), "replayed");
        let outputs = engine.outputs();
        if self.steps {
            println!("{}", build_steps_table(&steps));
        }
        println!("{}", build_battery_table(&outputs));
        println!("{}", build_summary_table(&outputs));
        if let Some(state_file) = state_file {
            state_file.write(engine.state())?;
        }
        Ok(())
    }
}

struct Replayer<'a> {
    engine: &'a mut Engine,
    state_file: Option<&'a StateFile>,
    steps: Vec<(DateTime<Local>, Outputs)>,
}

impl Replayer<'_> {
    /// Malformed messages are dropped, they never stop the replay.
    fn feed(&mut self, decoder: &Decoder, message: &Message) {
        let event = match decoder.decode(message) {
            Ok(Some(event)) => event,
            Ok(None) => return,
            Err(error) => {
                warn!(topic = %message.topic, %error, "dropping the message");
                return;
            }
        };
        match self.engine.apply(event) {
            Ok(Observation::Stepped(outputs)) => {
                if let Event::Meter { at, .. } = event {
                    self.steps.push((at, outputs));
                }
            }
            Ok(Observation::TariffUpdated | Observation::Bootstrapped | Observation::Rebased) => {}
            Err(error) => {
                warn!(topic = %message.topic, %error, "rejected the event");
                return;
            }
        }
        if let Some(state_file) = self.state_file {
            state_file.save(self.engine.state());
        }
    }
}
