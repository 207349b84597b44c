use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use batsim_quantities::rate::WattHourRate;
use chrono::Local;
use clap::Parser;
use reqwest::Url;
use tokio::time::{MissedTickBehavior, interval};

use crate::{
    api::{
        frank_energie::{self, RateSchedule, Resolution},
        homewizard,
    },
    cli::{simulation::SimulationArgs, state::StateArgs},
    core::{Engine, Event},
    prelude::*,
    store::StateFile,
    tables::build_summary_table,
};

#[derive(Parser)]
pub struct WatchArgs {
    /// HomeWizard P1 meter measurement endpoint, for example `http://p1meter/api/v1/data`.
    #[clap(long, env = "METER_URL")]
    meter_url: Url,

    #[clap(long, env = "POLLING_INTERVAL", default_value = "10s")]
    polling_interval: humantime::Duration,

    /// Take the dynamic tariff from the Frank Energie market prices.
    #[clap(long, env = "FRANK_ENERGIE")]
    frank_energie: bool,

    #[clap(long, env = "FRANK_ENERGIE_RESOLUTION", value_enum, default_value = "quarterly")]
    frank_energie_resolution: Resolution,

    #[clap(flatten)]
    simulation: SimulationArgs,

    #[clap(flatten)]
    state: StateArgs,
}

impl WatchArgs {
    pub async fn run(self) -> Result {
        ensure!(!self.polling_interval.is_zero(), "the polling interval must be positive");
        let should_terminate = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&should_terminate))?;
        signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&should_terminate))?;

        let mut watcher = Watcher {
            engine: self.state.load_engine(self.simulation.config()?)?,
            meter: homewizard::Client::new(self.meter_url)?,
            rates: if self.frank_energie {
                Some(RateSchedule::new(frank_energie::Api::new(self.frank_energie_resolution)?))
            } else {
                None
            },
            state_file: self.state.file(),
        };

        let mut interval = interval(self.polling_interval.into());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        while !should_terminate.load(Ordering::Relaxed) {
            interval.tick().await;
            if let Err(error) = watcher.poll().await {
                error!(error = %format_args!("{error:#}"), "failed to poll");
            }
        }

        info!("terminating…");
        if let Some(state_file) = &watcher.state_file {
            info!(path = %state_file.path().display(), "saving the state…");
            state_file.write(watcher.engine.state())?;
        }
        println!("{}", build_summary_table(&watcher.engine.outputs()));
        Ok(())
    }
}

struct Watcher {
    engine: Engine,
    meter: homewizard::Client,
    rates: Option<RateSchedule>,
    state_file: Option<StateFile>,
}

impl Watcher {
    #[instrument(skip_all)]
    async fn poll(&mut self) -> Result {
        let now = Local::now();
        if let Some(rates) = &mut self.rates {
            // Keep the previous price when the current one is unavailable:
            match rates.rate_at(now).await {
                Ok(Some(rate)) => self.observe_tariff(rate),
                Ok(None) => warn!(?now, "no dynamic price for the current interval"),
                Err(error) => error!(error = %format_args!("{error:#}"), "failed to fetch the prices"),
            }
        }
        let snapshot = self.meter.get_measurement().await?.to_snapshot();
        self.apply(Event::Meter { snapshot, at: Local::now() })
    }

    /// A rejected price keeps the previous one and never stops the meter event.
    fn observe_tariff(&mut self, rate: WattHourRate) {
        if let Err(error) = self.apply(Event::Tariff(rate)) {
            warn!(?rate, error = %format_args!("{error:#}"), "rejected the dynamic price");
        }
    }

    fn apply(&mut self, event: Event) -> Result {
        let _ = self.engine.apply(event)?;
        if let Some(state_file) = &self.state_file {
            state_file.save(self.engine.state());
        }
        Ok(())
    }
}
