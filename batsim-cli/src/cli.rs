mod replay;
mod show;
mod simulation;
mod state;
mod watch;

use clap::{Parser, Subcommand};

use crate::{
    cli::{replay::ReplayArgs, show::ShowArgs, watch::WatchArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Log the per-step details.
    #[clap(long, short, global = true, env = "VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub const fn log_level(&self) -> Level {
        if self.verbose { Level::DEBUG } else { Level::INFO }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Replay a capture of the Domoticz messages through the simulation.
    #[clap(name = "replay")]
    Replay(Box<ReplayArgs>),

    /// Poll the P1 meter and keep simulating until terminated.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),

    /// Print the saved simulation state.
    #[clap(name = "show")]
    Show(Box<ShowArgs>),
}

impl Command {
    pub async fn run(self) -> Result {
        match self {
            Self::Replay(args) => args.run(),
            Self::Watch(args) => args.run().await,
            Self::Show(args) => args.run(),
        }
    }
}
