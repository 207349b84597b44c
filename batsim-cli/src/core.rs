pub mod battery;
pub mod config;
pub mod delta;
pub mod engine;
pub mod error;
pub mod event;
pub mod flow;
pub mod ledger;
pub mod meter;
pub mod outputs;
pub mod state;
pub mod tariff;

pub use self::{
    config::{RegressionPolicy, SimulationConfig},
    engine::{Engine, Observation},
    error::Error,
    event::Event,
    outputs::Outputs,
    state::{Phase, SimulationState},
};
