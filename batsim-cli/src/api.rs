pub mod domoticz;
pub mod frank_energie;
pub mod homewizard;
