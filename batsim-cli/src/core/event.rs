use batsim_quantities::rate::WattHourRate;
use chrono::{DateTime, Local};

use crate::core::meter::MeterSnapshot;

/// Inbound event, already decoded from whatever transport delivered it.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub enum Event {
    Meter { snapshot: MeterSnapshot, at: DateTime<Local> },

    /// Dynamic price, normalised to currency per watt-hour.
    Tariff(WattHourRate),
}
