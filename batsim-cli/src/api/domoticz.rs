//! Decoding of the Domoticz MQTT `domoticz/out/<idx>` device payloads.

use std::str::FromStr;

use batsim_quantities::rate::WattHourRate;
use chrono::{DateTime, Local};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::{
    core::{Error, Event, meter::MeterSnapshot},
    prelude::*,
};

/// Device indices of the P1 meter and the dynamic tariff sensor, in that order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DeviceIndices {
    pub meter: u32,
    pub tariff: u32,
}

impl FromStr for DeviceIndices {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || Error::MalformedInput(format!("expected `<meter_idx>,<tariff_idx>`, got `{s}`"));
        let (meter, tariff) = s.split_once(',').ok_or_else(malformed)?;
        Ok(Self {
            meter: meter.trim().parse().map_err(|_| malformed())?,
            tariff: tariff.trim().parse().map_err(|_| malformed())?,
        })
    }
}

/// Unit in which the tariff sensor reports its price.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum TariffUnit {
    /// Currency per kilowatt-hour.
    #[default]
    #[value(name = "kwh")]
    KilowattHour,

    /// Currency per watt-hour.
    #[value(name = "wh")]
    WattHour,
}

/// Message as received from the broker.
#[derive(Clone, Debug, Deserialize)]
pub struct Message {
    pub topic: String,

    /// Either the JSON document itself or the raw payload string.
    pub payload: Value,

    pub received_at: DateTime<Local>,
}

pub struct Decoder {
    meter_topic: String,
    tariff_topic: String,
    tariff_unit: TariffUnit,
}

impl Decoder {
    pub fn new(devices: DeviceIndices, tariff_unit: TariffUnit) -> Self {
        Self {
            meter_topic: format!("domoticz/out/{}", devices.meter),
            tariff_topic: format!("domoticz/out/{}", devices.tariff),
            tariff_unit,
        }
    }

    /// Decode the message into an engine event, unrelated topics are skipped.
    pub fn decode(&self, message: &Message) -> Result<Option<Event>, Error> {
        if message.topic == self.meter_topic {
            let payload: MeterPayload = parse(&message.payload)?;
            Ok(Some(Event::Meter { snapshot: payload.into(), at: message.received_at }))
        } else if message.topic == self.tariff_topic {
            let payload: TariffPayload = parse(&message.payload)?;
            let rate = match self.tariff_unit {
                TariffUnit::KilowattHour => WattHourRate::from_kilowatt_hour_rate(payload.svalue1),
                TariffUnit::WattHour => WattHourRate::from(payload.svalue1),
            };
            Ok(Some(Event::Tariff(rate)))
        } else {
            debug!(topic = %message.topic, "skipping unrelated topic");
            Ok(None)
        }
    }
}

fn parse<T: DeserializeOwned>(payload: &Value) -> Result<T, Error> {
    match payload {
        Value::String(raw) => Ok(serde_json::from_str(raw)?),
        _ => Ok(T::deserialize(payload)?),
    }
}

/// P1 smart meter device, the values are cumulative watt-hours.
#[serde_as]
#[derive(Deserialize)]
struct MeterPayload {
    /// Usage, high tariff.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    svalue1: u64,

    /// Usage, low tariff.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    svalue2: u64,

    /// Return, high tariff.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    svalue3: u64,

    /// Return, low tariff.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    svalue4: u64,
}

impl From<MeterPayload> for MeterSnapshot {
    fn from(payload: MeterPayload) -> Self {
        Self {
            usage_high: payload.svalue1,
            usage_low: payload.svalue2,
            return_high: payload.svalue3,
            return_low: payload.svalue4,
        }
    }
}

#[serde_as]
#[derive(Deserialize)]
struct TariffPayload {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    svalue1: f64,
}
