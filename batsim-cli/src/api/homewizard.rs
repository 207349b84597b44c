use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::{core::meter::MeterSnapshot, prelude::*};

/// HomeWizard P1 meter local API client.
pub struct Client {
    inner: reqwest::Client,
    url: Url,
}

impl Client {
    #[instrument(skip_all, fields(url = %url))]
    pub fn new(url: Url) -> Result<Self> {
        let inner = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { inner, url })
    }

    #[instrument(skip_all, fields(url = %self.url))]
    pub async fn get_measurement(&self) -> Result<MeterMeasurement> {
        let measurement: MeterMeasurement = self
            .inner
            .get(self.url.clone())
            .send()
            .await
            .with_context(|| format!("failed to request a measurement from `{}`", self.url))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("failed to deserialize the response from `{}`", self.url))?;
        debug!(?measurement);
        Ok(measurement)
    }
}

/// Cumulative totals in kilowatt-hours, per tariff.
///
/// Single-tariff meters only report T1.
#[must_use]
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct MeterMeasurement {
    #[serde(rename = "total_power_import_t1_kwh")]
    pub import_t1: f64,

    #[serde(rename = "total_power_import_t2_kwh", default)]
    pub import_t2: f64,

    #[serde(rename = "total_power_export_t1_kwh")]
    pub export_t1: f64,

    #[serde(rename = "total_power_export_t2_kwh", default)]
    pub export_t2: f64,
}

impl MeterMeasurement {
    /// Convert into the watt-hour counters, T1 is the low tariff and T2 is the normal one.
    pub fn to_snapshot(self) -> MeterSnapshot {
        MeterSnapshot {
            usage_high: to_watt_hours(self.import_t2),
            usage_low: to_watt_hours(self.import_t1),
            return_high: to_watt_hours(self.export_t2),
            return_low: to_watt_hours(self.export_t1),
        }
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_watt_hours(kilowatt_hours: f64) -> u64 {
    (kilowatt_hours * 1000.0).round().max(0.0) as u64
}
