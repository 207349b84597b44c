use std::time::Duration;

use batsim_quantities::rate::WattHourRate;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{ops::Interval, prelude::*};

/// Frank Energie market prices client.
pub struct Api {
    client: reqwest::Client,
    resolution: Resolution,
}

impl Api {
    pub fn new(resolution: Resolution) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client, resolution })
    }

    #[instrument(skip_all)]
    pub async fn get_rates(&self, on: NaiveDate) -> Result<Vec<(Interval, WattHourRate)>> {
        info!(?on, "fetching…");
        let Some(data) = self
            .client
            .post("https://www.frankenergie.nl/graphql")
            .json(&Request::new(on, self.resolution))
            .send()
            .await?
            .error_for_status()?
            .json::<Response>()
            .await?
            .data
        else {
            return Ok(Vec::new());
        };
        Ok(data
            .market_prices
            .electricity
            .into_iter()
            .map(|item| {
                (
                    Interval::from_std(item.from..item.till),
                    WattHourRate::from_kilowatt_hour_rate(item.all_in),
                )
            })
            .collect())
    }
}

/// Cached day of rates, fetched at most once per date.
pub struct RateSchedule {
    api: Api,
    fetched_on: Option<NaiveDate>,
    rates: Vec<(Interval, WattHourRate)>,
}

impl RateSchedule {
    pub const fn new(api: Api) -> Self {
        Self { api, fetched_on: None, rates: Vec::new() }
    }

    /// Rate in effect at the given time, if the provider published one.
    pub async fn rate_at(&mut self, at: DateTime<Local>) -> Result<Option<WattHourRate>> {
        if let Some(rate) = lookup(&self.rates, at) {
            return Ok(Some(rate));
        }
        let on = at.date_naive();
        if self.fetched_on != Some(on) {
            self.rates = self.api.get_rates(on).await?;
            self.fetched_on = Some(on);
        }
        Ok(lookup(&self.rates, at))
    }
}

fn lookup(rates: &[(Interval, WattHourRate)], at: DateTime<Local>) -> Option<WattHourRate> {
    rates.iter().find(|(interval, _)| interval.contains(at)).map(|(_, rate)| *rate)
}

#[derive(Serialize)]
struct Request {
    #[serde(rename = "MarketPrices")]
    operation_name: &'static str,

    query: &'static str,

    variables: Variables,
}

impl Request {
    const fn new(date: NaiveDate, resolution: Resolution) -> Self {
        Self {
            operation_name: "MarketPrices",
            query: "query MarketPrices($date: String!, $resolution: PriceResolution!) { marketPrices(date: $date, resolution: $resolution) { electricityPrices { from till allInPrice } } }",
            variables: Variables { date, resolution },
        }
    }
}

#[derive(Serialize)]
struct Variables {
    date: NaiveDate,
    resolution: Resolution,
}

#[derive(Copy, Clone, Serialize, clap::ValueEnum)]
pub enum Resolution {
    #[serde(rename = "PT15M")]
    Quarterly,

    #[serde(rename = "PT60M")]
    Hourly,
}

#[derive(Deserialize)]
struct Response {
    data: Option<Data>,
}

#[derive(Deserialize)]
struct Data {
    #[serde(rename = "marketPrices")]
    market_prices: MarketPrices,
}

#[derive(Deserialize)]
struct MarketPrices {
    #[serde(rename = "electricityPrices")]
    electricity: Vec<ElectricityPrice>,
}

#[derive(Deserialize)]
struct ElectricityPrice {
    from: DateTime<Local>,
    till: DateTime<Local>,

    #[serde(rename = "allInPrice")]
    all_in: f64,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{TimeDelta, Timelike};

    use super::*;

    #[test]
    fn response_ok() -> Result {
        // language=json
        let body = r#"{
            "data": {
                "marketPrices": {
                    "electricityPrices": [
                        {"from": "2026-01-19T00:00:00+01:00", "till": "2026-01-19T00:15:00+01:00", "allInPrice": 0.2431},
                        {"from": "2026-01-19T00:15:00+01:00", "till": "2026-01-19T00:30:00+01:00", "allInPrice": 0.2288}
                    ]
                }
            }
        }"#;
        let response = serde_json::from_str::<Response>(body)?;
        let Some(data) = response.data else { bail!("no data") };
        assert_eq!(data.market_prices.electricity.len(), 2);
        assert_abs_diff_eq!(data.market_prices.electricity[1].all_in, 0.2288);
        Ok(())
    }

    #[test]
    fn lookup_ok() {
        let start = Local::now();
        let middle = start + TimeDelta::minutes(15);
        let rates = [
            (Interval::from_std(start..middle), WattHourRate::from_kilowatt_hour_rate(0.1)),
            (
                Interval::from_std(middle..middle + TimeDelta::minutes(15)),
                WattHourRate::from_kilowatt_hour_rate(0.2),
            ),
        ];
        assert_eq!(lookup(&rates, start), Some(WattHourRate::from_kilowatt_hour_rate(0.1)));
        assert_eq!(lookup(&rates, middle), Some(WattHourRate::from_kilowatt_hour_rate(0.2)));
        assert_eq!(lookup(&rates, start - TimeDelta::seconds(1)), None);
        assert_eq!(lookup(&rates, middle + TimeDelta::minutes(15)), None);
    }

    #[tokio::test]
    async fn missing_rate_is_not_refetched_on_the_same_day() -> Result {
        let now = Local::now();
        let mut schedule = RateSchedule {
            api: Api::new(Resolution::Quarterly)?,
            fetched_on: Some(now.date_naive()),
            rates: Vec::new(),
        };
        assert_eq!(schedule.rate_at(now).await?, None);
        assert_eq!(schedule.fetched_on, Some(now.date_naive()));
        Ok(())
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn test_get_upcoming_rates_ok() -> Result {
        let series = Api::new(Resolution::Quarterly)?.get_rates(Local::now().date_naive()).await?;
        assert!(!series.is_empty());
        assert!(series.len() <= 24 * 4);
        let (time_range, _) = &series[0];
        assert_eq!(time_range.start.hour(), 0);
        assert!(series.iter().is_sorted_by_key(|(time_range, _)| time_range.start));
        Ok(())
    }
}
