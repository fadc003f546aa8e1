//! Test fixtures: payload builders and a scripted weather source.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::{
    ApiTide, Astro, Condition, Current, DaySummary, Error, Forecast, ForecastDay, Hour, Location,
    WeatherPayload, WeatherSource,
};
use tokio::sync::{oneshot, watch};

use crate::state::ViewState;

fn condition(text: &str) -> Condition {
    Condition {
        text: text.into(),
        icon: String::new(),
    }
}

pub fn hour_at(hour: u32, wind_degree: Option<i32>) -> Hour {
    Hour {
        time: format!("2026-10-17 {hour:02}:00"),
        temp_c: 18.0 + hour as f64 * 0.5,
        condition: condition("Partly cloudy"),
        chance_of_rain: 10,
        chance_of_snow: 0,
        wind_degree,
    }
}

/// A day with `hours` hourly rows, wave data, and no tide table.
pub fn forecast_day(hours: u32) -> ForecastDay {
    ForecastDay {
        date: "2026-10-17".into(),
        day: DaySummary {
            maxtemp_c: 26.0,
            mintemp_c: 17.0,
            condition: condition("Partly cloudy"),
            max_wave_m: Some(1.1),
            totalprecip_mm: Some(0.4),
            avgvis_km: Some(10.0),
        },
        astro: Astro {
            sunrise: "05:48 AM".into(),
            sunset: "05:27 PM".into(),
            moonrise: "03:01 AM".into(),
            moonset: "04:10 PM".into(),
            moon_phase: "Waning Crescent".into(),
            tide: None,
        },
        hour: (0..hours).map(|h| hour_at(h, Some(90))).collect(),
    }
}

/// A payload named `name` whose first day has `hours` rows and two tides.
pub fn payload_with_hours(name: &str, hours: u32) -> WeatherPayload {
    let mut day = forecast_day(hours);
    day.astro.tide = Some(vec![
        ApiTide {
            tide_time: "2026-10-17 03:11".into(),
            tide_type: "HIGH".into(),
            tide_height_mt: Some("0.82".into()),
        },
        ApiTide {
            tide_time: "2026-10-17 09:40".into(),
            tide_type: "LOW".into(),
            tide_height_mt: Some("-0.31".into()),
        },
    ]);

    WeatherPayload {
        location: Location {
            name: name.into(),
            region: "Taiwan".into(),
            localtime: "2026-10-17 09:12".into(),
        },
        current: Current {
            temp_c: 24.0,
            feelslike_c: 25.5,
            is_day: 1,
            condition: condition("Light rain"),
            wind_kph: 14.0,
            humidity: 80,
            uv: 4.0,
            air_quality: None,
        },
        forecast: Forecast {
            forecastday: vec![day],
        },
        alerts: None,
    }
}

type Reply = oneshot::Sender<Result<WeatherPayload, Error>>;

/// In-memory `WeatherSource`.
///
/// Live fetches answer immediately from a queue (or a fallback payload).
/// Historical fetches park until the test resolves them, in any order.
pub struct ScriptedSource {
    live_replies: Mutex<VecDeque<Result<WeatherPayload, Error>>>,
    live_fallback: WeatherPayload,
    live_calls: Mutex<Vec<String>>,
    historical_calls: Mutex<Vec<(String, NaiveDate)>>,
    pending: Mutex<Vec<Option<Reply>>>,
}

impl ScriptedSource {
    pub fn new(live_fallback: WeatherPayload) -> Self {
        Self {
            live_replies: Mutex::new(VecDeque::new()),
            live_fallback,
            live_calls: Mutex::new(Vec::new()),
            historical_calls: Mutex::new(Vec::new()),
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn push_live(&self, reply: Result<WeatherPayload, Error>) {
        self.live_replies.lock().unwrap().push_back(reply);
    }

    pub fn live_calls(&self) -> Vec<String> {
        self.live_calls.lock().unwrap().clone()
    }

    pub fn historical_calls(&self) -> Vec<(String, NaiveDate)> {
        self.historical_calls.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.live_calls().len() + self.historical_calls().len()
    }

    /// Answer the `index`-th historical call. Returns false if that fetch was
    /// already answered or its task has been dropped.
    pub fn resolve_historical(&self, index: usize, reply: Result<WeatherPayload, Error>) -> bool {
        let sender = self.pending.lock().unwrap()[index].take();
        sender.map(|tx| tx.send(reply).is_ok()).unwrap_or(false)
    }

    /// Yield to spawned tasks until `n` historical calls have been made.
    pub async fn wait_for_historical_calls(&self, n: usize) {
        for _ in 0..1_000 {
            if self.historical_calls.lock().unwrap().len() >= n {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("expected {n} historical calls, saw {:?}", self.historical_calls());
    }
}

#[async_trait]
impl WeatherSource for ScriptedSource {
    async fn fetch_live_forecast(&self, location: &str) -> Result<WeatherPayload, Error> {
        self.live_calls.lock().unwrap().push(location.to_string());
        let scripted = self.live_replies.lock().unwrap().pop_front();
        tokio::task::yield_now().await;
        scripted.unwrap_or_else(|| Ok(self.live_fallback.clone()))
    }

    async fn fetch_historical(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<WeatherPayload, Error> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().push(Some(tx));
        self.historical_calls
            .lock()
            .unwrap()
            .push((location.to_string(), date));
        rx.await
            .unwrap_or_else(|_| Err(Error::Network("scripted reply dropped".into())))
    }
}

/// Wait (bounded) until the published snapshot satisfies `pred`.
pub async fn settle<F>(rx: &mut watch::Receiver<ViewState>, pred: F) -> ViewState
where
    F: FnMut(&ViewState) -> bool,
{
    let waited = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(pred)).await;
    match waited {
        Ok(Ok(state)) => state.clone(),
        Ok(Err(e)) => panic!("controller dropped: {e}"),
        Err(_) => panic!("timed out waiting for snapshot"),
    }
}
