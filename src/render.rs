//! Plain-text rendering of a `ViewState` snapshot.

use common::{AirQuality, MarineSummary, WeatherPayload};
use controller::{tide_curve, AppMode, AqiLevel, ScreenPhase, ViewState, WeatherEffect};

const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn render(state: &ViewState) -> String {
    match ScreenPhase::of(state) {
        ScreenPhase::Loading => "Loading weather...".to_string(),
        ScreenPhase::Idle => "Waiting for location permission.".to_string(),
        ScreenPhase::Error(message) => format!("Error: {message}"),
        ScreenPhase::Content => match &state.weather_data {
            Some(data) => render_content(state, data).join("\n"),
            None => String::new(),
        },
    }
}

fn render_content(state: &ViewState, data: &WeatherPayload) -> Vec<String> {
    let mut lines = Vec::new();

    let mut header = format!(
        "{}, {}  [{}]",
        data.location.name,
        data.location.region,
        mode_label(state.app_mode)
    );
    if state.is_loading {
        header.push_str("  (refreshing)");
    }
    lines.push(header);

    let current = &data.current;
    let effect = match WeatherEffect::from_condition(&current.condition.text) {
        WeatherEffect::Rain => " ~rain~",
        WeatherEffect::Snow => " *snow*",
        WeatherEffect::None => "",
    };
    lines.push(format!(
        "Now {:.0}°C (feels {:.0}°C), {}{}",
        current.temp_c, current.feelslike_c, current.condition.text, effect
    ));
    lines.push(format!(
        "Wind {:.0} km/h  Humidity {}%  UV {:.0}",
        current.wind_kph, current.humidity, current.uv
    ));

    if let Some(aq) = &current.air_quality {
        lines.extend(render_air(aq, state.is_aqi_expanded));
    }

    if let Some(hour) = state.selected_hour() {
        lines.push(format!(
            "Hour {}: {:.0}°C {} (rain {}%, snow {}%)",
            hour.time, hour.temp_c, hour.condition.text, hour.chance_of_rain, hour.chance_of_snow
        ));
    }

    if let Some(day) = data.first_day() {
        lines.push(format!(
            "{}: {:.0}°/{:.0}°  sunrise {}  sunset {}  moon {}",
            day.date,
            day.day.maxtemp_c,
            day.day.mintemp_c,
            day.astro.sunrise,
            day.astro.sunset,
            day.astro.moon_phase
        ));
    }

    if let Some(alerts) = &data.alerts {
        for alert in &alerts.alert {
            lines.push(format!("Alert: {}", alert.headline));
        }
    }

    if state.app_mode == AppMode::Marine {
        match &state.marine_data {
            Some(marine) => lines.extend(render_marine(marine)),
            None => lines.push("No marine data for this location.".to_string()),
        }
    }

    lines.push(format!(
        "Timeline: {} ({:.2}){}",
        state.historical_date,
        state.timeline_progress,
        if state.is_timeline_dragging { " dragging" } else { "" }
    ));

    lines
}

fn mode_label(mode: AppMode) -> &'static str {
    match mode {
        AppMode::Live => "live",
        AppMode::Historical => "historical",
        AppMode::Marine => "marine",
    }
}

fn render_air(aq: &AirQuality, expanded: bool) -> Vec<String> {
    let level = AqiLevel::from_defra_index(aq.gb_defra_index);
    let mut lines = vec![format!("Air quality: {} ({})", level.label(), aq.gb_defra_index)];
    if expanded {
        lines.push(format!(
            "  PM2.5 {:.1}  O3 {:.1}  NO2 {:.1}  SO2 {:.1}  CO {:.1}",
            aq.pm2_5, aq.o3, aq.no2, aq.so2, aq.co
        ));
    }
    lines
}

fn render_marine(marine: &MarineSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "Waves {:.1} m  Wind from {}°{}",
        marine.wave_height_m,
        marine.wind_dir_degree,
        if marine.partial { "  (partial data)" } else { "" }
    )];
    for tide in &marine.tides {
        lines.push(format!("  {} {} {:.2} m", tide.time, tide.kind, tide.height_m));
    }

    let spark: String = tide_curve(&marine.tides)
        .iter()
        .map(|&(_, y)| {
            let level = ((1.0 - y) * (SPARK.len() - 1) as f64).round() as usize;
            SPARK[level.min(SPARK.len() - 1)]
        })
        .collect();
    lines.push(format!("  Tides {spark}"));
    lines
}
