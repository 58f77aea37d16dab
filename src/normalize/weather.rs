use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use crate::api::models::{ForecastDay, WeatherSnapshot};
use crate::upstream::openweather::{Condition, CurrentWeather, Forecast, ForecastEntry, SOURCE};

pub const FORECAST_DAYS: usize = 5;
/// Five days of three-hour intervals.
pub const MAX_FORECAST_ENTRIES: usize = 40;
const DEFAULT_VISIBILITY_METERS: f64 = 10_000.0;
/// The provider's UV data needs a separate call.
const DEFAULT_UV_INDEX: i64 = 5;

pub fn snapshot(current: &CurrentWeather, forecast: &Forecast) -> WeatherSnapshot {
    let offset = utc_offset(current.timezone);
    let (condition, _) = classify(current.weather.first());

    let location = match current.sys.country.as_deref().map(str::trim) {
        Some(country) if !country.is_empty() => format!("{}, {}", current.name.trim(), country),
        _ => current.name.trim().to_string(),
    };

    WeatherSnapshot {
        location,
        temperature: round(current.main.temp),
        feels_like: round(current.main.feels_like),
        condition,
        humidity: round(current.main.humidity),
        wind_speed: kmh_from_mps(current.wind.speed),
        visibility: km_from_meters(current.visibility),
        pressure: round(current.main.pressure),
        uv_index: DEFAULT_UV_INDEX,
        sunrise: local_time(current.sys.sunrise, offset),
        sunset: local_time(current.sys.sunset, offset),
        forecast: daily_forecast(&forecast.list, utc_offset(forecast.city.timezone)),
        source: SOURCE.to_string(),
        fallback: false,
    }
}

/// One record per calendar date, in first-seen order, capped at five days.
/// High and low span every entry sharing that date.
pub fn daily_forecast(entries: &[ForecastEntry], offset: FixedOffset) -> Vec<ForecastDay> {
    let entries = &entries[..entries.len().min(MAX_FORECAST_ENTRIES)];
    let dated: Vec<(NaiveDate, &ForecastEntry)> = entries
        .iter()
        .filter_map(|entry| local_date(entry.dt, offset).map(|date| (date, entry)))
        .collect();

    let mut seen = HashSet::new();
    let mut days = Vec::with_capacity(FORECAST_DAYS);

    for (date, entry) in &dated {
        if days.len() == FORECAST_DAYS {
            break;
        }
        if !seen.insert(*date) {
            continue;
        }

        let temps = dated
            .iter()
            .filter(|(other, _)| other == date)
            .map(|(_, e)| e.main.temp);
        let high = temps.clone().fold(f64::NEG_INFINITY, f64::max);
        let low = temps.fold(f64::INFINITY, f64::min);
        let (condition, icon) = classify(entry.weather.first());

        days.push(ForecastDay {
            day: day_label(days.len(), *date),
            high: round(high),
            low: round(low),
            condition,
            icon: icon.to_string(),
        });
    }

    days
}

/// Maps a provider condition onto the site's vocabulary and icon name.
/// Unrecognized descriptions pass through with a capital first letter.
pub fn classify(condition: Option<&Condition>) -> (String, &'static str) {
    let description = condition
        .map(|c| if c.description.trim().is_empty() { c.main.trim() } else { c.description.trim() })
        .unwrap_or_default();
    let lower = description.to_lowercase();

    if lower.contains("cloud") {
        if lower.contains("few") {
            ("Partly Cloudy".to_string(), "partly-cloudy")
        } else {
            ("Cloudy".to_string(), "cloudy")
        }
    } else if lower.contains("rain") {
        ("Rainy".to_string(), "rainy")
    } else if lower.contains("clear") {
        ("Sunny".to_string(), "sunny")
    } else if description.is_empty() {
        ("Unknown".to_string(), "sunny")
    } else {
        (capitalize(description), "sunny")
    }
}

/// "Today", "Tomorrow", then the full weekday name.
pub fn day_label(index: usize, date: NaiveDate) -> String {
    match index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%A").to_string(),
    }
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn kmh_from_mps(speed: f64) -> i64 {
    round(speed * 3.6)
}

pub fn km_from_meters(meters: Option<f64>) -> i64 {
    round(meters.unwrap_or(DEFAULT_VISIBILITY_METERS) / 1000.0)
}

/// Clock time at the city, e.g. `06:42 AM`.
pub fn local_time(timestamp: i64, offset: FixedOffset) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(&offset).format("%I:%M %p").to_string())
        .unwrap_or_default()
}

fn local_date(timestamp: i64, offset: FixedOffset) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(&offset).date_naive())
}

fn utc_offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(utc)
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn round(value: f64) -> i64 {
    value.round() as i64
}
