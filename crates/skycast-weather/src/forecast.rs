//! Forecast normalization: reduce the raw 3-hour series to one current
//! reading plus at most one representative sample per following day.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Timelike};

use crate::types::{ForecastDay, ForecastResult, RawForecastPoint, WeatherError};

/// Hour of day (local time) used to pick one sample per future day.
/// Noon occurs exactly once per day in a 3-hour-step series, so the
/// hour filter doubles as per-day dedup.
const REFERENCE_HOUR: u32 = 12;

/// Future days kept in addition to the current reading.
const MAX_FUTURE_DAYS: usize = 4;

/// Normalize a raw forecast series for `city_name`.
///
/// "Today" is taken from the local wall clock, not from the first
/// sample, so same-day noon readings are never double-counted.
///
/// # Errors
/// `EmptyForecast` when `points` is empty. A series with too few
/// qualifying future samples is not an error; the result is just
/// shorter, never padded.
pub fn normalize(
    points: &[RawForecastPoint],
    city_name: &str,
) -> Result<ForecastResult, WeatherError> {
    normalize_with_today(points, city_name, Local::now().date_naive())
}

/// Deterministic core of [`normalize`]: the reference date used to
/// exclude same-day samples is passed in explicitly.
pub fn normalize_with_today(
    points: &[RawForecastPoint],
    city_name: &str,
    today: NaiveDate,
) -> Result<ForecastResult, WeatherError> {
    let Some(current) = points.first() else {
        return Err(WeatherError::EmptyForecast);
    };

    let mut days = vec![to_day(current)];

    for point in &points[1..] {
        if days.len() > MAX_FUTURE_DAYS {
            break;
        }
        let Some(local) = local_time(point.dt) else {
            continue;
        };
        if local.date_naive() != today && local.hour() == REFERENCE_HOUR {
            days.push(to_day(point));
        }
    }

    Ok(ForecastResult {
        city_name: city_name.to_string(),
        days,
    })
}

fn to_day(point: &RawForecastPoint) -> ForecastDay {
    let condition = point.weather.first();
    ForecastDay {
        date: local_time(point.dt)
            .map(format_date)
            .unwrap_or_default(),
        temperature: point.main.temp.round() as i32,
        humidity: point.main.humidity,
        wind_speed: point.wind.speed.round() as i32,
        icon: condition.map(|c| c.icon.clone()).unwrap_or_default(),
        description: condition.map(|c| c.description.clone()).unwrap_or_default(),
    }
}

fn local_time(unix_seconds: i64) -> Option<DateTime<Local>> {
    Local.timestamp_opt(unix_seconds, 0).single()
}

fn format_date(time: DateTime<Local>) -> String {
    // Unpadded month/day, matching en-US short date display.
    time.format("%-m/%-d/%Y").to_string()
}
