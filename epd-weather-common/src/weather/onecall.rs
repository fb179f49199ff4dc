//! One Call 预报反序列化

use embedded_io::Read;
use serde_json::Value;

use super::converter::{
    Object, array, f32_field, first_condition, i32_field, i64_field, nested_f32, object, str_field,
    truncate,
};
use super::document::{Document, read_document};
use super::filter::one_call_filter;
use crate::types::{
    Alert, CurrentConditions, DailyRecord, DailyTemperature, DeserializeResult, ForecastResponse,
    HourlyRecord, WeatherConfig,
};
use crate::{debug, warn};

/// 读取一份 One Call 响应并填充 `response`
///
/// `response` 会被整体覆盖；失败时其内容不完整，调用方不应使用。
/// 超出容量的逐小时/每日/预警条目被静默丢弃。
pub fn deserialize_one_call<R: Read, const H: usize, const D: usize, const A: usize>(
    reader: &mut R,
    response: &mut ForecastResponse<H, D, A>,
    config: &WeatherConfig,
) -> DeserializeResult<()> {
    let result = read_document(reader, one_call_filter(config.display_alerts), config)
        .and_then(|document| populate(&document, response, config.display_alerts));

    match result {
        Ok(()) => debug!(
            "One Call parsed: {} hourly, {} daily, {} alerts",
            response.hourly.len(),
            response.daily.len(),
            response.alerts.len()
        ),
        Err(e) => warn!("One Call deserialization failed: {:?}", e),
    }
    result
}

fn populate<const H: usize, const D: usize, const A: usize>(
    document: &Document,
    response: &mut ForecastResponse<H, D, A>,
    display_alerts: bool,
) -> DeserializeResult<()> {
    *response = ForecastResponse::default();

    let root = object(Some(document.root()), "root")?;
    response.lat = f32_field(root, "lat");
    response.lon = f32_field(root, "lon");
    response.timezone = str_field(root, "timezone");
    response.timezone_offset = i32_field(root, "timezone_offset");

    response.current = parse_current(object(root.get("current"), "current")?)?;

    for item in array(root.get("hourly"), "hourly")? {
        if response.hourly.is_full() {
            break;
        }
        let hourly = parse_hourly(object(Some(item), "hourly")?);
        response.hourly.push(hourly).ok();
    }

    for item in array(root.get("daily"), "daily")? {
        if response.daily.is_full() {
            break;
        }
        let daily = parse_daily(object(Some(item), "daily")?)?;
        response.daily.push(daily).ok();
    }

    // 没有生效中的预警时接口不返回 alerts
    if display_alerts && root.get("alerts").is_some_and(|alerts| !alerts.is_null()) {
        for item in array(root.get("alerts"), "alerts")? {
            if response.alerts.is_full() {
                break;
            }
            let alert = parse_alert(object(Some(item), "alerts")?);
            response.alerts.push(alert).ok();
        }
    }

    Ok(())
}

fn parse_current(current: &Object) -> DeserializeResult<CurrentConditions> {
    Ok(CurrentConditions {
        dt: i64_field(current, "dt"),
        sunrise: i64_field(current, "sunrise"),
        sunset: i64_field(current, "sunset"),
        temp: f32_field(current, "temp"),
        feels_like: f32_field(current, "feels_like"),
        pressure: i32_field(current, "pressure"),
        humidity: i32_field(current, "humidity"),
        dew_point: f32_field(current, "dew_point"),
        clouds: i32_field(current, "clouds"),
        uvi: f32_field(current, "uvi"),
        visibility: i32_field(current, "visibility"),
        wind_speed: f32_field(current, "wind_speed"),
        wind_gust: f32_field(current, "wind_gust"),
        wind_deg: i32_field(current, "wind_deg"),
        rain_1h: nested_f32(current, "rain", "1h"),
        snow_1h: nested_f32(current, "snow", "1h"),
        weather: first_condition(current)?,
    })
}

fn parse_hourly(hourly: &Object) -> HourlyRecord {
    HourlyRecord {
        dt: i64_field(hourly, "dt"),
        temp: f32_field(hourly, "temp"),
        feels_like: f32_field(hourly, "feels_like"),
        pressure: i32_field(hourly, "pressure"),
        humidity: i32_field(hourly, "humidity"),
        dew_point: f32_field(hourly, "dew_point"),
        clouds: i32_field(hourly, "clouds"),
        uvi: f32_field(hourly, "uvi"),
        visibility: i32_field(hourly, "visibility"),
        wind_speed: f32_field(hourly, "wind_speed"),
        wind_gust: f32_field(hourly, "wind_gust"),
        wind_deg: i32_field(hourly, "wind_deg"),
        pop: f32_field(hourly, "pop"),
        rain_1h: nested_f32(hourly, "rain", "1h"),
        snow_1h: nested_f32(hourly, "snow", "1h"),
    }
}

fn parse_daily(daily: &Object) -> DeserializeResult<DailyRecord> {
    Ok(DailyRecord {
        dt: i64_field(daily, "dt"),
        sunrise: i64_field(daily, "sunrise"),
        sunset: i64_field(daily, "sunset"),
        moonrise: i64_field(daily, "moonrise"),
        moonset: i64_field(daily, "moonset"),
        moon_phase: f32_field(daily, "moon_phase"),
        temp: parse_temperature(daily.get("temp")),
        feels_like: parse_temperature(daily.get("feels_like")),
        pressure: i32_field(daily, "pressure"),
        humidity: i32_field(daily, "humidity"),
        dew_point: f32_field(daily, "dew_point"),
        clouds: i32_field(daily, "clouds"),
        uvi: f32_field(daily, "uvi"),
        visibility: i32_field(daily, "visibility"),
        wind_speed: f32_field(daily, "wind_speed"),
        wind_gust: f32_field(daily, "wind_gust"),
        wind_deg: i32_field(daily, "wind_deg"),
        pop: f32_field(daily, "pop"),
        rain: f32_field(daily, "rain"),
        snow: f32_field(daily, "snow"),
        weather: first_condition(daily)?,
    })
}

fn parse_temperature(value: Option<&Value>) -> DailyTemperature {
    let Some(temp) = value.and_then(Value::as_object) else {
        return DailyTemperature::default();
    };
    DailyTemperature {
        morn: f32_field(temp, "morn"),
        day: f32_field(temp, "day"),
        eve: f32_field(temp, "eve"),
        night: f32_field(temp, "night"),
        min: f32_field(temp, "min"),
        max: f32_field(temp, "max"),
    }
}

fn parse_alert(alert: &Object) -> Alert {
    Alert {
        event: str_field(alert, "event"),
        start: i64_field(alert, "start"),
        end: i64_field(alert, "end"),
        tags: alert
            .get("tags")
            .and_then(|tags| tags.get(0))
            .and_then(Value::as_str)
            .map(truncate)
            .unwrap_or_default(),
    }
}
