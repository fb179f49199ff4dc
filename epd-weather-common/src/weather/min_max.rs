//! 符合直觉的每日最高/最低温度
//!
//! 接口给出的 min/max 按午夜到午夜统计，与人们口中的“今天最高”“今晚最低”不符。
//! 这里重新计算：
//! - 最高温：当天日出到午夜
//! - 最低温：当天 16 点到次日日出
//!
//! 逐小时数据（约 48 小时）覆盖到的日子用逐小时温度，
//! 其余日子退回到每日的 morn/day/eve/night 温度。

use core::ops::Range;

use crate::types::{DailyRecord, DailyTemperature, DebugLevel, ForecastResponse, HourlyRecord};
use crate::units::{kelvin_to_celsius, kelvin_to_fahrenheit};
use crate::info;

/// 显示的天数
pub const INTUITIVE_DAYS: usize = 5;

const HOUR: i64 = 3600;

/// 以每日时间戳为锚点的统计窗口
///
/// 每日 `dt` 通常是当地正午，减 12 小时近似为当地午夜，不做日历换算。
#[derive(Debug, Clone, PartialEq, Eq)]
struct DayWindows {
    daytime: Range<i64>,
    overnight: Range<i64>,
}

impl DayWindows {
    fn new(today: &DailyRecord, next: Option<&DailyRecord>) -> Self {
        let midnight = today.dt - 12 * HOUR;
        let end_of_day = midnight + 24 * HOUR;
        let four_pm = midnight + 16 * HOUR;
        // 没有次日数据时，估计次日日出与今天同一时刻
        let next_sunrise = next.map_or(today.sunrise + 24 * HOUR, |next| next.sunrise);

        Self {
            daytime: today.sunrise..end_of_day,
            overnight: four_pm..next_sunrise,
        }
    }

    fn daytime_max(&self, hourly: &[HourlyRecord]) -> Option<f32> {
        hourly
            .iter()
            .filter(|hour| self.daytime.contains(&hour.dt))
            .map(|hour| hour.temp)
            .reduce(f32::max)
    }

    fn overnight_min(&self, hourly: &[HourlyRecord]) -> Option<f32> {
        hourly
            .iter()
            .filter(|hour| self.overnight.contains(&hour.dt))
            .map(|hour| hour.temp)
            .reduce(f32::min)
    }
}

/// 就地改写前 [`INTUITIVE_DAYS`] 天的 `temp.min` / `temp.max`
///
/// 只读取逐小时温度和每日的 morn/day/eve/night，重复调用结果不变。
pub fn compute_intuitive_min_max<const H: usize, const D: usize, const A: usize>(
    response: &mut ForecastResponse<H, D, A>,
    debug_level: DebugLevel,
) {
    let days = response.daily.len().min(INTUITIVE_DAYS);

    for day in 0..days {
        let next = response.daily.get(day + 1);
        let next_morn = next.map(|next| next.temp.morn);
        let windows = DayWindows::new(&response.daily[day], next);
        let hourly_max = windows.daytime_max(&response.hourly);
        let hourly_min = windows.overnight_min(&response.hourly);

        let today = &mut response.daily[day];
        let original = today.temp;
        let max = hourly_max.unwrap_or_else(|| fallback_max(today));
        let min = hourly_min.unwrap_or_else(|| fallback_min(today, next_morn));
        today.temp.max = max;
        today.temp.min = min;

        if debug_level >= DebugLevel::Basic {
            report(day, &original, &today.temp, hourly_min.is_some(), hourly_max.is_some());
        }
    }
}

/// 白天时段：morn、day、eve 中的最大值
fn fallback_max(today: &DailyRecord) -> f32 {
    today.temp.morn.max(today.temp.day).max(today.temp.eve)
}

/// 夜间时段：今天 eve、night 与次日 morn 中的最小值
fn fallback_min(today: &DailyRecord, next_morn: Option<f32>) -> f32 {
    let min = today.temp.eve.min(today.temp.night);
    next_morn.map_or(min, |morn| min.min(morn))
}

fn report(
    day: usize,
    original: &DailyTemperature,
    adjusted: &DailyTemperature,
    hourly_min: bool,
    hourly_max: bool,
) {
    let source = |hourly: bool| if hourly { "(hourly)" } else { "(fallback)" };

    info!("[debug] Day {} temp adjustments:", day);
    info!(
        "  API Max: {}K ({}F / {}C) -> New Max: {}K ({}F / {}C) {}",
        original.max,
        kelvin_to_fahrenheit(original.max),
        kelvin_to_celsius(original.max),
        adjusted.max,
        kelvin_to_fahrenheit(adjusted.max),
        kelvin_to_celsius(adjusted.max),
        source(hourly_max)
    );
    info!(
        "  API Min: {}K ({}F / {}C) -> New Min: {}K ({}F / {}C) {}",
        original.min,
        kelvin_to_fahrenheit(original.min),
        kelvin_to_celsius(original.min),
        adjusted.min,
        kelvin_to_fahrenheit(adjusted.min),
        kelvin_to_celsius(adjusted.min),
        source(hourly_min)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: i64 = 1_700_000_000;

    fn day(noon: i64, sunrise: i64, temp: DailyTemperature) -> DailyRecord {
        DailyRecord {
            dt: noon,
            sunrise,
            temp,
            ..DailyRecord::default()
        }
    }

    fn temps(morn: f32, day: f32, eve: f32, night: f32) -> DailyTemperature {
        DailyTemperature {
            morn,
            day,
            eve,
            night,
            min: 100.0,
            max: 400.0,
        }
    }

    fn hour(dt: i64, temp: f32) -> HourlyRecord {
        HourlyRecord {
            dt,
            temp,
            ..HourlyRecord::default()
        }
    }

    // 日出 T 在 06:00，正午 T+6h
    fn response() -> ForecastResponse {
        let mut response = ForecastResponse::new();
        for d in 0..6 {
            let offset = d * 24 * HOUR;
            response
                .daily
                .push(day(T + 6 * HOUR + offset, T + offset, temps(280.0, 288.0, 285.0, 279.0)))
                .unwrap();
        }
        response
    }

    #[test]
    fn hourly_samples_define_high_and_low() {
        let mut response = response();
        for (dt, temp) in [
            (T - HOUR, 270.0),
            (T + 5 * HOUR, 291.5),
            (T + 12 * HOUR, 286.0),
            (T + 20 * HOUR, 275.25),
            (T + 30 * HOUR, 284.0),
        ] {
            response.hourly.push(hour(dt, temp)).unwrap();
        }

        compute_intuitive_min_max(&mut response, DebugLevel::Off);

        assert_eq!(response.daily[0].temp.max, 291.5);
        assert_eq!(response.daily[0].temp.min, 275.25);
    }

    #[test]
    fn sample_before_sunrise_is_not_daytime() {
        let mut response = response();
        response.hourly.push(hour(T - HOUR, 299.0)).unwrap();
        response.hourly.push(hour(T + HOUR, 281.0)).unwrap();

        compute_intuitive_min_max(&mut response, DebugLevel::Off);

        assert_eq!(response.daily[0].temp.max, 281.0);
    }

    #[test]
    fn falls_back_to_daily_values_without_hourly_coverage() {
        let mut response = response();
        response.daily[5].temp.morn = 276.5;
        response.daily[3].temp = temps(282.0, 290.0, 291.0, 283.0);
        response.daily[4].temp.morn = 281.0;

        compute_intuitive_min_max(&mut response, DebugLevel::Off);

        let day3 = response.daily[3].temp;
        assert_eq!(day3.max, 291.0);
        assert_eq!(day3.min, 281.0);

        let day4 = response.daily[4].temp;
        assert_eq!(day4.max, 288.0);
        assert_eq!(day4.min, 276.5);
    }

    #[test]
    fn last_populated_day_estimates_next_sunrise() {
        let mut response = ForecastResponse::new();
        response
            .daily
            .push(day(T + 6 * HOUR, T, temps(280.0, 288.0, 285.0, 279.0)))
            .unwrap();
        // 次日日出按 T+24h 估计，T+23h 仍在夜间窗口内
        response.hourly.push(hour(T + 23 * HOUR, 273.0)).unwrap();
        response.hourly.push(hour(T + 24 * HOUR, 260.0)).unwrap();

        compute_intuitive_min_max(&mut response, DebugLevel::Off);

        assert_eq!(response.daily[0].temp.min, 273.0);
    }

    #[test]
    fn fallback_without_next_day_uses_eve_and_night() {
        let mut response = ForecastResponse::<48, 1, 1>::default();
        response
            .daily
            .push(day(T + 6 * HOUR, T, temps(270.0, 288.0, 285.0, 279.0)))
            .unwrap();

        compute_intuitive_min_max(&mut response, DebugLevel::Off);

        assert_eq!(response.daily[0].temp.min, 279.0);
        assert_eq!(response.daily[0].temp.max, 288.0);
    }

    #[test]
    fn only_first_five_days_change() {
        let mut response = response();
        compute_intuitive_min_max(&mut response, DebugLevel::Off);

        assert_eq!(response.daily[5].temp.min, 100.0);
        assert_eq!(response.daily[5].temp.max, 400.0);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let mut response = response();
        response.hourly.push(hour(T + 3 * HOUR, 287.0)).unwrap();
        response.hourly.push(hour(T + 18 * HOUR, 278.0)).unwrap();

        compute_intuitive_min_max(&mut response, DebugLevel::Off);
        let once = response.clone();
        compute_intuitive_min_max(&mut response, DebugLevel::Basic);

        assert_eq!(response, once);
    }

    #[test]
    fn empty_response_is_untouched() {
        let mut response = ForecastResponse::new();
        compute_intuitive_min_max(&mut response, DebugLevel::Basic);
        assert_eq!(response, ForecastResponse::new());
    }
}
