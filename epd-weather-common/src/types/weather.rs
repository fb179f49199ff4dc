use super::config::{ALERTS_MAX, DAILY_MAX, HOURLY_MAX};

pub type HeaplessString<const N: usize> = heapless::String<N>;

// 所有温度均为开尔文，单位换算留给显示层

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherCondition {
    pub id: i32,
    pub main: HeaplessString<16>,
    pub description: HeaplessString<48>,
    pub icon: HeaplessString<8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentConditions {
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub temp: f32,
    pub feels_like: f32,
    pub pressure: i32,
    pub humidity: i32,
    pub dew_point: f32,
    pub clouds: i32,
    pub uvi: f32,
    pub visibility: i32,
    pub wind_speed: f32,
    pub wind_gust: f32,
    pub wind_deg: i32,
    pub rain_1h: f32,
    pub snow_1h: f32,
    pub weather: WeatherCondition,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HourlyRecord {
    pub dt: i64,
    pub temp: f32,
    pub feels_like: f32,
    pub pressure: i32,
    pub humidity: i32,
    pub dew_point: f32,
    pub clouds: i32,
    pub uvi: f32,
    pub visibility: i32,
    pub wind_speed: f32,
    pub wind_gust: f32,
    pub wind_deg: i32,
    /// 降水概率 0-1
    pub pop: f32,
    pub rain_1h: f32,
    pub snow_1h: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyTemperature {
    pub morn: f32,
    pub day: f32,
    pub eve: f32,
    pub night: f32,
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyRecord {
    /// 通常为当地正午
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub moonrise: i64,
    pub moonset: i64,
    pub moon_phase: f32,
    pub temp: DailyTemperature,
    /// 接口只提供 morn/day/eve/night，min/max 保持为 0
    pub feels_like: DailyTemperature,
    pub pressure: i32,
    pub humidity: i32,
    pub dew_point: f32,
    pub clouds: i32,
    pub uvi: f32,
    pub visibility: i32,
    pub wind_speed: f32,
    pub wind_gust: f32,
    pub wind_deg: i32,
    pub pop: f32,
    pub rain: f32,
    pub snow: f32,
    pub weather: WeatherCondition,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alert {
    pub event: HeaplessString<64>,
    pub start: i64,
    pub end: i64,
    /// 只保留第一个标签
    pub tags: HeaplessString<32>,
}

/// One Call 预报响应，容量由常量泛型在编译期固定
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastResponse<
    const H: usize = HOURLY_MAX,
    const D: usize = DAILY_MAX,
    const A: usize = ALERTS_MAX,
> {
    pub lat: f32,
    pub lon: f32,
    pub timezone: HeaplessString<48>,
    pub timezone_offset: i32,
    pub current: CurrentConditions,
    pub hourly: heapless::Vec<HourlyRecord, H>,
    pub daily: heapless::Vec<DailyRecord, D>,
    pub alerts: heapless::Vec<Alert, A>,
}

impl ForecastResponse {
    pub fn new() -> Self {
        Self::default()
    }
}
