//! PC 端模拟：用本地 JSON 文件代替网络数据流，走一遍设备的刷新流程

use std::env;
use std::fs;

use anyhow::{Context, Result, anyhow};
use epd_weather_common::units::kelvin_to_celsius;
use epd_weather_common::*;

const DEFAULT_ONE_CALL_PATH: &str = "onecall.json";

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config_from_env()?;
    info!("Simulator config: {:?}", config);

    let mut args = env::args().skip(1);
    let one_call_path = args.next().unwrap_or_else(|| DEFAULT_ONE_CALL_PATH.to_string());
    let air_quality_path = args.next();

    let json = fs::read(&one_call_path)
        .with_context(|| format!("读取预报文件失败: {}", one_call_path))?;
    let mut forecast = ForecastResponse::new();
    match load_forecast(&mut json.as_slice(), &mut forecast, &config) {
        Ok(()) => log_forecast(&forecast),
        // 设备上此时跳过本轮刷新，保留上一次的画面
        Err(e) => error!("Forecast refresh skipped: {}", e),
    }

    if let Some(path) = air_quality_path {
        let json = fs::read(&path).with_context(|| format!("读取空气质量文件失败: {}", path))?;
        let mut air_quality = AirQualityResponse::new();
        match deserialize_air_quality(&mut json.as_slice(), &mut air_quality, &config) {
            Ok(()) => log_air_quality(&air_quality),
            Err(e) => error!("Air quality refresh skipped: {}", e),
        }
    }

    Ok(())
}

fn config_from_env() -> Result<WeatherConfig> {
    let mut config = WeatherConfig::default();

    if let Some(value) = env_flag("EPD_DISPLAY_ALERTS")? {
        config.display_alerts = value;
    }
    if let Some(value) = env_flag("EPD_INTUITIVE_MIN_MAX")? {
        config.intuitive_min_max = value;
    }
    if let Ok(level) = env::var("EPD_DEBUG_LEVEL") {
        let level: u8 = level
            .trim()
            .parse()
            .with_context(|| format!("EPD_DEBUG_LEVEL 无效: {}", level))?;
        config.debug_level = DebugLevel::from_level(level);
    }

    Ok(config)
}

fn env_flag(name: &str) -> Result<Option<bool>> {
    let Ok(value) = env::var(name) else {
        return Ok(None);
    };
    match value.trim() {
        "1" | "true" | "yes" => Ok(Some(true)),
        "0" | "false" | "no" => Ok(Some(false)),
        other => Err(anyhow!("{} 无效: {}", name, other)),
    }
}

fn log_forecast(forecast: &ForecastResponse) {
    info!(
        "{} ({}, {}) | 当前 {:.1}℃ {} | {} 小时 / {} 天预报",
        forecast.timezone,
        forecast.lat,
        forecast.lon,
        kelvin_to_celsius(forecast.current.temp),
        forecast.current.weather.description,
        forecast.hourly.len(),
        forecast.daily.len()
    );

    for (index, day) in forecast.daily.iter().take(INTUITIVE_DAYS).enumerate() {
        info!(
            "Day {}: {:.1}℃ - {:.1}℃ {}",
            index,
            kelvin_to_celsius(day.temp.min),
            kelvin_to_celsius(day.temp.max),
            day.weather.main
        );
    }

    for alert in &forecast.alerts {
        warn!("Alert: {} [{}] {} - {}", alert.event, alert.tags, alert.start, alert.end);
    }
}

fn log_air_quality(air_quality: &AirQualityResponse) {
    let Some(latest) = air_quality.samples.first() else {
        warn!("Air quality response has no samples");
        return;
    };
    info!(
        "AQI {} | PM2.5 {} µg/m³ | PM10 {} µg/m³ | {} 条样本",
        latest.main_aqi,
        latest.components.pm2_5,
        latest.components.pm10,
        air_quality.samples.len()
    );
}
