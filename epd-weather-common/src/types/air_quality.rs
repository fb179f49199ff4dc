use super::config::AIR_MAX;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinates {
    pub lat: f32,
    pub lon: f32,
}

/// 污染物浓度，单位 µg/m³
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pollutants {
    pub co: f32,
    pub no: f32,
    pub no2: f32,
    pub o3: f32,
    pub so2: f32,
    pub pm2_5: f32,
    pub pm10: f32,
    pub nh3: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AirQualitySample {
    pub dt: i64,
    /// 空气质量指数 1-5
    pub main_aqi: i32,
    pub components: Pollutants,
}

// 每个样本自带时间戳和全部分量，索引 i 天然指向同一时刻
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirQualityResponse<const N: usize = AIR_MAX> {
    pub coord: Coordinates,
    pub samples: heapless::Vec<AirQualitySample, N>,
}

impl AirQualityResponse {
    pub fn new() -> Self {
        Self::default()
    }
}
