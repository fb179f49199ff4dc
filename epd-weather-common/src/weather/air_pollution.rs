//! 空气质量反序列化
//!
//! 负载本身很小，不使用字段过滤器。

use embedded_io::Read;

use super::converter::{Object, array, f32_field, i32_field, i64_field, object};
use super::document::{Document, read_document};
use super::filter::FieldFilter;
use crate::types::{
    AirQualityResponse, AirQualitySample, Coordinates, DeserializeResult, Pollutants,
    WeatherConfig,
};
use crate::{debug, warn};

pub fn deserialize_air_quality<R: Read, const N: usize>(
    reader: &mut R,
    response: &mut AirQualityResponse<N>,
    config: &WeatherConfig,
) -> DeserializeResult<()> {
    let result = read_document(reader, &FieldFilter::Include, config)
        .and_then(|document| populate(&document, response));

    match result {
        Ok(()) => debug!("Air quality parsed: {} samples", response.samples.len()),
        Err(e) => warn!("Air quality deserialization failed: {:?}", e),
    }
    result
}

fn populate<const N: usize>(
    document: &Document,
    response: &mut AirQualityResponse<N>,
) -> DeserializeResult<()> {
    *response = AirQualityResponse::default();

    let root = object(Some(document.root()), "root")?;
    let coord = object(root.get("coord"), "coord")?;
    response.coord = Coordinates {
        lat: f32_field(coord, "lat"),
        lon: f32_field(coord, "lon"),
    };

    for item in array(root.get("list"), "list")? {
        if response.samples.is_full() {
            break;
        }
        let sample = parse_sample(object(Some(item), "list")?);
        response.samples.push(sample).ok();
    }

    Ok(())
}

fn parse_sample(sample: &Object) -> AirQualitySample {
    let main = sample.get("main").and_then(|main| main.as_object());
    let components = sample.get("components").and_then(|c| c.as_object());

    AirQualitySample {
        dt: i64_field(sample, "dt"),
        main_aqi: main.map_or(0, |main| i32_field(main, "aqi")),
        components: components.map(parse_pollutants).unwrap_or_default(),
    }
}

fn parse_pollutants(components: &Object) -> Pollutants {
    Pollutants {
        co: f32_field(components, "co"),
        no: f32_field(components, "no"),
        no2: f32_field(components, "no2"),
        o3: f32_field(components, "o3"),
        so2: f32_field(components, "so2"),
        pm2_5: f32_field(components, "pm2_5"),
        pm10: f32_field(components, "pm10"),
        nh3: f32_field(components, "nh3"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeserializeError;
    use serde_json::{Value, json};

    fn sample(i: i64) -> Value {
        json!({
            "main": { "aqi": 1 + i % 5 },
            "components": {
                "co": 201.94 + i as f64, "no": 0.01, "no2": 0.77, "o3": 68.66,
                "so2": 0.64, "pm2_5": 0.5 + i as f64, "pm10": 0.54, "nh3": 0.12
            },
            "dt": 1_606_147_200 + i * 3600
        })
    }

    fn payload(count: i64) -> alloc::string::String {
        let list: alloc::vec::Vec<Value> = (0..count).map(sample).collect();
        json!({ "coord": { "lon": 50.0, "lat": 50.25 }, "list": list }).to_string()
    }

    fn parse<const N: usize>(
        json: &str,
        response: &mut AirQualityResponse<N>,
    ) -> DeserializeResult<()> {
        deserialize_air_quality(&mut json.as_bytes(), response, &WeatherConfig::default())
    }

    #[test]
    fn samples_keep_source_order() {
        let mut response = AirQualityResponse::new();
        parse(&payload(5), &mut response).unwrap();

        assert_eq!(response.coord, Coordinates { lat: 50.25, lon: 50.0 });
        assert_eq!(response.samples.len(), 5);
        for (i, s) in response.samples.iter().enumerate() {
            let i = i as i64;
            assert_eq!(s.dt, 1_606_147_200 + i * 3600);
            assert_eq!(s.main_aqi, (1 + i % 5) as i32);
            assert_eq!(s.components.co, (201.94 + i as f64) as f32);
            assert_eq!(s.components.pm2_5, (0.5 + i as f64) as f32);
            assert_eq!(s.components.nh3, 0.12);
        }
    }

    #[test]
    fn stops_at_capacity() {
        let mut response = AirQualityResponse::<3>::default();
        parse(&payload(7), &mut response).unwrap();

        assert_eq!(response.samples.len(), 3);
        assert_eq!(response.samples[2].dt, 1_606_147_200 + 2 * 3600);
    }

    #[test]
    fn missing_components_default_to_zero() {
        let json = json!({ "coord": { "lon": 1.0, "lat": 2.0 }, "list": [{ "dt": 5 }] });
        let json = json.to_string();
        let mut response = AirQualityResponse::new();
        parse(&json, &mut response).unwrap();

        assert_eq!(response.samples[0].main_aqi, 0);
        assert_eq!(response.samples[0].components, Pollutants::default());
    }

    #[test]
    fn requires_coord_and_list() {
        let mut response = AirQualityResponse::new();
        assert_eq!(
            parse(r#"{"list":[]}"#, &mut response),
            Err(DeserializeError::StructureMismatch("coord"))
        );
        assert_eq!(
            parse(r#"{"coord":{"lat":1,"lon":2}}"#, &mut response),
            Err(DeserializeError::StructureMismatch("list"))
        );
        assert_eq!(
            parse(r#"{"coord":{"lat":1,"lon":2},"list":[1]}"#, &mut response),
            Err(DeserializeError::StructureMismatch("list"))
        );
    }
}
