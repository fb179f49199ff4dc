pub mod air_pollution;
pub mod converter;
pub mod document;
pub mod filter;
pub mod min_max;
pub mod onecall;

pub use air_pollution::deserialize_air_quality;
pub use document::{Document, parse_document, read_document};
pub use filter::{FieldFilter, ONE_CALL_FILTER, ONE_CALL_FILTER_WITH_ALERTS, one_call_filter};
pub use min_max::{INTUITIVE_DAYS, compute_intuitive_min_max};
pub use onecall::deserialize_one_call;

use embedded_io::Read;

use crate::types::{DeserializeResult, ForecastResponse, WeatherConfig};

/// 刷新周期中读取预报：反序列化成功后按配置重算直观最高/最低温度
pub fn load_forecast<R: Read, const H: usize, const D: usize, const A: usize>(
    reader: &mut R,
    response: &mut ForecastResponse<H, D, A>,
    config: &WeatherConfig,
) -> DeserializeResult<()> {
    deserialize_one_call(reader, response, config)?;
    if config.intuitive_min_max {
        compute_intuitive_min_max(response, config.debug_level);
    }
    Ok(())
}
