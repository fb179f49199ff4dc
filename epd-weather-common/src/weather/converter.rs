//! 文档节点到定长记录的读取工具
//!
//! 缺失、null 或类型不符的叶子字段一律读作 0（文本读作空串），
//! 容器结构不符则返回 `StructureMismatch`。

use serde_json::{Map, Value};

use crate::types::{DeserializeError, DeserializeResult, HeaplessString, WeatherCondition};

pub type Object = Map<alloc::string::String, Value>;

pub fn object<'a>(value: Option<&'a Value>, name: &'static str) -> DeserializeResult<&'a Object> {
    value
        .and_then(Value::as_object)
        .ok_or(DeserializeError::StructureMismatch(name))
}

pub fn array<'a>(value: Option<&'a Value>, name: &'static str) -> DeserializeResult<&'a [Value]> {
    value
        .and_then(Value::as_array)
        .map(|items| items.as_slice())
        .ok_or(DeserializeError::StructureMismatch(name))
}

pub fn f32_field(object: &Object, key: &str) -> f32 {
    object.get(key).and_then(Value::as_f64).unwrap_or(0.0) as f32
}

pub fn i64_field(object: &Object, key: &str) -> i64 {
    object.get(key).map_or(0, as_i64)
}

pub fn i32_field(object: &Object, key: &str) -> i32 {
    i64_field(object, key) as i32
}

/// 形如 `"rain": {"1h": 0.5}` 的嵌套数值
pub fn nested_f32(object: &Object, key: &str, inner: &str) -> f32 {
    object
        .get(key)
        .and_then(|value| value.get(inner))
        .and_then(Value::as_f64)
        .unwrap_or(0.0) as f32
}

pub fn str_field<const N: usize>(object: &Object, key: &str) -> HeaplessString<N> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(truncate)
        .unwrap_or_default()
}

/// 超出容量的字符串在字符边界处截断
pub fn truncate<const N: usize>(text: &str) -> HeaplessString<N> {
    let mut out = HeaplessString::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// 天气状况列表的第一个元素，接口保证至少有一个
pub fn first_condition(object: &Object) -> DeserializeResult<WeatherCondition> {
    let condition = array(object.get("weather"), "weather")?
        .first()
        .and_then(Value::as_object)
        .ok_or(DeserializeError::StructureMismatch("weather"))?;

    Ok(WeatherCondition {
        id: i32_field(condition, "id"),
        main: str_field(condition, "main"),
        description: str_field(condition, "description"),
        icon: str_field(condition, "icon"),
    })
}

// 浮点数按整数读取时截断
fn as_i64(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|v| v as i64))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_and_mistyped_leaves_read_as_zero() {
        let value = json!({ "temp": "warm", "pressure": null, "rain": {} });
        let object = value.as_object().unwrap();

        assert_eq!(f32_field(object, "temp"), 0.0);
        assert_eq!(i32_field(object, "pressure"), 0);
        assert_eq!(i64_field(object, "dt"), 0);
        assert_eq!(nested_f32(object, "rain", "1h"), 0.0);
        assert_eq!(nested_f32(object, "snow", "1h"), 0.0);
    }

    #[test]
    fn floats_truncate_to_integers() {
        let value = json!({ "visibility": 9999.9, "wind_deg": -12.7 });
        let object = value.as_object().unwrap();
        assert_eq!(i32_field(object, "visibility"), 9999);
        assert_eq!(i32_field(object, "wind_deg"), -12);
    }

    #[test]
    fn long_strings_are_truncated_on_char_boundary() {
        let text: HeaplessString<4> = truncate("ab雪cd");
        assert_eq!(text.as_str(), "ab");

        let text: HeaplessString<8> = truncate("Clouds");
        assert_eq!(text.as_str(), "Clouds");
    }

    #[test]
    fn empty_condition_list_is_a_mismatch() {
        let value = json!({ "weather": [] });
        assert_eq!(
            first_condition(value.as_object().unwrap()),
            Err(DeserializeError::StructureMismatch("weather"))
        );

        let value = json!({});
        assert_eq!(
            first_condition(value.as_object().unwrap()),
            Err(DeserializeError::StructureMismatch("weather"))
        );
    }

    #[test]
    fn reads_first_condition_only() {
        let value = json!({ "weather": [
            { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" },
            { "id": 701, "main": "Mist", "description": "mist", "icon": "50d" }
        ]});
        let condition = first_condition(value.as_object().unwrap()).unwrap();
        assert_eq!(condition.id, 500);
        assert_eq!(condition.main.as_str(), "Rain");
        assert_eq!(condition.description.as_str(), "light rain");
        assert_eq!(condition.icon.as_str(), "10d");
    }
}
