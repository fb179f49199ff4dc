//! 有界 JSON 文档读取
//!
//! 数据流先读入有上限的工作缓冲区，再经过滤器解析成精简的文档树。
//! 被排除的字段在解析过程中直接跳过，保留下来的节点按容量计费，
//! 超出容量即判定为溢出，避免按不可信输入的大小无限分配内存。

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use embedded_io::Read;
use serde::Deserialize;
use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_json::error::Category;
use serde_json::{Map, Number, Value};

use super::filter::FieldFilter;
use crate::types::{DebugLevel, DeserializeError, DeserializeResult, WeatherConfig};
use crate::{info, warn};

/// 每个保留节点的固定开销（字节），字符串另按长度计费
pub const SLOT_SIZE: usize = 16;

const READ_CHUNK_SIZE: usize = 512;

/// 过滤后的 JSON 文档
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
    memory_usage: usize,
}

impl Document {
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// 已占用的文档容量（字节）
    pub fn memory_usage(&self) -> usize {
        self.memory_usage
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }
}

/// 从数据流读取一份文档并应用过滤器
pub fn read_document<R: Read>(
    reader: &mut R,
    filter: &'static FieldFilter,
    config: &WeatherConfig,
) -> DeserializeResult<Document> {
    let json = read_bounded(reader, config.input_buffer_size)?;
    let result = parse_document(&json, filter, config);

    if config.debug_level >= DebugLevel::Basic {
        match &result {
            Ok(document) => info!(
                "[debug] document usage: {}/{} bytes, overflowed: false",
                document.memory_usage(),
                config.document_capacity
            ),
            Err(DeserializeError::BufferOverflow) => info!(
                "[debug] document overflowed, capacity {} bytes",
                config.document_capacity
            ),
            Err(_) => {}
        }
    }
    if config.debug_level >= DebugLevel::Verbose {
        if let Ok(document) = &result {
            let pretty = format!("{:#}", document.root());
            info!("{}", pretty.as_str());
        }
    }

    result
}

/// 解析内存中的 JSON，解析时即跳过过滤器排除的字段
pub fn parse_document(
    json: &[u8],
    filter: &'static FieldFilter,
    config: &WeatherConfig,
) -> DeserializeResult<Document> {
    if json.iter().all(u8::is_ascii_whitespace) {
        return Err(DeserializeError::EmptyInput);
    }

    let budget = Budget::new(config.document_capacity, config.nesting_limit);
    let mut deserializer = serde_json::Deserializer::from_slice(json);
    let parsed = FilteredValue {
        filter,
        budget: &budget,
        depth: 0,
    }
    .deserialize(&mut deserializer)
    .and_then(|root| deserializer.end().map(|()| root));

    // 容量和深度的失败优先于 serde_json 自己的分类
    let root = parsed.map_err(|err| budget.failure.get().unwrap_or_else(|| classify(&err)))?;

    Ok(Document {
        root,
        memory_usage: budget.used.get(),
    })
}

fn read_bounded<R: Read>(reader: &mut R, limit: usize) -> DeserializeResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        let read = reader
            .read(&mut chunk)
            .map_err(|_| DeserializeError::StreamRead)?;
        if read == 0 {
            break;
        }
        if buffer.len() + read > limit {
            warn!("Input stream exceeds {} byte buffer", limit);
            return Err(DeserializeError::BufferOverflow);
        }
        buffer.extend_from_slice(&chunk[..read]);
    }

    Ok(buffer)
}

fn classify(error: &serde_json::Error) -> DeserializeError {
    match error.classify() {
        Category::Eof => DeserializeError::IncompleteInput,
        Category::Io => DeserializeError::StreamRead,
        _ => DeserializeError::InvalidInput,
    }
}

struct Budget {
    capacity: usize,
    nesting_limit: usize,
    used: Cell<usize>,
    failure: Cell<Option<DeserializeError>>,
}

impl Budget {
    fn new(capacity: usize, nesting_limit: usize) -> Self {
        Self {
            capacity,
            nesting_limit,
            used: Cell::new(0),
            failure: Cell::new(None),
        }
    }

    fn charge<E: de::Error>(&self, bytes: usize) -> Result<(), E> {
        let used = self.used.get().saturating_add(bytes);
        if used > self.capacity {
            return Err(self.fail(DeserializeError::BufferOverflow));
        }
        self.used.set(used);
        Ok(())
    }

    fn enter<E: de::Error>(&self, depth: usize) -> Result<(), E> {
        if depth >= self.nesting_limit {
            return Err(self.fail(DeserializeError::TooDeep));
        }
        Ok(())
    }

    fn fail<E: de::Error>(&self, error: DeserializeError) -> E {
        self.failure.set(Some(error));
        E::custom(error)
    }
}

struct FilteredValue<'b> {
    filter: &'static FieldFilter,
    budget: &'b Budget,
    depth: usize,
}

impl<'b> FilteredValue<'b> {
    fn child(&self, filter: &'static FieldFilter) -> Self {
        FilteredValue {
            filter,
            budget: self.budget,
            depth: self.depth + 1,
        }
    }

    fn scalar<E: de::Error>(&self, value: Value) -> Result<Value, E> {
        if !self.filter.accepts_scalar() {
            return Ok(Value::Null);
        }
        self.budget.charge::<E>(SLOT_SIZE)?;
        Ok(value)
    }
}

impl<'de> DeserializeSeed<'de> for FilteredValue<'_> {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        if self.filter.is_excluded() {
            IgnoredAny::deserialize(deserializer)?;
            return Ok(Value::Null);
        }
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for FilteredValue<'_> {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        self.scalar(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        self.scalar(Value::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        self.scalar(Value::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        self.scalar(Number::from_f64(v).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        if !self.filter.accepts_scalar() {
            return Ok(Value::Null);
        }
        self.budget.charge::<E>(SLOT_SIZE + v.len())?;
        Ok(Value::String(String::from(v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        self.scalar(Value::Null)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        if !self.filter.accepts_array() {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            return Ok(Value::Null);
        }
        self.budget.enter::<A::Error>(self.depth)?;
        self.budget.charge::<A::Error>(SLOT_SIZE)?;

        let element = self.filter.element();
        let mut items = Vec::new();
        while let Some(item) = seq.next_element_seed(self.child(element))? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        if !self.filter.accepts_object() {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            return Ok(Value::Null);
        }
        self.budget.enter::<A::Error>(self.depth)?;
        self.budget.charge::<A::Error>(SLOT_SIZE)?;

        let mut members = Map::new();
        while let Some(key) = map.next_key_seed(MemberKey {
            filter: self.filter,
            budget: self.budget,
        })? {
            match key {
                Some((name, filter)) => {
                    let value = map.next_value_seed(self.child(filter))?;
                    members.insert(name, value);
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(Value::Object(members))
    }
}

/// 读取对象键并查出其过滤器，被排除的键不分配内存
struct MemberKey<'b> {
    filter: &'static FieldFilter,
    budget: &'b Budget,
}

impl<'de> DeserializeSeed<'de> for MemberKey<'_> {
    type Value = Option<(String, &'static FieldFilter)>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(self)
    }
}

impl<'de> Visitor<'de> for MemberKey<'_> {
    type Value = Option<(String, &'static FieldFilter)>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object key")
    }

    fn visit_str<E: de::Error>(self, key: &str) -> Result<Self::Value, E> {
        let filter = self.filter.member(key);
        if filter.is_excluded() {
            return Ok(None);
        }
        self.budget.charge::<E>(key.len())?;
        Ok(Some((String::from(key), filter)))
    }
}
