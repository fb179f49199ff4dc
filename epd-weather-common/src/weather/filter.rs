//! 字段过滤器
//!
//! 解析时按键路径决定保留哪些字段，未选中的子树直接跳过、不分配内存。
//! 对象中未列出的键一律排除。

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldFilter {
    /// 跳过整个子树
    Exclude,
    /// 保留整个子树
    Include,
    /// 只保留列出的成员
    Object(&'static [(&'static str, FieldFilter)]),
    /// 对数组的每个元素应用同一个过滤器
    Elements(&'static FieldFilter),
}

impl FieldFilter {
    /// 对象成员 `key` 对应的过滤器
    pub fn member(&self, key: &str) -> &'static FieldFilter {
        match *self {
            FieldFilter::Include => &FieldFilter::Include,
            FieldFilter::Object(members) => members
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, filter)| filter)
                .unwrap_or(&FieldFilter::Exclude),
            FieldFilter::Exclude | FieldFilter::Elements(_) => &FieldFilter::Exclude,
        }
    }

    /// 数组元素对应的过滤器
    pub fn element(&self) -> &'static FieldFilter {
        match *self {
            FieldFilter::Include => &FieldFilter::Include,
            FieldFilter::Elements(filter) => filter,
            FieldFilter::Exclude | FieldFilter::Object(_) => &FieldFilter::Exclude,
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, FieldFilter::Exclude)
    }

    pub fn accepts_object(&self) -> bool {
        matches!(self, FieldFilter::Include | FieldFilter::Object(_))
    }

    pub fn accepts_array(&self) -> bool {
        matches!(self, FieldFilter::Include | FieldFilter::Elements(_))
    }

    pub fn accepts_scalar(&self) -> bool {
        matches!(self, FieldFilter::Include)
    }
}

// 预警的 sender_name 和 description 可能很长，过滤掉以节省内存
const ALERT_FILTER: FieldFilter = FieldFilter::Object(&[
    ("sender_name", FieldFilter::Exclude),
    ("event", FieldFilter::Include),
    ("start", FieldFilter::Include),
    ("end", FieldFilter::Include),
    ("description", FieldFilter::Exclude),
    ("tags", FieldFilter::Include),
]);

pub const ONE_CALL_FILTER: FieldFilter = FieldFilter::Object(&[
    ("lat", FieldFilter::Include),
    ("lon", FieldFilter::Include),
    ("timezone", FieldFilter::Include),
    ("timezone_offset", FieldFilter::Include),
    ("current", FieldFilter::Include),
    // 分钟级降水暂未使用
    ("minutely", FieldFilter::Exclude),
    ("hourly", FieldFilter::Include),
    ("daily", FieldFilter::Include),
    ("alerts", FieldFilter::Exclude),
]);

pub const ONE_CALL_FILTER_WITH_ALERTS: FieldFilter = FieldFilter::Object(&[
    ("lat", FieldFilter::Include),
    ("lon", FieldFilter::Include),
    ("timezone", FieldFilter::Include),
    ("timezone_offset", FieldFilter::Include),
    ("current", FieldFilter::Include),
    ("minutely", FieldFilter::Exclude),
    ("hourly", FieldFilter::Include),
    ("daily", FieldFilter::Include),
    ("alerts", FieldFilter::Elements(&ALERT_FILTER)),
]);

pub fn one_call_filter(display_alerts: bool) -> &'static FieldFilter {
    if display_alerts {
        &ONE_CALL_FILTER_WITH_ALERTS
    } else {
        &ONE_CALL_FILTER
    }
}
