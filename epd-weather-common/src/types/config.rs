/// 逐小时预报容量（约 48 小时）
pub const HOURLY_MAX: usize = 48;
/// 每日预报容量
pub const DAILY_MAX: usize = 8;
/// 天气预警容量
pub const ALERTS_MAX: usize = 8;
/// 空气质量样本容量
pub const AIR_MAX: usize = 24;

pub const INPUT_BUFFER_SIZE: usize = 80 * 1024;
pub const DOCUMENT_CAPACITY: usize = 48 * 1024;
pub const NESTING_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebugLevel {
    #[default]
    Off,
    /// 输出文档占用、溢出以及最高/最低温度调整
    Basic,
    /// 额外输出过滤后的完整文档
    Verbose,
}

impl DebugLevel {
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => DebugLevel::Off,
            1 => DebugLevel::Basic,
            _ => DebugLevel::Verbose,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherConfig {
    pub display_alerts: bool,
    pub intuitive_min_max: bool,
    pub debug_level: DebugLevel,
    pub input_buffer_size: usize,
    pub document_capacity: usize,
    pub nesting_limit: usize,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            display_alerts: true,
            intuitive_min_max: true,
            debug_level: DebugLevel::Off,
            input_buffer_size: INPUT_BUFFER_SIZE,
            document_capacity: DOCUMENT_CAPACITY,
            nesting_limit: NESTING_LIMIT,
        }
    }
}
