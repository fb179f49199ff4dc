//! 温度单位换算，仅供调试输出和显示层使用

pub fn kelvin_to_celsius(kelvin: f32) -> f32 {
    kelvin - 273.15
}

pub fn kelvin_to_fahrenheit(kelvin: f32) -> f32 {
    kelvin * 9.0 / 5.0 - 459.67
}
