pub mod air_quality;
pub mod config;
pub mod error;
pub mod weather;

pub use air_quality::*;
pub use config::*;
pub use error::*;
pub use weather::*;
