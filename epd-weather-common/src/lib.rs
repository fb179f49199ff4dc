#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod types;
pub mod units;
pub mod weather;

cfg_if::cfg_if! {
    if #[cfg(feature = "log")] {
        pub use log::{trace, debug, info, warn, error};
    }
    else if #[cfg(feature = "defmt")] {
        pub use defmt::{trace, debug, info, warn, error};
    }
}

// 无日志后端时的空实现，需直接定义在 crate 根，才能通过 `crate::` 路径引用
#[cfg(not(any(feature = "log", feature = "defmt")))]
#[macro_export]
macro_rules! trace {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {{
        let _ = ($fmt, $(&$arg),*);
    }};
}
#[cfg(not(any(feature = "log", feature = "defmt")))]
#[macro_export]
macro_rules! debug {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {{
        let _ = ($fmt, $(&$arg),*);
    }};
}
#[cfg(not(any(feature = "log", feature = "defmt")))]
#[macro_export]
macro_rules! info {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {{
        let _ = ($fmt, $(&$arg),*);
    }};
}
#[cfg(not(any(feature = "log", feature = "defmt")))]
#[macro_export]
macro_rules! warn {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {{
        let _ = ($fmt, $(&$arg),*);
    }};
}
#[cfg(not(any(feature = "log", feature = "defmt")))]
#[macro_export]
macro_rules! error {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {{
        let _ = ($fmt, $(&$arg),*);
    }};
}

pub use types::*;
pub use weather::*;

#[cfg(all(test, not(any(feature = "log", feature = "defmt"))))]
mod tests {
    use crate::{debug, error, info, trace, warn};

    #[test]
    fn silent_macros_accept_format_arguments() {
        let value = 42;
        let () = trace!("value {}", value);
        let () = debug!("value {:?}", value);
        let () = info!("value {}", value);
        let () = warn!("{} {}", value, "warn");
        let () = error!("done");
    }
}
