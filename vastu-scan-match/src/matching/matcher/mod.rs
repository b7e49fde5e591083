//! Real-time correlative scan matcher.

mod core;

pub use self::core::RealTimeCorrelativeMatcher;
