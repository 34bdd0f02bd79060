//! Core business logic abstractions

pub mod asset;
pub mod cache;
pub mod clock;
pub mod config;
pub mod currency;
pub mod log;
pub mod rate;

// Re-export main types for cleaner imports
pub use asset::{Asset, AssetProvider, CurrencyCode};
pub use cache::RateCache;
pub use clock::{Clock, SystemClock};
pub use currency::CurrencyListProvider;
pub use rate::{RateRecord, RateSource};
