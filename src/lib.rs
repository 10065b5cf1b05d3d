pub mod analysis;
pub mod config;
pub mod error;
pub mod history;
pub mod hyperliquid;
pub mod model;
#[cfg(feature = "plot")]
pub mod plot;
pub mod report;
