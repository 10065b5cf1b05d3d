pub mod sample;
pub mod series;

pub use sample::FundingSample;
pub use series::TokenSeries;
