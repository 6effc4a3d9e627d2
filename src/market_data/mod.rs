pub mod bar;
#[cfg(test)]
pub mod fixture;
pub mod provider;
pub mod yahoo;

pub use provider::{CompanyProfile, HistoryRequest, MarketDataProvider, MarketSnapshot, ProviderError};
pub use yahoo::YahooChartClient;
