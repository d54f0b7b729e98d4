//! Candle and sentiment providers.

pub mod binance;
pub mod coinbase;
pub mod cryptocompare;
pub mod fallback;
pub mod provider;
pub mod synthetic;

pub use binance::BinanceProvider;
pub use coinbase::CoinbaseProvider;
pub use cryptocompare::CryptoCompareProvider;
pub use fallback::FallbackProvider;
pub use provider::{parse_symbol, CandleProvider, ProviderError, SentimentProvider};
pub use synthetic::SyntheticProvider;
