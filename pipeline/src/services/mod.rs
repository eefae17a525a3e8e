pub mod aggregator;
pub mod classifier;
#[cfg(feature = "youtube_data_api")]
pub mod fetcher;
pub mod generator;
pub mod language;
pub mod raw_cache;
pub mod sample;
pub mod writer;
