pub mod config;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod taxonomy;
pub mod utils;
