pub mod app_config;
pub mod client;
pub mod mock;
pub mod token;

pub use client::ProviderClient;
pub use token::{Clock, SystemClock, TokenManager};
