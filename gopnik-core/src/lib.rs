//! Core library for the `gopnik` weather advisor.
//!
//! This crate defines:
//! - Shared domain models (coordinates, city queries, weather snapshots)
//! - The failure taxonomy for resolution and upstream errors
//! - Clients for the geocoding and weather endpoints
//! - Pluggable advice strategies (rule-based and generative)
//! - The request pipeline tying it all together
//!
//! It is used by `gopnik-cli`, but can also be reused by other binaries or services.

pub mod advice;
pub mod config;
pub mod error;
pub mod geocode;
pub mod model;
pub mod pipeline;
pub mod weather;

pub use advice::{AdviceStrategy, StrategyId};
pub use config::{Config, GenerativeConfig};
pub use error::ResolutionFailure;
pub use geocode::GeocodingClient;
pub use model::{AdviceResult, CityQuery, Coordinates, WeatherSnapshot};
pub use pipeline::{RequestInput, RequestPipeline};
pub use weather::WeatherClient;
