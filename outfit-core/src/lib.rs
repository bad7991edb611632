//! Core library for the `outfit` CLI.
//!
//! This crate defines:
//! - The effective-temperature calculation and the clothing classifier
//! - Shared domain models and the JSON shapes exchanged with callers
//! - Abstractions over the image-search and translation services
//! - Configuration & credentials handling
//!
//! The recommendation itself is a pure function: see [`evaluate`].

pub mod classifier;
pub mod config;
pub mod effective;
pub mod enrich;
pub mod error;
pub mod model;
pub mod service;
pub mod transport;

pub use classifier::{classify, evaluate};
pub use config::{Config, ServerConfig, ServiceConfig};
pub use effective::compute_effective_temperature;
pub use enrich::collect_images;
pub use error::{InvalidInput, RequestError, ServiceError};
pub use model::{Category, ClothingRecommendation, WeatherReading};
pub use service::{ImageLookup, ServiceId, Translator};
pub use transport::{RecommendationRequest, RecommendationResponse};
