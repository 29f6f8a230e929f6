//! # E-commerce Insight Backend
//!
//! Synthetic analytics engine for a retail dashboard.
//!
//! This crate produces the data behind a multi-page e-commerce dashboard:
//! traffic trends, activity heatmaps, conversion funnels, navigation flows,
//! customer segmentation and short-term forecasts. Every figure is generated
//! from a small set of static tables and bounded random draws, so the output
//! is plausible without any backing data store. The backend exposes a REST
//! API via Axum for the dashboard frontend.
//!
//! ## Architecture
//!
//! - [`models`]: Value objects (dates, series, funnels, flow graphs, segmentations)
//! - [`services`]: Generators and the [`services::AggregationFacade`]
//! - [`config`]: Static tables and generator parameters, loaded from TOML
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`routes`]: Per-page payload types and route functions
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Randomness
//!
//! Generators never reach for a global random source. Each call takes
//! `&mut impl rand::Rng`, so a seeded `StdRng` reproduces a bundle exactly.

#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use config::AnalyticsConfig;
pub use error::{AnalyticsError, AnalyticsResult};
pub use services::AggregationFacade;
