//! # WPA Rust Backend
//!
//! Historical weather probability analysis engine.
//!
//! This crate estimates the historical probability that a weather variable
//! (temperature, precipitation, wind speed, humidity, air quality) exceeds a
//! user-defined threshold at a given location and date window, using
//! multi-year historical samples. It serves planners who need probability
//! estimates derived from past observations, not forecasts.
//!
//! ## Features
//!
//! - **Statistics**: Summary statistics, percentile tables, and threshold
//!   exceedance probabilities per variable
//! - **Trend Analysis**: Ordinary least-squares trend fitting with R² and
//!   qualitative significance labels
//! - **Distributions**: Fixed-bin histograms and exceed/normal probability
//!   splits
//! - **Sample Providers**: Pluggable data acquisition behind a trait, with a
//!   deterministic coordinate-seeded synthetic provider for development
//! - **Export**: Flat CSV, nested JSON, and plain-text report renderings
//! - **HTTP API**: Optional axum-based REST endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain types for requests, samples, and analysis results
//! - [`provider`]: The `SampleProvider` trait and its synthetic implementation
//! - [`services`]: Statistics, trend, distribution, and orchestration logic
//! - [`export`]: Tabular and document renderings of analysis results
//! - [`cache`]: Injectable TTL cache for completed analyses
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod provider;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
