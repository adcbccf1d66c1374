//! # LMI Rust Backend
//!
//! Labor-market intelligence dashboard backend.
//!
//! This crate serves monthly BLS labor-market series (JOLTS job openings,
//! CPS unemployment and participation rates) as chart-ready views, and
//! computes an AI-skill demand signal over federal job postings from
//! USAJOBS. The backend exposes a REST API via Axum for the dashboard
//! frontend.
//!
//! ## Features
//!
//! - **Series transforms**: range filtering anchored to the latest data,
//!   sector pivoting, OLS trendlines, padded Y-axis domains
//! - **Keyword signal**: AI-keyword matching over posting text with
//!   per-sector aggregation and daily snapshots
//! - **Analysis**: market analysis report and unemployment-rate overview
//! - **Ingest**: BLS and USAJOBS clients with a background refresh loop
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`models`]: month keys, sectors, series records, time ranges
//! - [`services`]: transform engines, keyword signal, analysis reports
//! - [`db`]: repository pattern and persistence layer
//! - [`ingest`]: BLS/USAJOBS clients, TTL cache, refresh orchestration
//! - [`config`]: TOML + environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod config;
pub mod db;
pub mod ingest;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
