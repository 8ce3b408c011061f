//! Finboard - personal finance aggregation and projection
//!
//! This library loads exported finance records (transactions, investments,
//! fixed deposits, provident funds, precious metals and insurance policies)
//! and computes summaries, returns, compound-growth projections and a
//! combined portfolio valuation from them. Nothing is persisted; every
//! figure is derived on demand from the records passed in.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod pricing;
pub mod records;
pub mod utils;
