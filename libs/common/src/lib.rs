//! Common library for the sales application
//!
//! This crate provides shared functionality used across the application,
//! including document-store connectivity and store-level error handling.

pub mod database;
pub mod error;
