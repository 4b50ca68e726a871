//! Sales service: bearer-token authentication and CRUD over sale records,
//! backed by a document store.

pub mod config;
pub mod error;
pub mod hash;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod storage;
