//! Data models for the sales service

pub mod sale;
pub mod user;

pub use sale::Sale;
pub use user::{User, UserProfile};
