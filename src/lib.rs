// Public API for integration tests and potential library usage

pub mod api;
pub mod auth;
pub mod broadcast;
pub mod config;
pub mod engine;
pub mod protocol;
pub mod questions;
pub mod server;
pub mod simulate;
pub mod state;
pub mod types;
pub mod ws;
