pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod push;
pub mod services;
pub mod validation;
pub mod weather;

pub use app::app;
