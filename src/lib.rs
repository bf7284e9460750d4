//! Storefront API: JSON REST backend for a web-design marketplace.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod mail;
pub mod model;
pub mod persistence;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod upload;

pub use auth::SessionGate;
pub use config::Config;
pub use error::{AppError, ConfigError, StoreError};
pub use persistence::{connector_for, Persistence, StoreHandle};
pub use response::Envelope;
pub use routes::app;
pub use state::AppState;
pub use store::{Collection, Document, DocumentStore};
