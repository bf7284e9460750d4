//! HTTP handlers for resources, sessions, and uploads.

pub mod application;
pub mod auth;
pub mod enquiry;
pub mod product;
pub mod resource;
pub mod upload;
