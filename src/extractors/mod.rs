//! Request extractors: caller session and JSON bodies.

pub mod json;
pub mod session;

pub use json::JsonBody;
pub use session::{AdminSession, Session};
