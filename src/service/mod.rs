//! ResourceService: generic CRUD over the document store.

mod crud;
mod validation;
pub use crud::ResourceService;
pub use validation::RequestValidator;
