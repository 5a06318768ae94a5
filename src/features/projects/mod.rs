//! Portfolio projects: public listing (optionally featured only) and
//! admin management under `/api/admin/projects`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProjectService;
