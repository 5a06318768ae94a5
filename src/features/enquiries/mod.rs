//! Contact-form enquiries: public submission and an editor-facing
//! pipeline (`new` → `contacted` → `qualified` → `closed`).

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::EnquiryService;
