//! Content templates: named element trees that pages can be created from.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::TemplateService;
