pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod enquiries;
pub mod pages;
pub mod projects;
pub mod sitemap;
pub mod templates;
