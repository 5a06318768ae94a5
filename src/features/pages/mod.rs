//! CMS pages with a structured element tree, SEO metadata and a
//! draft / published / archived lifecycle.
//!
//! | Method | Endpoint | Role |
//! |--------|----------|------|
//! | GET | `/api/pages/slug/{slug}` | public, published only |
//! | GET, POST | `/api/pages` | editor |
//! | GET, PUT | `/api/pages/{id}` | editor |
//! | DELETE | `/api/pages/{id}` | admin |
//! | PATCH | `/api/pages/{id}/status` | editor |
//! | POST | `/api/pages/bulk` | editor, admin for `delete` |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::PageService;
