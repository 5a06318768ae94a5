//! Service catalog: categories, the services offered in each category, and
//! the features detailing each service.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/service-categories` | Active categories |
//! | GET | `/api/service-categories/{slug}` | Category by slug |
//! | GET | `/api/services` | Active services (`categoryId` / `categorySlug` filters) |
//! | GET | `/api/services/{categorySlug}/{serviceSlug}` | Service by slug path |
//! | GET | `/api/features` | Active features (`serviceId` filter) |
//! | GET | `/api/features/{categorySlug}/{serviceSlug}/{featureSlug}` | Feature by slug path |
//! | GET, POST | `/api/admin/service-categories` | List all / create |
//! | PUT, DELETE | `/api/admin/service-categories/{id}` | Update / delete |
//! | GET, POST | `/api/admin/services` | List all / create |
//! | PUT, DELETE | `/api/admin/services/{id}` | Update / delete |
//! | GET, POST | `/api/admin/features` | List all / create |
//! | PUT, DELETE | `/api/admin/features/{id}` | Update / delete |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{CategoryService, FeatureService, OfferingService};
