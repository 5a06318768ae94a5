mod feature;
mod service;
mod service_category;

pub use feature::*;
pub use service::*;
pub use service_category::*;
