mod feature_dto;
mod service_category_dto;
mod service_dto;

pub use feature_dto::*;
pub use service_category_dto::*;
pub use service_dto::*;
