mod category_service;
mod feature_service;
mod offering_service;

pub use category_service::CategoryService;
pub use feature_service::FeatureService;
pub use offering_service::OfferingService;
