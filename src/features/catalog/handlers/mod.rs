mod category_handler;
mod feature_handler;
mod offering_handler;

pub use category_handler::*;
pub use feature_handler::*;
pub use offering_handler::*;
