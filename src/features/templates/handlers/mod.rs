mod template_handler;

pub use template_handler::*;
