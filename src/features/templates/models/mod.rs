mod content_template;

pub use content_template::*;
