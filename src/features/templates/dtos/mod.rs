mod template_dto;

pub use template_dto::*;
