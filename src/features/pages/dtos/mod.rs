mod bulk_dto;
mod page_dto;

pub use bulk_dto::*;
pub use page_dto::*;
