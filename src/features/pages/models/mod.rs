mod content;
mod page;

pub use content::*;
pub use page::*;
