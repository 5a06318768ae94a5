mod enquiry;

pub use enquiry::*;
