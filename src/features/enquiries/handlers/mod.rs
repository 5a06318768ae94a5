mod enquiry_handler;

pub use enquiry_handler::*;
