//! Modules layer - client-side components built on the API contracts
//!
//! `cms_client` talks to the content API over HTTP; `page_editor` holds the
//! editor state and auto-saves it through that client.

pub mod cms_client;
pub mod page_editor;
