//! Data Transfer Objects for the web pages.
//!
//! Request DTOs are the decoded HTML forms; response DTOs turn board data
//! into template values.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
