//! Outbound HTTP request types

mod body;
mod method;
mod spec;

pub use body::{FORM_CONTENT_TYPE, JSON_CONTENT_TYPE, RequestBody};
pub use method::HttpMethod;
pub use spec::HttpRequest;
