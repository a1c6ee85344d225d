//! Request extractors that reject with the API's `{"message": ...}` body.

mod id;
mod json;

pub use id::RouteId;
pub use json::JsonBody;
