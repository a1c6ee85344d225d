//! SQL statements. Values are always bound as parameters, never formatted into the text.

pub mod developers;
pub mod projects;
pub mod schema;
