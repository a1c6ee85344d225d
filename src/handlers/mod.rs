//! HTTP handlers for developers, projects and operational endpoints.

pub mod developers;
pub mod projects;
pub mod system;
