//! Client-facing messages shared by guards, validation and stores.

pub const DEVELOPER_EXISTS: &str = "Developer already exists!";
pub const DEVELOPER_NOT_FOUND: &str = "Developer not found!";
pub const DEVELOPER_INFO_EXISTS: &str = "Developer Infos already exists!";
pub const DEVELOPER_INFO_MISSING: &str = "Developer has no info registered!";
pub const DEVELOPER_WITHOUT_PROJECTS: &str = "This developer doesn't have projects!";
pub const PROJECT_NOT_FOUND: &str = "Project not found!";
pub const TECHNOLOGY_ALREADY_ADDED: &str = "Technology already added to this project!";
