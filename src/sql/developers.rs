//! Developer and developer info statements.

pub const SELECT_BY_ID: &str =
    "SELECT id, name, email, developer_info_id FROM developers WHERE id = $1";

pub const SELECT_BY_EMAIL: &str =
    "SELECT id, name, email, developer_info_id FROM developers WHERE email = $1";

pub const INSERT: &str = r#"
    INSERT INTO developers (name, email)
    VALUES ($1, $2)
    RETURNING id, name, email, developer_info_id
"#;

const DETAIL_COLUMNS: &str = r#"
    SELECT
        dv.id, dv.name, dv.email, dv.developer_info_id,
        di.developer_since, di.preferred_os
    FROM developers dv
    LEFT JOIN developer_infos di ON di.id = dv.developer_info_id
"#;

pub fn select_detail_by_id() -> String {
    format!("{DETAIL_COLUMNS} WHERE dv.id = $1")
}

pub fn select_detail_all() -> String {
    format!("{DETAIL_COLUMNS} ORDER BY dv.id")
}

/// One row per project of the developer, technologies aggregated per project.
pub const SELECT_PROJECTS: &str = r#"
    SELECT
        dv.id AS developer_id, dv.name AS developer_name, dv.email AS developer_email,
        dv.developer_info_id, di.developer_since, di.preferred_os,
        pj.id AS project_id, pj.name AS project_name, pj.description AS project_description,
        pj.estimated_time AS project_estimated_time, pj.repository AS project_repository,
        pj.start_date AS project_start_date, pj.end_date AS project_end_date,
        MAX(pt.added_in) AS tech_added_in,
        string_agg(CAST(te.id AS TEXT), ', ' ORDER BY te.id) AS technology_ids,
        string_agg(te.name, ', ' ORDER BY te.id) AS technology_names
    FROM projects pj
    JOIN developers dv ON dv.id = pj.developer_id
    LEFT JOIN developer_infos di ON di.id = dv.developer_info_id
    LEFT JOIN projects_technologies pt ON pt.project_id = pj.id
    LEFT JOIN technologies te ON te.id = pt.technology_id
    WHERE dv.id = $1
    GROUP BY pj.id, dv.id, di.id
    ORDER BY pj.id
"#;

pub const UPDATE_NAME: &str = r#"
    UPDATE developers SET name = $2
    WHERE id = $1
    RETURNING id, name, email, developer_info_id
"#;

pub const DELETE_PROJECT_TECHNOLOGIES: &str = r#"
    DELETE FROM projects_technologies
    WHERE project_id IN (SELECT id FROM projects WHERE developer_id = $1)
"#;

pub const DELETE_PROJECTS: &str = "DELETE FROM projects WHERE developer_id = $1";

pub const DELETE: &str = "DELETE FROM developers WHERE id = $1 RETURNING developer_info_id";

pub const DELETE_INFO: &str = "DELETE FROM developer_infos WHERE id = $1";

pub const INSERT_INFO: &str = r#"
    INSERT INTO developer_infos (developer_since, preferred_os)
    VALUES ($1, $2)
    RETURNING id, developer_since, preferred_os
"#;

/// Links only when no info is linked yet; no row back means the developer is gone or
/// already linked.
pub const LINK_INFO: &str = r#"
    UPDATE developers SET developer_info_id = $2
    WHERE id = $1 AND developer_info_id IS NULL
    RETURNING id, name, email, developer_info_id
"#;

pub const UPDATE_INFO_OS: &str = r#"
    UPDATE developer_infos di SET preferred_os = $2
    FROM developers dv
    WHERE dv.id = $1 AND di.id = dv.developer_info_id
    RETURNING di.id, di.developer_since, di.preferred_os
"#;
