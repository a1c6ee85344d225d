//! Project, technology and association statements.

const PROJECT_COLUMNS: &str =
    "id, name, description, estimated_time, repository, start_date, end_date, developer_id";

pub fn select_by_id() -> String {
    format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1")
}

pub fn insert() -> String {
    format!(
        "INSERT INTO projects (name, description, estimated_time, repository, start_date, end_date, developer_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {PROJECT_COLUMNS}"
    )
}

/// `$3` says whether `end_date` is replaced by `$4`; a null `$2` keeps `estimated_time`.
pub fn update() -> String {
    format!(
        "UPDATE projects SET estimated_time = COALESCE($2, estimated_time), \
         end_date = CASE WHEN $3 THEN $4 ELSE end_date END \
         WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
    )
}

const DETAIL: &str = r#"
    SELECT
        pj.id AS project_id, pj.name, pj.description, pj.estimated_time, pj.repository,
        pj.start_date, pj.end_date, pj.developer_id,
        MAX(pt.added_in) AS tech_added_in,
        string_agg(CAST(te.id AS TEXT), ', ' ORDER BY te.id) AS technology_ids,
        string_agg(te.name, ', ' ORDER BY te.id) AS technology_names
    FROM projects pj
    LEFT JOIN projects_technologies pt ON pt.project_id = pj.id
    LEFT JOIN technologies te ON te.id = pt.technology_id
"#;

pub fn select_detail_by_id() -> String {
    format!("{DETAIL} WHERE pj.id = $1 GROUP BY pj.id")
}

pub fn select_detail_all() -> String {
    format!("{DETAIL} GROUP BY pj.id ORDER BY pj.id")
}

pub const DELETE_TECHNOLOGIES: &str = "DELETE FROM projects_technologies WHERE project_id = $1";

pub const DELETE: &str = "DELETE FROM projects WHERE id = $1";

pub const SELECT_TECHNOLOGY_BY_NAME: &str = "SELECT id, name FROM technologies WHERE name = $1";

pub const INSERT_TECHNOLOGY: &str = r#"
    INSERT INTO projects_technologies (added_in, project_id, technology_id)
    VALUES (NOW(), $1, $2)
"#;

/// Scoped to one project: the same technology stays attached to other projects.
pub const DELETE_TECHNOLOGY: &str = r#"
    DELETE FROM projects_technologies pt
    USING technologies te
    WHERE pt.technology_id = te.id AND pt.project_id = $1 AND te.name = $2
"#;
