//! DDL. Every statement is idempotent so startup can run them unconditionally.

pub const CREATE_OS_TYPE: &str = r#"
    DO $$ BEGIN
        CREATE TYPE os AS ENUM ('Windows', 'Linux', 'MacOS');
    EXCEPTION
        WHEN duplicate_object THEN NULL;
    END $$
"#;

pub const CREATE_DEVELOPER_INFOS: &str = r#"
    CREATE TABLE IF NOT EXISTS developer_infos (
        id SERIAL PRIMARY KEY,
        developer_since DATE NOT NULL,
        preferred_os os NOT NULL
    )
"#;

pub const CREATE_DEVELOPERS: &str = r#"
    CREATE TABLE IF NOT EXISTS developers (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        developer_info_id INTEGER UNIQUE REFERENCES developer_infos (id)
    )
"#;

pub const CREATE_PROJECTS: &str = r#"
    CREATE TABLE IF NOT EXISTS projects (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        estimated_time TEXT NOT NULL,
        repository TEXT NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE,
        developer_id INTEGER NOT NULL REFERENCES developers (id)
    )
"#;

pub const CREATE_TECHNOLOGIES: &str = r#"
    CREATE TABLE IF NOT EXISTS technologies (
        id SERIAL PRIMARY KEY,
        name VARCHAR(30) NOT NULL UNIQUE
    )
"#;

pub const CREATE_PROJECTS_TECHNOLOGIES: &str = r#"
    CREATE TABLE IF NOT EXISTS projects_technologies (
        added_in TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        project_id INTEGER NOT NULL REFERENCES projects (id),
        technology_id INTEGER NOT NULL REFERENCES technologies (id),
        PRIMARY KEY (project_id, technology_id)
    )
"#;

/// Databases created with length-capped columns are widened to TEXT; a no-op otherwise.
pub const WIDEN_DEVELOPERS: &str = r#"
    ALTER TABLE developers
        ALTER COLUMN name TYPE TEXT,
        ALTER COLUMN email TYPE TEXT
"#;

pub const WIDEN_PROJECTS: &str = r#"
    ALTER TABLE projects
        ALTER COLUMN name TYPE TEXT,
        ALTER COLUMN estimated_time TYPE TEXT,
        ALTER COLUMN repository TYPE TEXT
"#;

pub const SEED_TECHNOLOGY: &str =
    "INSERT INTO technologies (name) VALUES ($1) ON CONFLICT (name) DO NOTHING";

/// In dependency order.
pub const TABLES: [&str; 8] = [
    CREATE_OS_TYPE,
    CREATE_DEVELOPER_INFOS,
    CREATE_DEVELOPERS,
    CREATE_PROJECTS,
    CREATE_TECHNOLOGIES,
    CREATE_PROJECTS_TECHNOLOGIES,
    WIDEN_DEVELOPERS,
    WIDEN_PROJECTS,
];
