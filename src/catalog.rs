//! The fixed technology catalog. Seeded by the migration, never changed through the API.

pub const TECHNOLOGIES: [&str; 9] = [
    "JavaScript",
    "Python",
    "React",
    "Express.js",
    "HTML",
    "CSS",
    "Django",
    "PostgreSQL",
    "MongoDB",
];

pub fn is_cataloged(name: &str) -> bool {
    TECHNOLOGIES.contains(&name)
}

/// "JavaScript, Python, ... and MongoDB"
pub fn accepted_list() -> String {
    match TECHNOLOGIES.split_last() {
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        None => String::new(),
    }
}

pub fn name_required_message() -> String {
    format!(
        "The key name is required! Remember that the technologies accepted are {}.",
        accepted_list()
    )
}

pub fn not_accepted_message() -> String {
    format!("The technologies accepted are {}.", accepted_list())
}

pub fn not_related_message() -> String {
    format!(
        "Technology not related to the project. The technologies accepted are {}.",
        accepted_list()
    )
}
