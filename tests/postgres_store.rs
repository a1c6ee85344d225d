//! `PgStore` against a real database. Runs only when `DEVHUB_TEST_DATABASE_URL` is set;
//! tests share the database, so they are serialized.

use chrono::NaiveDate;
use devhub_api::config::DatabaseSettings;
use devhub_api::model::{NewDeveloper, NewDeveloperInfo, NewProject, PreferredOs, ProjectUpdate};
use devhub_api::{connect, AppError, PgStore, Store};
use serial_test::serial;

async fn store() -> Option<PgStore> {
    let url = std::env::var("DEVHUB_TEST_DATABASE_URL").ok()?;
    let store = connect(&DatabaseSettings {
        url,
        max_connections: 2,
        create_if_missing: true,
    })
    .await
    .unwrap();
    sqlx::query(
        "TRUNCATE projects_technologies, projects, developers, developer_infos RESTART IDENTITY CASCADE",
    )
    .execute(store.pool())
    .await
    .unwrap();
    Some(store)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn developer(store: &PgStore, email: &str) -> i32 {
    store
        .create_developer(&NewDeveloper {
            name: "Ana".into(),
            email: email.into(),
        })
        .await
        .unwrap()
        .id
}

async fn project(store: &PgStore, developer_id: i32) -> i32 {
    store
        .create_project(&NewProject {
            name: "Portfolio".into(),
            description: "Personal website".into(),
            estimated_time: "2 weeks".into(),
            repository: "https://example.com/ana/portfolio".into(),
            start_date: date("2024-01-10"),
            end_date: None,
            developer_id,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
#[serial]
async fn email_uniqueness_is_enforced_by_the_database() {
    let Some(store) = store().await else { return };
    developer(&store, "ana@x.com").await;
    let err = store
        .create_developer(&NewDeveloper {
            name: "Other".into(),
            email: "ana@x.com".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(m) if m == "Developer already exists!"));
    assert_eq!(store.list_developers().await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn info_is_linked_once() {
    let Some(store) = store().await else { return };
    let dev = developer(&store, "ana@x.com").await;
    let input = NewDeveloperInfo {
        developer_since: date("2018-06-15"),
        preferred_os: PreferredOs::MacOs,
    };
    let linked = store.create_developer_info(dev, &input).await.unwrap();
    assert_eq!(linked.developer_info.preferred_os, PreferredOs::MacOs);

    let err = store.create_developer_info(dev, &input).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let detail = store.developer_detail(dev).await.unwrap().unwrap();
    assert_eq!(detail.developer_info_id, Some(linked.developer_info.id));
    assert_eq!(detail.developer_since, Some(date("2018-06-15")));

    let updated = store
        .update_developer_info(dev, PreferredOs::Linux)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.preferred_os, PreferredOs::Linux);
}

#[tokio::test]
#[serial]
async fn technologies_aggregate_into_one_row_per_project() {
    let Some(store) = store().await else { return };
    let dev = developer(&store, "ana@x.com").await;
    let id = project(&store, dev).await;

    store.add_project_technology(id, "React").await.unwrap();
    let detail = store.add_project_technology(id, "JavaScript").await.unwrap();
    assert_eq!(detail.technologies.technology_ids.as_deref(), Some("1, 3"));
    assert_eq!(detail.technologies.technology_names.as_deref(), Some("JavaScript, React"));

    let err = store.add_project_technology(id, "React").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let rows = store.developer_projects(dev).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].developer_name, "Ana");
}

#[tokio::test]
#[serial]
async fn project_update_and_scoped_technology_removal() {
    let Some(store) = store().await else { return };
    let dev = developer(&store, "ana@x.com").await;
    let first = project(&store, dev).await;
    let second = project(&store, dev).await;
    store.add_project_technology(first, "HTML").await.unwrap();
    store.add_project_technology(second, "HTML").await.unwrap();

    assert!(store.remove_project_technology(first, "HTML").await.unwrap());
    assert!(!store.remove_project_technology(first, "HTML").await.unwrap());
    let kept = store.project_detail(second).await.unwrap().unwrap();
    assert_eq!(kept.technologies.technology_names.as_deref(), Some("HTML"));

    let updated = store
        .update_project(
            first,
            &ProjectUpdate {
                estimated_time: None,
                end_date: Some(Some(date("2024-03-01"))),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.estimated_time, "2 weeks");
    assert_eq!(updated.end_date, Some(date("2024-03-01")));
}

#[tokio::test]
#[serial]
async fn delete_developer_cascades() {
    let Some(store) = store().await else { return };
    let dev = developer(&store, "ana@x.com").await;
    store
        .create_developer_info(
            dev,
            &NewDeveloperInfo {
                developer_since: date("2018-06-15"),
                preferred_os: PreferredOs::Windows,
            },
        )
        .await
        .unwrap();
    let id = project(&store, dev).await;
    store.add_project_technology(id, "CSS").await.unwrap();

    assert!(store.delete_developer(dev).await.unwrap());
    assert!(!store.delete_developer(dev).await.unwrap());

    for table in ["projects_technologies", "projects", "developers", "developer_infos"] {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 0, "{table}");
    }
    let (technologies,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM technologies")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(technologies, 9);
}

#[tokio::test]
#[serial]
async fn long_strings_fit_their_columns() {
    let Some(store) = store().await else { return };
    let email = format!("{}@example.com", "a".repeat(60));
    let dev = store
        .create_developer(&NewDeveloper {
            name: "N".repeat(80),
            email: email.clone(),
        })
        .await
        .unwrap();
    assert_eq!(dev.email, email);

    let project = store
        .create_project(&NewProject {
            name: "P".repeat(80),
            description: "Personal website".into(),
            estimated_time: "about three weeks and a half".into(),
            repository: format!("https://example.com/{}", "r".repeat(150)),
            start_date: date("2024-01-10"),
            end_date: None,
            developer_id: dev.id,
        })
        .await
        .unwrap();
    let updated = store
        .update_project(
            project.id,
            &ProjectUpdate {
                estimated_time: Some("somewhere between one and two months".into()),
                end_date: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.estimated_time, "somewhere between one and two months");
}
