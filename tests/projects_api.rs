//! HTTP tests for /projects and project technologies.

mod common;

use axum::http::StatusCode;
use common::{create_developer, create_project, project_body, send, test_app, ACCEPTED};
use serde_json::json;

#[tokio::test]
async fn create_project_returns_record() {
    let app = test_app();
    let dev = create_developer(&app, "Ana", "ana@x.com").await;

    let mut body = project_body(dev);
    body["endDate"] = json!("2024-02-01");
    let (status, body) = send(&app, "POST", "/projects", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "name": "Portfolio",
            "description": "Personal website",
            "estimatedTime": "2 weeks",
            "repository": "https://example.com/ana/portfolio",
            "startDate": "2024-01-10",
            "endDate": "2024-02-01",
            "developerId": dev
        })
    );
}

#[tokio::test]
async fn create_project_for_unknown_developer_is_404() {
    let app = test_app();
    let (status, body) = send(&app, "POST", "/projects", Some(project_body(7))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Developer not found!");
}

#[tokio::test]
async fn create_project_validates_fields() {
    let app = test_app();
    let dev = create_developer(&app, "Ana", "ana@x.com").await;
    let expected = "name, description, estimatedTime, repository, startDate and developerId are required keys! endDate is an optional key.";

    let mut missing = project_body(dev);
    missing.as_object_mut().unwrap().remove("repository");
    let (status, body) = send(&app, "POST", "/projects", Some(missing)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], expected);

    let mut text_id = project_body(dev);
    text_id["developerId"] = json!("1");
    let (status, body) = send(&app, "POST", "/projects", Some(text_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], expected);
}

#[tokio::test]
async fn read_project_without_technologies() {
    let app = test_app();
    let dev = create_developer(&app, "Ana", "ana@x.com").await;
    let id = create_project(&app, dev).await;

    let (status, body) = send(&app, "GET", &format!("/projects/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projectId"], id);
    assert_eq!(body["developerId"], dev);
    assert_eq!(body["technologyIds"], json!(null));
    assert_eq!(body["technologyNames"], json!(null));
    assert_eq!(body["techAddedIn"], json!(null));

    let (status, body) = send(&app, "GET", "/projects/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Project not found!");
}

#[tokio::test]
async fn two_technologies_read_back_in_one_row() {
    let app = test_app();
    let dev = create_developer(&app, "Ana", "ana@x.com").await;
    let id = create_project(&app, dev).await;
    let uri = format!("/projects/{id}/technologies");

    let (status, body) = send(&app, "POST", &uri, Some(json!({"name": "PostgreSQL"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["technologyNames"], "PostgreSQL");

    send(&app, "POST", &uri, Some(json!({"name": "Python"}))).await;

    let (_, body) = send(&app, "GET", &format!("/projects/{id}"), None).await;
    let names: Vec<&str> = body["technologyNames"].as_str().unwrap().split(", ").collect();
    let ids: Vec<&str> = body["technologyIds"].as_str().unwrap().split(", ").collect();
    assert_eq!(names, vec!["Python", "PostgreSQL"]);
    assert_eq!(ids.len(), names.len());

    let (_, all) = send(&app, "GET", "/projects", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn technology_outside_catalog_is_rejected() {
    let app = test_app();
    let dev = create_developer(&app, "Ana", "ana@x.com").await;
    let id = create_project(&app, dev).await;
    let uri = format!("/projects/{id}/technologies");

    let (status, body) = send(&app, "POST", &uri, Some(json!({"name": "Rust"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], format!("The technologies accepted are {ACCEPTED}."));

    let (status, body) = send(&app, "POST", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        format!("The key name is required! Remember that the technologies accepted are {ACCEPTED}.")
    );
}

#[tokio::test]
async fn technology_name_is_checked_before_project() {
    let app = test_app();
    let (status, _) = send(&app, "POST", "/projects/5/technologies", Some(json!({"name": "Rust"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", "/projects/5/technologies", Some(json!({"name": "React"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Project not found!");
}

#[tokio::test]
async fn adding_same_technology_twice_conflicts() {
    let app = test_app();
    let dev = create_developer(&app, "Ana", "ana@x.com").await;
    let id = create_project(&app, dev).await;
    let uri = format!("/projects/{id}/technologies");

    send(&app, "POST", &uri, Some(json!({"name": "CSS"}))).await;
    let (status, body) = send(&app, "POST", &uri, Some(json!({"name": "CSS"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Technology already added to this project!");

    let (_, body) = send(&app, "GET", &format!("/projects/{id}"), None).await;
    assert_eq!(body["technologyIds"], "6");
}

#[tokio::test]
async fn removing_technology_is_scoped_to_project() {
    let app = test_app();
    let dev = create_developer(&app, "Ana", "ana@x.com").await;
    let first = create_project(&app, dev).await;
    let second = create_project(&app, dev).await;
    for project in [first, second] {
        send(&app, "POST", &format!("/projects/{project}/technologies"), Some(json!({"name": "Express.js"}))).await;
    }

    let (status, body) = send(&app, "DELETE", &format!("/projects/{first}/technologies/Express.js"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, json!(null));

    let (_, body) = send(&app, "GET", &format!("/projects/{first}"), None).await;
    assert_eq!(body["technologyNames"], json!(null));
    let (_, body) = send(&app, "GET", &format!("/projects/{second}"), None).await;
    assert_eq!(body["technologyNames"], "Express.js");
}

#[tokio::test]
async fn removing_unrelated_technology_is_404() {
    let app = test_app();
    let dev = create_developer(&app, "Ana", "ana@x.com").await;
    let id = create_project(&app, dev).await;

    for name in ["Django", "Cobol"] {
        let (status, body) = send(&app, "DELETE", &format!("/projects/{id}/technologies/{name}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["message"],
            format!("Technology not related to the project. The technologies accepted are {ACCEPTED}.")
        );
    }
}

#[tokio::test]
async fn update_project_fields() {
    let app = test_app();
    let dev = create_developer(&app, "Ana", "ana@x.com").await;
    let id = create_project(&app, dev).await;
    let uri = format!("/projects/{id}");

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({"name": "Renamed"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "At least one of the keys estimatedTime or endDate is required!");

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({"endDate": "2024-03-01"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endDate"], "2024-03-01");
    assert_eq!(body["estimatedTime"], "2 weeks");
    assert_eq!(body["name"], "Portfolio");

    let (_, body) = send(&app, "PATCH", &uri, Some(json!({"estimatedTime": "1 month", "endDate": null}))).await;
    assert_eq!(body["estimatedTime"], "1 month");
    assert_eq!(body["endDate"], json!(null));
}

#[tokio::test]
async fn delete_project_removes_associations() {
    let app = test_app();
    let dev = create_developer(&app, "Ana", "ana@x.com").await;
    let id = create_project(&app, dev).await;
    send(&app, "POST", &format!("/projects/{id}/technologies"), Some(json!({"name": "MongoDB"}))).await;

    let (status, _) = send(&app, "DELETE", &format!("/projects/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/projects/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = send(&app, "GET", &format!("/developers/{dev}/projects"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "This developer doesn't have projects!");
}

#[tokio::test]
async fn operational_routes() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "store": "ok"}));

    let (_, body) = send(&app, "GET", "/version", None).await;
    assert_eq!(body["name"], "devhub-api");
}

#[tokio::test]
async fn long_project_fields_are_accepted() {
    let app = test_app();
    let dev = create_developer(&app, "Ana", "ana@x.com").await;

    let mut body = project_body(dev);
    body["name"] = json!("P".repeat(80));
    body["estimatedTime"] = json!("about three weeks and a half");
    body["repository"] = json!(format!("https://example.com/{}", "r".repeat(150)));
    let (status, created) = send(&app, "POST", "/projects", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["estimatedTime"], "about three weeks and a half");

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/projects/{}", created["id"]),
        Some(json!({"estimatedTime": "somewhere between one and two months"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["estimatedTime"], "somewhere between one and two months");
}
