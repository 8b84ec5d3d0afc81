use std::fs;

use pantry_infra::{PantryService, StorageArgs};
use reqwest::StatusCode;
use serde_json::Value;
use tempfile::TempDir;

const EXP: &str = "12/31/2099";

struct TestServer {
    base_url: String,
    dir: TempDir,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        Self::spawn_in(dir).await
    }

    async fn spawn_in(dir: TempDir) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let service = PantryService::open(&StorageArgs::in_dir(dir.path()))
            .expect("failed to open pantry");
        let app = pantry_api::app::build_app(service);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            dir,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn pantry_file(&self) -> String {
        fs::read_to_string(self.dir.path().join("pantry.csv")).unwrap_or_default()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn post_form(
    client: &reqwest::Client,
    url: String,
    form: &[(&str, &str)],
) -> (StatusCode, Value) {
    let res = client.post(url).form(form).send().await.unwrap();
    let status = res.status();
    let body = res.json().await.unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/health")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn add_with_unit_then_list() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = post_form(
        &client,
        srv.url("/items"),
        &[("name", "Rice"), ("quantity", "2"), ("exp_date", EXP), ("unit", "cup")],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["requires_unit"], false);
    assert_eq!(body["item"]["name"], "Rice");
    assert_eq!(body["item"]["unit"], "cup");
    assert_eq!(body["item"]["expiration_date"], EXP);
    assert_eq!(body["item"]["status"], "fresh");

    let list: Value = client.get(srv.url("/items")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list["count"], 1);
    assert_eq!(list["items"][0]["quantity"], 2.0);

    let root: Value = client.get(srv.url("/")).send().await.unwrap().json().await.unwrap();
    assert_eq!(root, list);

    assert!(srv.pantry_file().contains("Rice,2,12/31/2099,cup"));
}

#[tokio::test]
async fn unknown_unit_goes_through_the_unit_form() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = post_form(
        &client,
        srv.url("/items"),
        &[("name", "Saffron"), ("quantity", "1"), ("exp_date", EXP)],
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["requires_unit"], true);
    assert_eq!(body["unit_form"], "/unit");
    assert_eq!(body["pending"]["name"], "Saffron");
    assert_eq!(srv.pantry_file(), "");

    let form: Value = client
        .get(srv.url("/unit"))
        .query(&[("name", "Saffron"), ("quantity", "1"), ("exp_date", EXP)])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(form["name"], "Saffron");
    assert_eq!(form["known_unit"], Value::Null);

    let (status, body) = post_form(
        &client,
        srv.url("/unit"),
        &[("name", "Saffron"), ("quantity", "1"), ("exp_date", EXP), ("unit", "gram")],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["item"]["unit"], "gram");

    // The unit is now known; a later add needs no second phase.
    let (status, body) = post_form(
        &client,
        srv.url("/items"),
        &[("name", "saffron"), ("quantity", "2"), ("exp_date", EXP)],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["merged"], true);
    assert_eq!(body["item"]["quantity"], 3.0);

    let units = fs::read_to_string(srv.dir.path().join("units.csv")).unwrap();
    assert_eq!(units, "saffron,gram\n");
}

#[tokio::test]
async fn invalid_input_is_a_validation_error() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = post_form(
        &client,
        srv.url("/items"),
        &[("name", "Milk"), ("quantity", "two"), ("exp_date", EXP)],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = post_form(
        &client,
        srv.url("/items"),
        &[("name", "Milk"), ("quantity", "1"), ("exp_date", "2099-12-31")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = post_form(
        &client,
        srv.url("/items/edit"),
        &[("name", "Milk"), ("quantity", ""), ("exp_date", "13/45/2099")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn overflowing_quantity_is_rejected_and_pantry_reloads() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let rice = [("name", "Rice"), ("quantity", "1e308"), ("exp_date", EXP), ("unit", "cup")];

    let (status, _) = post_form(&client, srv.url("/items"), &rice).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_form(&client, srv.url("/items"), &rice).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = post_form(
        &client,
        srv.url("/items/use"),
        &[("name", "rice"), ("amount", "-1e308")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(!srv.pantry_file().contains("inf"));
    PantryService::open(&StorageArgs::in_dir(srv.dir.path())).expect("pantry file reloads");
}

#[tokio::test]
async fn edit_use_and_remove_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    post_form(
        &client,
        srv.url("/items"),
        &[("name", "Eggs"), ("quantity", "12"), ("exp_date", EXP), ("unit", "egg")],
    )
    .await;

    // Blank date keeps the stored one.
    let (status, body) = post_form(
        &client,
        srv.url("/items/edit"),
        &[("name", "eggs"), ("quantity", "6"), ("exp_date", "")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], true);
    assert_eq!(body["item"]["quantity"], 6.0);
    assert_eq!(body["item"]["expiration_date"], EXP);

    let (_, body) = post_form(
        &client,
        srv.url("/items/edit"),
        &[("name", "bacon"), ("quantity", "1")],
    )
    .await;
    assert_eq!(body["updated"], false);

    let (status, body) = post_form(
        &client,
        srv.url("/items/use"),
        &[("name", "EGGS"), ("amount", "2.5")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 3.5);

    let (status, body) = post_form(
        &client,
        srv.url("/items/use"),
        &[("name", "bacon"), ("amount", "1")],
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (_, body) = post_form(&client, srv.url("/items/remove"), &[("name", "  ")]).await;
    assert_eq!(body["removed"], 0);

    let (_, body) = post_form(&client, srv.url("/items/remove"), &[("name", "Eggs")]).await;
    assert_eq!(body["removed"], 1);

    let list: Value = client.get(srv.url("/items")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn search_by_query_and_form() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (name, unit) in [("Brown Sugar", "lb"), ("White Sugar", "lb"), ("Salt", "oz")] {
        post_form(
            &client,
            srv.url("/items"),
            &[("name", name), ("quantity", "1"), ("exp_date", EXP), ("unit", unit)],
        )
        .await;
    }

    let by_query: Value = client
        .get(srv.url("/search"))
        .query(&[("q", "SUGAR")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_query["count"], 2);
    assert_eq!(by_query["items"][0]["name"], "Brown Sugar");

    let (_, by_form) = post_form(&client, srv.url("/search"), &[("search", "salt")]).await;
    assert_eq!(by_form["count"], 1);

    let everything: Value = client.get(srv.url("/search")).send().await.unwrap().json().await.unwrap();
    assert_eq!(everything["count"], 3);
}

#[tokio::test]
async fn existing_files_are_served_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("pantry.csv"),
        "Name,Quantity,Expiration Date,Unit\nFlour,2,12/31/2099,kg\n",
    )
    .unwrap();

    let srv = TestServer::spawn_in(dir).await;
    let list: Value = reqwest::get(srv.url("/items")).await.unwrap().json().await.unwrap();

    assert_eq!(list["count"], 1);
    assert_eq!(list["items"][0]["unit"], "kg");
}
