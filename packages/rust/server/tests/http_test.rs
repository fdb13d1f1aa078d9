//! # HTTP endpoint tests
//!
//! Spawns the router on a random port with a `wiremock` server standing in for
//! the upstream directory site.

use dinodir_core::Directory;
use dinodir_server::{AppState, run};
use dinodir_shared::{EnrichConfig, SourceConfig};
use reqwest::Client;
use serde_json::Value;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX: &str = r#"<html><body><ul>
    <li class="dinosaurfilter--dinosaur"><a href="/triceratops.html">
        <p class="dinosaurfilter--name-unhyphenated">Triceratops</p></a></li>
    <li class="dinosaurfilter--dinosaur"><a href="/stegosaurus.html">
        <p class="dinosaurfilter--name-unhyphenated">Stegosaurus</p></a></li>
    <li class="dinosaurfilter--dinosaur"><a href="/brokenosaurus.html">
        <p class="dinosaurfilter--name-unhyphenated">Brokenosaurus</p></a></li>
</ul></body></html>"#;

fn detail_page(name: &str, meaning: &str) -> String {
    format!(
        r#"<html><body>
        <h1 class="dinosaur--name-unhyphenated">{name}</h1>
        <dd class="dinosaur--pronunciation">{name}-pron</dd>
        <dd class="dinosaur--meaning">: {meaning}</dd>
        <img class="dinosaur--image" src="/img/{name}.jpg">
        <div class="dinosaur--content-container"><p>About {name}.</p></div>
        <dl class="dinosaur--list"><dt>Period:</dt><dd>Late Cretaceous</dd></dl>
        </body></html>"#
    )
}

/// A running server plus its fake upstream.
struct TestApp {
    address: String,
    client: Client,
    upstream: MockServer,
}

impl TestApp {
    async fn spawn(index_path: &str) -> Self {
        let upstream = MockServer::start().await;

        let mut source = SourceConfig::new(upstream.uri());
        source.index_path = index_path.to_string();
        let directory = Directory::new(source, EnrichConfig::default()).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            if let Err(e) = run(listener, AppState::new(directory)).await {
                eprintln!("Server error: {e}");
            }
        });

        Self {
            address: format!("http://127.0.0.1:{port}"),
            client: Client::new(),
            upstream,
        }
    }

    async fn mount(&self, page: &str, status: u16, body: String) {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.upstream)
            .await;
    }

    async fn mount_site(&self) {
        self.mount("/index.html", 200, INDEX.to_string()).await;
        self.mount("/triceratops.html", 200, detail_page("Triceratops", "three-horned face"))
            .await;
        self.mount("/brokenosaurus.html", 500, String::new()).await;
        // /stegosaurus.html is left unmounted: upstream 404 means "no data".
    }

    async fn get(&self, route: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{route}", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

fn is_json(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

#[tokio::test]
async fn health_check() {
    let app = TestApp::spawn("/index.html").await;
    let response = app.get("/health").await;
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn list_endpoint() {
    let app = TestApp::spawn("/index.html").await;
    app.mount_site().await;

    let response = app.get("/getAllDinoList").await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(is_json(&response));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["results"], 3);
    assert_eq!(body["data"][0]["name"], "Triceratops");
    assert_eq!(body["data"][0]["link"], "/triceratops.html");
}

#[tokio::test]
async fn list_endpoint_fails_with_plain_500() {
    let app = TestApp::spawn("/index.html").await;
    app.mount("/index.html", 503, String::new()).await;

    let response = app.get("/getAllDinoList").await;
    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(response.text().await.unwrap(), "Internal Server Error");
}

#[tokio::test]
async fn detail_endpoint() {
    let app = TestApp::spawn("/index.html").await;
    app.mount_site().await;

    let response = app.get("/getDinoDataByName?name=Triceratops").await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(is_json(&response));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Triceratops");
    assert_eq!(body["meaning"], "three-horned face");
    assert_eq!(body["period"], "Late Cretaceous");
}

#[tokio::test]
async fn detail_endpoint_without_data_is_sentinel() {
    let app = TestApp::spawn("/index.html").await;
    app.mount_site().await;

    let response = app.get("/getDinoDataByName?name=Stegosaurus").await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Stegosaurus");
    assert_eq!(body["meaning"], "N/A");
    assert_eq!(body["content"], "");
}

#[tokio::test]
async fn detail_endpoint_without_name_is_sentinel() {
    let app = TestApp::spawn("/index.html").await;

    let response = app.get("/getDinoDataByName").await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(is_json(&response));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["meaning"], "N/A");
    assert_eq!(body["name"], "");
}

#[tokio::test]
async fn detail_endpoint_upstream_failure_is_sentinel() {
    let app = TestApp::spawn("/index.html").await;
    app.mount_site().await;
    app.mount("/badgatewayosaurus.html", 502, String::new()).await;

    for name in ["Brokenosaurus", "Badgatewayosaurus"] {
        let response = app.get(&format!("/getDinoDataByName?name={name}")).await;
        assert_eq!(response.status().as_u16(), 200, "{name}");
        assert!(is_json(&response));

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["name"], name);
        assert_eq!(body["meaning"], "N/A");
        assert_eq!(body["content"], "");
    }
}

#[tokio::test]
async fn list_with_details_endpoint() {
    let app = TestApp::spawn("/index.html").await;
    app.mount_site().await;

    let response = app.get("/getAllDinoListWithDetails").await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(is_json(&response));

    let body: Value = response.json().await.unwrap();
    // Brokenosaurus fails upstream and is omitted; Stegosaurus has no data.
    assert_eq!(body["results"], 2);
    assert_eq!(body["noData"], 1);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    let stego = data
        .iter()
        .find(|r| r["name"] == "Stegosaurus")
        .expect("no-data record is included");
    assert_eq!(stego["meaning"], "N/A");
    assert_eq!(stego["link"], "/stegosaurus.html");
    assert!(!data.iter().any(|r| r["name"] == "Brokenosaurus"));
}

#[tokio::test]
async fn list_with_details_fails_when_listing_fails() {
    let app = TestApp::spawn("/missing-index.html").await;

    let response = app.get("/getAllDinoListWithDetails").await;
    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(response.text().await.unwrap(), "Internal Server Error");
}
