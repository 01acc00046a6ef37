//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock web sites and a mock browser
//! service, and run whole batches from the input CSV to the result file.

use mailscout::config::{Config, RendererConfig};
use mailscout::crawler::{run_batch, DomainTask};
use mailscout::input::load_domains;
use mailscout::output::CsvSink;
use mailscout::render::{build_http_client, BrowserRenderer, HttpRenderer};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_renderer() -> HttpRenderer {
    HttpRenderer::new(build_http_client(&RendererConfig::default()).unwrap())
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><body>{}</body></html>", body),
        "text/html; charset=utf-8",
    )
}

/// Runs a batch and returns the lines of the result file
async fn crawl_to_csv(
    renderer: &dyn mailscout::render::PageRenderer,
    tasks: &[DomainTask],
) -> Vec<String> {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("emails.csv");
    let mut sink = CsvSink::create(&output, "not found").unwrap();

    run_batch(renderer, &Config::default(), tasks, &mut sink)
        .await
        .unwrap();

    std::fs::read_to_string(&output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_mailto_on_home_page() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="mailto:info@acme.com">Napisz do nas</a><a href="/kontakt">Kontakt</a>"#,
        ))
        .mount(&site)
        .await;

    // A home page hit ends the crawl
    Mock::given(method("GET"))
        .and(path("/kontakt"))
        .respond_with(html("<p>other@acme.com</p>"))
        .expect(0)
        .mount(&site)
        .await;

    let lines = crawl_to_csv(&http_renderer(), &[DomainTask::new(site.uri())]).await;

    assert_eq!(
        lines,
        vec!["Domain,Email".to_string(), format!("{},info@acme.com", site.uri())]
    );
}

#[tokio::test]
async fn test_email_on_contact_page() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="/o-nas">O nas</a><a href="/kontakt">Kontakt</a><a href="/kontakt#form">Formularz</a>"#,
        ))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/kontakt"))
        .respond_with(html("<p>Biuro: biuro@firma.pl</p>"))
        .expect(1)
        .mount(&site)
        .await;

    // Ordinary pages wait until every contact page has been tried
    Mock::given(method("GET"))
        .and(path("/o-nas"))
        .respond_with(html("<p>ceo@firma.pl</p>"))
        .expect(0)
        .mount(&site)
        .await;

    let lines = crawl_to_csv(&http_renderer(), &[DomainTask::new(site.uri())]).await;

    assert_eq!(lines[1], format!("{},biuro@firma.pl", site.uri()));
}

#[tokio::test]
async fn test_not_found_marker() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<p>Zapraszamy</p><a href="/oferta">Oferta</a><a href="/cennik.pdf">Cennik</a>"#,
        ))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/oferta"))
        .respond_with(html("<p>Nic tu nie ma</p>"))
        .expect(1)
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/cennik.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&site)
        .await;

    let lines = crawl_to_csv(&http_renderer(), &[DomainTask::new(site.uri())]).await;

    assert_eq!(lines[1], format!("{},not found", site.uri()));
}

#[tokio::test]
async fn test_unreachable_domain_does_not_stop_batch() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<p>hello@beta.pl</p>"))
        .mount(&site)
        .await;

    let tasks = vec![
        DomainTask::new("http://127.0.0.1:1"),
        DomainTask::new(site.uri()),
    ];
    let lines = crawl_to_csv(&http_renderer(), &tasks).await;

    assert_eq!(
        lines,
        vec![
            "Domain,Email".to_string(),
            "http://127.0.0.1:1,not found".to_string(),
            format!("{},hello@beta.pl", site.uri()),
        ]
    );
}

#[tokio::test]
async fn test_failing_renderer_records_every_domain() {
    let browser = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/content"))
        .respond_with(ResponseTemplate::new(500).set_body_string("browser crashed"))
        .mount(&browser)
        .await;

    let renderer = BrowserRenderer::new(
        build_http_client(&RendererConfig::default()).unwrap(),
        Url::parse(&browser.uri()).unwrap(),
        None,
    );
    let tasks = vec![
        DomainTask::new("http://a.example"),
        DomainTask::new("http://b.example"),
        DomainTask::new("http://c.example"),
    ];

    let lines = crawl_to_csv(&renderer, &tasks).await;

    assert_eq!(
        lines,
        vec![
            "Domain,Email",
            "http://a.example,not found",
            "http://b.example,not found",
            "http://c.example,not found",
        ]
    );
}

#[tokio::test]
async fn test_browser_renderer_end_to_end() {
    let browser = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/content"))
        .and(body_partial_json(serde_json::json!({
            "url": "http://acme.example/",
            "gotoOptions": { "waitUntil": "networkidle0" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><a href="http://acme.example/contact">Contact</a></body></html>"#,
        ))
        .mount(&browser)
        .await;

    Mock::given(method("POST"))
        .and(path("/content"))
        .and(body_partial_json(serde_json::json!({
            "url": "http://acme.example/contact",
            "gotoOptions": { "waitUntil": "load", "timeout": 10000 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><script>var c = "sales@acme.example";</script></body></html>"#,
        ))
        .mount(&browser)
        .await;

    let renderer = BrowserRenderer::new(
        build_http_client(&RendererConfig::default()).unwrap(),
        Url::parse(&browser.uri()).unwrap(),
        None,
    );

    let lines = crawl_to_csv(&renderer, &[DomainTask::new("acme.example")]).await;

    assert_eq!(lines[1], "acme.example,sales@acme.example");
}

#[tokio::test]
async fn test_input_file_to_result_file() {
    let site_a = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<p>a@site.pl</p>"))
        .mount(&site_a)
        .await;

    let site_b = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<p>Brak kontaktu</p>"))
        .mount(&site_b)
        .await;

    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "name,phone,website").unwrap();
    writeln!(input, "Site A,111,{}", site_a.uri()).unwrap();
    writeln!(input, "Site A Facebook,222,https://facebook.com/sitea").unwrap();
    writeln!(input, "Site A Copy,111,http://copy.example").unwrap();
    writeln!(input, "No Website,333,").unwrap();
    writeln!(input, "Site B,,{}", site_b.uri()).unwrap();

    let tasks = load_domains(input.path(), &Config::default()).unwrap();
    assert_eq!(tasks.len(), 2);

    let lines = crawl_to_csv(&http_renderer(), &tasks).await;

    assert_eq!(
        lines,
        vec![
            "Domain,Email".to_string(),
            format!("{},a@site.pl", site_a.uri()),
            format!("{},not found", site_b.uri()),
        ]
    );
}
