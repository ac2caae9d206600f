//! Integration tests for the import pipeline
//!
//! These tests use wiremock to stand in for the JobSpy service and the
//! bulk-import endpoint and run whole import passes end-to-end.

use job_importer::config::Config;
use job_importer::output::QueryOutcome;
use job_importer::pipeline::{run_import, Pipeline};
use job_importer::scrape::{
    JobScraper, JobSpyClient, RawJobRow, ScrapeError, ScrapeRequest, ScrapeResult,
};
use job_importer::upload::ImportClient;
use serde_json::{json, Value};
use std::process::Command;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-cron-key";

/// Scraper that serves canned rows per query and fails on request
struct FakeScraper {
    /// (query, listing URLs); queries not listed fail
    results: Vec<(&'static str, Vec<&'static str>)>,
}

impl JobScraper for FakeScraper {
    async fn scrape(&self, request: &ScrapeRequest) -> ScrapeResult<Vec<RawJobRow>> {
        let urls = self
            .results
            .iter()
            .find(|(query, _)| *query == request.search_term)
            .map(|(_, urls)| urls.clone())
            .ok_or_else(|| ScrapeError::Api {
                status: 503,
                message: format!("no results configured for {}", request.search_term),
            })?;

        Ok(urls
            .into_iter()
            .map(|url| RawJobRow {
                title: Some(format!("{} role", request.search_term).into()),
                company: Some("Acme".into()),
                city: Some("Minneapolis".into()),
                state: Some("MN".into()),
                site: Some("indeed".into()),
                job_url: Some(url.into()),
                ..Default::default()
            })
            .collect())
    }
}

/// Creates a test configuration pointing the upload stage at `base_url`
fn create_test_config(base_url: &str, queries: &[&str], batch_size: usize) -> Config {
    let mut config = Config::default();
    config.backend.base_url = base_url.to_string();
    config.backend.api_key = API_KEY.to_string();
    config.backend.batch_size = batch_size;
    config.search.queries = queries.iter().map(|q| q.to_string()).collect();
    config
}

fn create_pipeline(config: Config, scraper: FakeScraper) -> Pipeline<FakeScraper> {
    let uploader = ImportClient::new(&config.backend).expect("Failed to build import client");
    Pipeline::new(config, scraper, uploader)
}

fn counts(imported: u64, updated: u64, errors: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "imported": imported,
        "updated": updated,
        "errors": errors
    }))
}

async fn posted_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("Request recording disabled")
        .iter()
        .filter(|r| r.url.path() == "/api/cron/bulk-import")
        .map(|r| serde_json::from_slice(&r.body).expect("Body is not JSON"))
        .collect()
}

#[tokio::test]
async fn test_three_queries_one_batch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/cron/bulk-import"))
        .and(header("X-API-Key", API_KEY))
        .and(header("content-type", "application/json"))
        .respond_with(counts(2, 1, 0))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &["rust", "go", "zig"], 50);
    let scraper = FakeScraper {
        results: vec![
            ("rust", vec!["https://example.com/1"]),
            ("go", vec!["https://example.com/2"]),
            ("zig", vec!["https://example.com/3"]),
        ],
    };

    let summary = create_pipeline(config, scraper).run().await;

    assert_eq!(summary.jobs_collected, 3);
    assert_eq!(summary.totals.imported, 2);
    assert_eq!(summary.totals.updated, 1);
    assert_eq!(summary.totals.errors, 0);
    assert_eq!(summary.totals.batches_sent, 1);
    assert_eq!(
        summary.final_line(),
        "Done! Imported: 2, Updated: 1, Errors: 0"
    );

    let bodies = posted_bodies(&mock_server).await;
    assert_eq!(bodies.len(), 1);
    let jobs = bodies[0]["jobs"].as_array().expect("jobs array");
    assert_eq!(jobs.len(), 3);
    assert_eq!(jobs[0]["external_url"], "https://example.com/1");
    assert_eq!(jobs[0]["location"], "Minneapolis, MN");
    assert_eq!(jobs[0]["source"], "indeed");
    assert_eq!(jobs[0]["requirements"], "[]");
    assert!(jobs[0]["salary_min"].is_null());
    assert!(jobs[0]["latitude"].is_null());
    assert!(jobs[0]["posted_date"].is_i64());
}

#[tokio::test]
async fn test_failed_query_is_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/cron/bulk-import"))
        .respond_with(counts(2, 0, 0))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &["rust", "broken", "go"], 50);
    let scraper = FakeScraper {
        results: vec![
            ("rust", vec!["https://example.com/1"]),
            ("go", vec!["https://example.com/2"]),
        ],
    };

    let summary = create_pipeline(config, scraper).run().await;

    assert_eq!(summary.queries.len(), 3);
    assert!(matches!(
        summary.queries[1].outcome,
        QueryOutcome::Failed { .. }
    ));
    assert_eq!(summary.queries_failed(), 1);
    assert_eq!(summary.jobs_collected, 2);
    assert_eq!(summary.totals.imported, 2);
}

#[tokio::test]
async fn test_failed_batch_counts_every_job_and_continues() {
    let mock_server = MockServer::start().await;

    // First batch fails, every later batch succeeds
    Mock::given(method("POST"))
        .and(path("/api/cron/bulk-import"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/cron/bulk-import"))
        .respond_with(counts(1, 0, 0))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &["rust"], 2);
    let scraper = FakeScraper {
        results: vec![(
            "rust",
            vec![
                "https://example.com/1",
                "https://example.com/2",
                "https://example.com/3",
            ],
        )],
    };

    let summary = create_pipeline(config, scraper).run().await;

    assert_eq!(summary.jobs_collected, 3);
    assert_eq!(summary.totals.batches_failed, 1);
    assert_eq!(summary.totals.batches_sent, 1);
    assert_eq!(summary.totals.errors, 2);
    assert_eq!(summary.totals.imported, 1);

    let bodies = posted_bodies(&mock_server).await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["jobs"].as_array().map(Vec::len), Some(2));
    assert_eq!(bodies[1]["jobs"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_non_json_success_counts_as_failed_batch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/cron/bulk-import"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &["rust"], 50);
    let scraper = FakeScraper {
        results: vec![("rust", vec!["https://example.com/1", "https://example.com/2"])],
    };

    let summary = create_pipeline(config, scraper).run().await;

    assert_eq!(summary.totals.batches_failed, 1);
    assert_eq!(summary.totals.errors, 2);
}

#[tokio::test]
async fn test_duplicate_urls_across_queries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/cron/bulk-import"))
        .respond_with(counts(2, 0, 0))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &["rust", "go"], 50);
    let scraper = FakeScraper {
        results: vec![
            ("rust", vec!["https://example.com/shared"]),
            ("go", vec!["https://example.com/shared", "https://example.com/go"]),
        ],
    };

    let summary = create_pipeline(config, scraper).run().await;

    assert_eq!(summary.jobs_collected, 2);
    assert_eq!(summary.duplicates, 1);

    let bodies = posted_bodies(&mock_server).await;
    let jobs = bodies[0]["jobs"].as_array().expect("jobs array");
    assert_eq!(jobs[0]["external_url"], "https://example.com/shared");
    assert_eq!(jobs[0]["title"], "rust role");
    assert_eq!(jobs[1]["external_url"], "https://example.com/go");
}

#[tokio::test]
async fn test_nothing_scraped_sends_nothing() {
    let mock_server = MockServer::start().await;

    let config = create_test_config(&mock_server.uri(), &["broken"], 50);
    let scraper = FakeScraper { results: vec![] };

    let summary = create_pipeline(config, scraper).run().await;

    assert_eq!(summary.jobs_collected, 0);
    assert_eq!(
        summary.final_line(),
        "Done! Imported: 0, Updated: 0, Errors: 0"
    );
    assert!(posted_bodies(&mock_server).await.is_empty());
}

#[tokio::test]
async fn test_jobspy_client_decodes_rows() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search_jobs"))
        .and(query_param("search_term", "data engineer"))
        .and(query_param("country_indeed", "USA"))
        .and(query_param("hours_old", "24"))
        .and(header("X-API-Key", "scrape-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "cached": false,
            "jobs": [
                {
                    "site": "google",
                    "title": "Data Engineer",
                    "company": "Initech",
                    "location": "Austin, TX, US",
                    "job_url": "https://example.com/d1",
                    "min_amount": 120000.0,
                    "max_amount": null,
                    "date_posted": "2024-05-01",
                    "job_type": "fulltime",
                    "is_remote": false
                },
                { "title": "No company", "job_url": "https://example.com/d2" }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.scraper.api_url = mock_server.uri();
    config.scraper.api_key = Some("scrape-key".to_string());

    let client = JobSpyClient::new(&config.scraper).expect("Failed to build client");
    let request = ScrapeRequest::for_query("data engineer", &config.search);
    let rows = client.scrape(&request).await.expect("Scrape failed");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].company(), Some("Initech"));
    assert_eq!(rows[0].site().as_deref(), Some("google"));
    assert_eq!(rows[1].company(), None);

    let sites: Vec<String> = mock_server
        .received_requests()
        .await
        .expect("Request recording disabled")[0]
        .url
        .query_pairs()
        .filter(|(k, _)| k == "site_name")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(sites, vec!["indeed", "google"]);
}

#[tokio::test]
async fn test_jobspy_client_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search_jobs"))
        .and(query_param("search_term", "unavailable"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search_jobs"))
        .and(query_param("search_term", "garbled"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.scraper.api_url = mock_server.uri();
    let client = JobSpyClient::new(&config.scraper).expect("Failed to build client");

    let request = ScrapeRequest::for_query("unavailable", &config.search);
    let result = client.scrape(&request).await;
    assert!(matches!(result, Err(ScrapeError::Api { status: 502, .. })));

    let request = ScrapeRequest::for_query("garbled", &config.search);
    let result = client.scrape(&request).await;
    assert!(matches!(result, Err(ScrapeError::Decode(_))));
}

#[tokio::test]
async fn test_run_import_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search_jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [{
                "site": "indeed",
                "title": "Platform Engineer",
                "company": "Globex",
                "job_url": "https://example.com/p1",
                "description": "Build things"
            }]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/cron/bulk-import"))
        .respond_with(counts(1, 0, 0))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), &["platform", "infra"], 50);
    config.scraper.api_url = mock_server.uri();

    let summary = run_import(config).await.expect("Import failed to start");

    // Both queries return the same listing
    assert_eq!(summary.rows_seen, 2);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.jobs_collected, 1);
    assert_eq!(summary.totals.imported, 1);
}

#[tokio::test]
async fn test_binary_exits_when_api_key_missing() {
    let mock_server = MockServer::start().await;
    let workdir = tempfile::tempdir().expect("Failed to create temp dir");

    let output = Command::new(env!("CARGO_BIN_EXE_job-importer"))
        .current_dir(workdir.path())
        .env_remove("CRON_API_KEY")
        .env("BACKEND_URL", mock_server.uri())
        .env("JOBSPY_API_URL", mock_server.uri())
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("CRON_API_KEY"),
        "unexpected stderr: {}",
        stderr
    );

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording disabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_binary_dry_run_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let workdir = tempfile::tempdir().expect("Failed to create temp dir");

    let output = Command::new(env!("CARGO_BIN_EXE_job-importer"))
        .arg("--dry-run")
        .current_dir(workdir.path())
        .env("CRON_API_KEY", API_KEY)
        .env("BACKEND_URL", mock_server.uri())
        .env("JOBSPY_API_URL", mock_server.uri())
        .env("JOBSPY_QUERIES", "rust developer,sre")
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rust developer"));
    assert!(stdout.contains("Queries (2)"));
    assert!(!stdout.contains(API_KEY));

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording disabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_binary_exits_zero_when_queries_and_batches_fail() {
    let mock_server = MockServer::start().await;
    let workdir = tempfile::tempdir().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/api/v1/search_jobs"))
        .and(query_param("search_term", "rust developer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [
                {
                    "title": "Rust Developer",
                    "company": "Acme",
                    "job_url": "https://example.com/r1"
                },
                {
                    "title": "Rust Engineer",
                    "company": "Acme",
                    "job_url": "https://example.com/r2"
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/cron/bulk-import"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = Command::new(env!("CARGO_BIN_EXE_job-importer"))
        .current_dir(workdir.path())
        .env("CRON_API_KEY", API_KEY)
        .env("BACKEND_URL", mock_server.uri())
        .env("JOBSPY_API_URL", mock_server.uri())
        .env("JOBSPY_QUERIES", "rust developer,unavailable")
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Done! Imported: 0, Updated: 0, Errors: 2"),
        "unexpected stdout: {}",
        stdout
    );
}

#[tokio::test]
async fn test_binary_exits_zero_with_unusable_backend_url() {
    let mock_server = MockServer::start().await;
    let workdir = tempfile::tempdir().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/api/v1/search_jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [{
                "title": "SRE",
                "company": "Globex",
                "job_url": "https://example.com/s1"
            }]
        })))
        .mount(&mock_server)
        .await;

    let output = Command::new(env!("CARGO_BIN_EXE_job-importer"))
        .current_dir(workdir.path())
        .env("CRON_API_KEY", API_KEY)
        .env("BACKEND_URL", "not-a-url")
        .env("JOBSPY_API_URL", mock_server.uri())
        .env("JOBSPY_QUERIES", "sre")
        .env("JOBSPY_RESULTS_WANTED", "0")
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Done! Imported: 0, Updated: 0, Errors: 1"),
        "unexpected stdout: {}",
        stdout
    );
}
