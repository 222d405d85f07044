//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the encyclopedia site and run
//! whole crawls against it end-to-end.

use cinegraph::config::{load_config, Config, CrawlerConfig, OutputConfig, SeedEntry, UserAgentConfig};
use cinegraph::crawler::{run_crawl, Coordinator, HttpFetcher, PageKind};
use cinegraph::graph::{Graph, SqliteGraph};
use cinegraph::output::StopReason;
use cinegraph::CinegraphError;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INFOBOX: &str = r#"
    <table class="infobox biography vcard">
      <tr><th colspan="2"><span class="fn">Jane Doe</span></th></tr>
      <tr><th>Born</th><td><span class="bday">1975-03-02</span></td></tr>
    </table>"#;

const FILMOGRAPHY: &str = r#"
    <h2><span class="mw-headline" id="Filmography">Filmography</span></h2>
    <table class="wikitable">
      <tr><th>Year</th><th>Title</th></tr>
      <tr><td>1999</td><td><i><a href="/wiki/Film_A" title="Film A">Film A</a></i></td></tr>
      <tr><td>2003</td><td><i><a href="/wiki/Film_B" title="Film B">Film B</a></i></td></tr>
    </table>"#;

fn user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    }
}

/// Creates a test configuration crawling `base_url` from `seeds`
fn create_test_config(base_url: &str, seeds: Vec<SeedEntry>, dir: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: 5,
            follow_works: false,
            ..CrawlerConfig::default()
        },
        user_agent: user_agent(),
        output: OutputConfig {
            database_path: dir.join("graph.db").display().to_string(),
            summary_path: dir.join("summary.md").display().to_string(),
        },
        seeds,
    }
}

fn person(base_url: &str, page: &str) -> SeedEntry {
    SeedEntry {
        url: format!("{}{}", base_url, page),
        kind: PageKind::Person,
    }
}

async fn mount_page(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=UTF-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_person() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_page(
        &server,
        "/wiki/Jane_Doe",
        format!("<html><body>{}<p>Career</p>{}</body></html>", INFOBOX, FILMOGRAPHY),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, vec![person(&base_url, "/wiki/Jane_Doe")], dir.path());

    let summary = run_crawl(config, Some("hash".to_string()), CancellationToken::new())
        .await
        .expect("crawl should succeed");

    assert_eq!(summary.targets_dequeued, 1);
    assert_eq!(summary.people_recorded, 1);
    assert_eq!(summary.frontier_remaining, 0);
    assert_eq!(summary.stop_reason, StopReason::FrontierEmpty);

    let graph = SqliteGraph::new(&dir.path().join("graph.db")).unwrap();
    let jane = graph
        .get_person(&format!("{}/wiki/Jane_Doe", base_url))
        .unwrap()
        .expect("person should be stored");
    assert_eq!(jane.name, "Jane Doe");
    assert_eq!(jane.birthdate, chrono::NaiveDate::from_ymd_opt(1975, 3, 2));
    assert_eq!(
        jane.work_urls,
        vec![
            format!("{}/wiki/Film_A", base_url),
            format!("{}/wiki/Film_B", base_url)
        ]
    );

    let report = std::fs::read_to_string(dir.path().join("summary.md")).unwrap();
    assert!(report.contains("- **People Recorded**: 1"));
    assert!(report.contains("- **Config Hash**: hash"));
}

#[tokio::test]
async fn test_missing_filmography_records_nothing() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_page(
        &server,
        "/wiki/Jane_Doe",
        format!("<html><body>{}<p>No credits.</p></body></html>", INFOBOX),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, vec![person(&base_url, "/wiki/Jane_Doe")], dir.path());

    let summary = run_crawl(config, None, CancellationToken::new())
        .await
        .expect("a failed target must not fail the crawl");

    assert_eq!(summary.people_recorded, 0);
    assert_eq!(summary.filmography_missing, 1);

    let graph = SqliteGraph::new(&dir.path().join("graph.db")).unwrap();
    assert_eq!(graph.count_people().unwrap(), 0);
}

#[tokio::test]
async fn test_follows_filmography_page() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_page(
        &server,
        "/wiki/Jane_Doe",
        format!(
            r#"<html><body>{}
               <p>Main article: <a href="/wiki/Jane_Doe_filmography" title="Jane Doe filmography">Jane Doe filmography</a></p>
               </body></html>"#,
            INFOBOX
        ),
    )
    .await;
    mount_page(
        &server,
        "/wiki/Jane_Doe_filmography",
        format!("<html><body>{}</body></html>", FILMOGRAPHY),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, vec![person(&base_url, "/wiki/Jane_Doe")], dir.path());

    let summary = run_crawl(config, None, CancellationToken::new()).await.unwrap();

    assert_eq!(summary.people_recorded, 1);
    assert_eq!(summary.works_credited, 2);

    let graph = SqliteGraph::new(&dir.path().join("graph.db")).unwrap();
    let jane = graph
        .get_person(&format!("{}/wiki/Jane_Doe", base_url))
        .unwrap()
        .unwrap();
    assert_eq!(jane.name, "Jane Doe");
    assert_eq!(jane.work_urls.len(), 2);
}

#[tokio::test]
async fn test_failed_filmography_page_skips_only_that_person() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_page(
        &server,
        "/wiki/Jane_Doe",
        format!(
            r#"<html><body>{}<a href="/wiki/Gone" title="Jane Doe filmography">films</a>{}</body></html>"#,
            INFOBOX, FILMOGRAPHY
        ),
    )
    .await;
    mount_page(
        &server,
        "/wiki/John_Roe",
        format!("<html><body>{}{}</body></html>", INFOBOX, FILMOGRAPHY),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &base_url,
        vec![
            person(&base_url, "/wiki/Jane_Doe"),
            person(&base_url, "/wiki/John_Roe"),
        ],
        dir.path(),
    );

    let summary = run_crawl(config, None, CancellationToken::new()).await.unwrap();

    assert_eq!(summary.targets_dequeued, 2);
    assert_eq!(summary.reference_page_failures, 1);
    assert_eq!(summary.people_recorded, 1);
    assert_eq!(
        summary.failed_targets.get(&format!("{}/wiki/Jane_Doe", base_url)),
        Some(&"reference_page_failed")
    );
}

#[tokio::test]
async fn test_slow_page_times_out_and_crawl_continues() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    Mock::given(method("GET"))
        .and(path("/wiki/Slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!("{}{}", INFOBOX, FILMOGRAPHY))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/wiki/Jane_Doe",
        format!("{}{}", INFOBOX, FILMOGRAPHY),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(
        &base_url,
        vec![
            person(&base_url, "/wiki/Slow"),
            person(&base_url, "/wiki/Jane_Doe"),
        ],
        dir.path(),
    );
    config.crawler.request_timeout_secs = 1;

    let summary = run_crawl(config, None, CancellationToken::new()).await.unwrap();

    assert_eq!(summary.fetch_timeouts, 1);
    assert_eq!(summary.people_recorded, 1);
}

#[tokio::test]
async fn test_work_targets_never_fetched() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_page(
        &server,
        "/wiki/Jane_Doe",
        format!("{}{}", INFOBOX, FILMOGRAPHY),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Film_A"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = CrawlerConfig {
        base_url: base_url.clone(),
        follow_works: true,
        ..CrawlerConfig::default()
    };
    let fetcher = HttpFetcher::new(&user_agent(), Duration::from_secs(5), CancellationToken::new())
        .unwrap();
    let mut coordinator = Coordinator::new(config, fetcher, Graph::new(), CancellationToken::new());
    coordinator.add_target(format!("{}/wiki/Jane_Doe", base_url), PageKind::Person);

    let summary = coordinator.run().await;

    assert_eq!(summary.people_recorded, 1);
    assert_eq!(summary.works_unanalyzed, 2);
    assert!(coordinator.frontier().is_empty());

    let graph = coordinator.into_sink();
    assert_eq!(
        graph.credited_in(&format!("{}/wiki/Film_A", base_url)),
        vec![format!("{}/wiki/Jane_Doe", base_url).as_str()]
    );
}

#[tokio::test]
async fn test_skip_visited_fetches_once() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    Mock::given(method("GET"))
        .and(path("/wiki/Jane_Doe"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(format!("{}{}", INFOBOX, FILMOGRAPHY)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(
        &base_url,
        vec![
            person(&base_url, "/wiki/Jane_Doe"),
            person(&base_url, "/wiki/Jane_Doe#Career"),
        ],
        dir.path(),
    );
    config.crawler.skip_visited = true;

    let summary = run_crawl(config, None, CancellationToken::new()).await.unwrap();

    assert_eq!(summary.people_recorded, 1);
    assert_eq!(summary.already_visited, 1);
}

#[tokio::test]
async fn test_crawl_from_config_file() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_page(
        &server,
        "/wiki/Jane_Doe",
        format!("{}{}", INFOBOX, FILMOGRAPHY),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("cinegraph.toml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    write!(
        file,
        r#"
[crawler]
base-url = "{base}"
request-timeout-secs = 5
attribute-lookup = "by-key"

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"

[output]
database-path = "{db}"
summary-path = "{summary}"

[[seed]]
url = "{base}/wiki/Jane_Doe"
kind = "person"
"#,
        base = base_url,
        db = dir.path().join("graph.db").display(),
        summary = dir.path().join("summary.md").display(),
    )
    .unwrap();
    drop(file);

    let config = load_config(&config_path).unwrap();
    let summary = run_crawl(config, None, CancellationToken::new()).await.unwrap();

    // follow-works defaults on, so both films are queued as works
    assert_eq!(summary.targets_dequeued, 3);
    assert_eq!(summary.people_recorded, 1);
    assert!(dir.path().join("summary.md").exists());
}

#[tokio::test]
async fn test_unopenable_database_fails_the_run() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&base_url, vec![person(&base_url, "/wiki/Jane_Doe")], dir.path());
    config.output.database_path = dir.path().join("missing").join("graph.db").display().to_string();

    let result = run_crawl(config, None, CancellationToken::new()).await;

    assert!(matches!(result, Err(CinegraphError::Graph(_))));
    assert!(!dir.path().join("summary.md").exists());
}
