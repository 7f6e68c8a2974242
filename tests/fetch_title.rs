use autotasks::{AutoTasksError, FailureCategory, TitleFetcher, TitleOutcome};
use std::fs;
use std::net::TcpListener;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> TitleFetcher {
    TitleFetcher::with_timeout(Duration::from_secs(10)).unwrap()
}

async fn serve(route: &str, response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_title_is_logged_trimmed_regardless_of_case() {
    let server = serve(
        "/page",
        ResponseTemplate::new(200).set_body_string("<html><head><TITLE> Example </TITLE></head></html>"),
    )
    .await;
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("webpage_titles.txt");
    let url = format!("{}/page", server.uri());

    let outcome = fetcher().fetch_and_log(&url, &log_path).await.unwrap();

    match outcome {
        TitleOutcome::Logged { entry, log_path: logged_to } => {
            assert_eq!(entry.title, "Example");
            assert_eq!(entry.url, url);
            assert_eq!(logged_to, log_path);
        }
        TitleOutcome::NoTitle => panic!("expected a title"),
    }

    let content = fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = content.split('\n').collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with(&format!("] {}", url)));
    assert_eq!(lines[0].find(']'), Some(20));
    assert_eq!(lines[1], "Title: Example");
    assert_eq!(lines[2], "-".repeat(70));
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "");
}

#[tokio::test]
async fn test_repeated_fetch_appends_records() {
    let server = serve("/", ResponseTemplate::new(200).set_body_string("<title>Home</title>")).await;
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("titles.txt");
    let url = format!("{}/", server.uri());

    fetcher().fetch_and_log(&url, &log_path).await.unwrap();
    fetcher().fetch_and_log(&url, &log_path).await.unwrap();

    let content = fs::read_to_string(&log_path).unwrap();
    assert_eq!(content.matches("Title: Home\n").count(), 2);
}

#[tokio::test]
async fn test_missing_title_leaves_log_untouched() {
    let server = serve("/bare", ResponseTemplate::new(200).set_body_string("<html><body>no head</body></html>")).await;
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("titles.txt");

    let outcome = fetcher()
        .fetch_and_log(&format!("{}/bare", server.uri()), &log_path)
        .await
        .unwrap();

    assert_eq!(outcome, TitleOutcome::NoTitle);
    assert!(!log_path.exists());
}

#[tokio::test]
async fn test_error_status_is_network_failure() {
    let server = serve("/gone", ResponseTemplate::new(404).set_body_string("<title>Not Found</title>")).await;
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("titles.txt");

    let err = fetcher()
        .fetch_and_log(&format!("{}/gone", server.uri()), &log_path)
        .await
        .unwrap_err();

    assert!(matches!(err, AutoTasksError::HttpStatus { status: 404, .. }));
    assert!(err.is_network_failure());
    assert!(!log_path.exists());
}

#[tokio::test]
async fn test_server_error_is_network_failure() {
    let server = serve("/boom", ResponseTemplate::new(500)).await;

    let err = fetcher()
        .fetch_page(&format!("{}/boom", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, AutoTasksError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_timeout_is_network_failure() {
    let server = serve(
        "/slow",
        ResponseTemplate::new(200)
            .set_body_string("<title>Too late</title>")
            .set_delay(Duration::from_secs(3)),
    )
    .await;
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("titles.txt");
    let quick = TitleFetcher::with_timeout(Duration::from_millis(200)).unwrap();

    let err = quick
        .fetch_and_log(&format!("{}/slow", server.uri()), &log_path)
        .await
        .unwrap_err();

    assert!(matches!(err, AutoTasksError::Timeout { .. }));
    assert!(err.is_network_failure());
    assert!(!log_path.exists());
}

#[tokio::test]
async fn test_connection_refused_is_network_failure() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("titles.txt");

    let err = fetcher()
        .fetch_and_log(&format!("http://127.0.0.1:{}/", port), &log_path)
        .await
        .unwrap_err();

    assert!(matches!(err, AutoTasksError::Network { .. }));
    assert!(err.is_network_failure());
    assert!(!log_path.exists());
}

#[tokio::test]
async fn test_url_without_scheme_is_rejected() {
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("titles.txt");

    let err = fetcher()
        .fetch_and_log("www.example.com", &log_path)
        .await
        .unwrap_err();

    assert!(matches!(err, AutoTasksError::InvalidUrl { .. }));
    assert!(err.is_network_failure());
    assert!(!log_path.exists());
}

#[tokio::test]
async fn test_log_write_failure_is_io_failure() {
    let server = serve(
        "/page",
        ResponseTemplate::new(200).set_body_string("<title>Example</title>"),
    )
    .await;
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("missing_dir").join("titles.txt");

    let error = fetcher()
        .fetch_and_log(&format!("{}/page", server.uri()), &log_path)
        .await
        .unwrap_err();

    assert!(matches!(error, AutoTasksError::Io(_)));
    assert_eq!(error.category(), FailureCategory::Io);
    assert!(!error.is_network_failure());
}
