//! CSV source → worker pool → HTTP handler, against a mock service

use std::io::Write;
use std::sync::Arc;

use migrator_core::application::WorkerPool;
use migrator_infra_csv::CsvRecordSource;
use migrator_infra_http::{build_client, HttpStep, StepSequenceHandler, Url};
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_json, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn pool_for(server: &MockServer, workers: usize, steps: Vec<HttpStep>) -> WorkerPool {
    let handler = StepSequenceHandler::new(
        build_client(None).unwrap(),
        Url::parse(&server.uri()).unwrap(),
        steps,
    );
    WorkerPool::new(workers, Arc::new(handler)).unwrap()
}

async fn received_paths(server: &MockServer) -> Vec<String> {
    let mut paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    paths.sort();
    paths
}

/// Header `id`, rows A1..A3, two workers: three PATCHes, one per row
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_three_rows_two_workers() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path_regex(r"^/v2/shoppers/A[123]$"))
        .and(body_json(json!({"metro_id": "124"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let file = csv_file("id\nA1\nA2\nA3\n");
    let source = CsvRecordSource::open(file.path()).unwrap();
    let pool = pool_for(&server, 2, vec![HttpStep::metro_update("124")]);

    let dispatched = pool.run(source).await.unwrap();

    assert_eq!(dispatched, 3);
    assert_eq!(
        received_paths(&server).await,
        vec!["/v2/shoppers/A1", "/v2/shoppers/A2", "/v2/shoppers/A3"]
    );
}

/// Every row reaches the service exactly once for each pool size
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_request_count_matches_rows_for_pool_sizes() {
    let rows: Vec<String> = (1..=30).map(|i| format!("D{}", i)).collect();
    let content = format!("driver_id\n{}\n", rows.join("\n"));

    for workers in [1, 3, 50] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v2/vehicles/49436/assign/D\d+$"))
            .respond_with(ResponseTemplate::new(200))
            .expect(30)
            .mount(&server)
            .await;

        let file = csv_file(&content);
        let source = CsvRecordSource::open(file.path()).unwrap();
        let pool = pool_for(&server, workers, vec![HttpStep::vehicle_assign("49436")]);

        assert_eq!(pool.run(source).await.unwrap(), 30, "workers = {}", workers);

        let mut expected: Vec<String> = rows
            .iter()
            .map(|r| format!("/v2/vehicles/49436/assign/{}", r))
            .collect();
        expected.sort();
        assert_eq!(received_paths(&server).await, expected, "workers = {}", workers);
    }
}

/// One worker means requests arrive in file order
#[tokio::test]
async fn test_single_worker_keeps_file_order() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let file = csv_file("id\nz9\na1\nm5\nb2\n");
    let source = CsvRecordSource::open(file.path()).unwrap();
    let pool = pool_for(&server, 1, vec![HttpStep::metro_update("7")]);
    pool.run(source).await.unwrap();

    let in_order: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        in_order,
        vec![
            "/v2/shoppers/z9",
            "/v2/shoppers/a1",
            "/v2/shoppers/m5",
            "/v2/shoppers/b2"
        ]
    );
}

/// Metro update followed by the certify request, per identifier
#[tokio::test]
async fn test_follow_up_request_per_identifier() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/v2/shoppers/S\d/certify$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let file = csv_file("id\nS1\nS2\n");
    let source = CsvRecordSource::open(file.path()).unwrap();
    let pool = pool_for(
        &server,
        2,
        vec![HttpStep::metro_update("124"), HttpStep::certify()],
    );

    assert_eq!(pool.run(source).await.unwrap(), 2);
}
