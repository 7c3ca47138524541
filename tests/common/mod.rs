#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::subscriber::DefaultGuard;

use sheet_intake::config::{
    Config, CorsConfig, CredentialSource, SheetConfig, ValueInputOption, DEFAULT_TIMESTAMP_FORMAT,
};
use sheet_intake::sheets::{RowAppender, SheetsError};
use sheet_intake::submission::row::Row;

/// Records every appended row. Flip `fail` to make appends error out.
#[derive(Default)]
pub struct MockAppender {
    pub rows: Mutex<Vec<Row>>,
    pub fail: AtomicBool,
}

impl MockAppender {
    pub fn calls(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn rows(&self) -> Vec<Row> {
        self.rows.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RowAppender for MockAppender {
    async fn append_row(&self, row: &Row) -> Result<(), SheetsError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SheetsError::Api {
                status: 403,
                body: "The caller does not have permission".to_string(),
            });
        }
        self.rows.lock().unwrap().push(row.clone());
        Ok(())
    }
}

/// Collects formatted log output written by the test subscriber.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Route this thread's tracing output into a buffer. `#[tokio::test]` runs
/// a current-thread runtime, so spawned server tasks log here too.
pub fn capture_logs() -> (LogCapture, DefaultGuard) {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .finish();
    (capture, tracing::subscriber::set_default(subscriber))
}

/// A running test server instance backed by a [`MockAppender`].
pub struct TestApp {
    pub addr: SocketAddr,
    pub appender: Arc<MockAppender>,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body to `/submit`, return (body, status).
    pub async fn submit(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/submit"))
            .json(data)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn valid_form() -> Value {
    json!({
        "firstName": "A",
        "lastName": "B",
        "email": "a@b.com",
        "phoneNumber": "123",
        "message": "hi",
        "service": "consulting",
    })
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        cors: CorsConfig {
            allowed_origins: vec![],
            allow_credentials: true,
        },
        sheet: SheetConfig {
            spreadsheet_id: "test-spreadsheet".to_string(),
            sheet_name: "Sheet1".to_string(),
            range: "A:G".to_string(),
            value_input: ValueInputOption::UserEntered,
        },
        credentials: CredentialSource::KeyFile(fixture_path("service-account.json")),
        sheets_api_base: "http://127.0.0.1:0".to_string(),
        timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        max_body_size: 65_536,
        log_level: "warn".to_string(),
    }
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let appender = Arc::new(MockAppender::default());
    let app = sheet_intake::build_app(config, appender.clone());

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        appender,
        client: Client::new(),
    }
}
