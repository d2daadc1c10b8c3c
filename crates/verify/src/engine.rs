//! Batch verification.
//!
//! Strictly sequential: one submission in flight at a time, results in
//! index order. The only thing that stops a batch early is a rejected
//! credential — every other failure is recorded per item and the batch
//! moves on. Submissions are never retried.

use std::path::PathBuf;

use invproof_client::{load_token, ClientError, ExtractClient};
use invproof_core::{compare, InvoiceResult, Report, Status};

use crate::config::RunConfig;
use crate::error::VerifyError;
use crate::source::InvoiceSource;

const MSG_MATCH: &str = "API response matches the expected record.";
const MSG_DIFFERENCES: &str = "Differences found.";
const MSG_FILE_NOT_FOUND: &str = "Invoice image not found.";

/// A persisted run: the report and where it was written.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: Report,
    pub path: PathBuf,
}

/// Batch verification engine.
pub struct VerifyEngine {
    client: ExtractClient,
    source: InvoiceSource,
    report_dir: PathBuf,
}

impl VerifyEngine {
    /// Explicit construction; tests inject a client pointed at a mock
    /// server.
    pub fn new(client: ExtractClient, source: InvoiceSource, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            source,
            report_dir: report_dir.into(),
        }
    }

    /// Wire up the production collaborators from a run config.
    pub fn from_config(config: &RunConfig) -> Result<Self, VerifyError> {
        let token = load_token(&config.token_file).map_err(|e| VerifyError::Token(e.to_string()))?;
        let source = InvoiceSource::open(&config.expected_file, &config.invoice_dir)?;
        let client = ExtractClient::new(config.api_url.clone(), token);
        Ok(Self::new(client, source, config.report_dir.clone()))
    }

    /// Number of invoices in the inventory.
    pub fn invoice_count(&self) -> usize {
        self.source.len()
    }

    /// Verify the whole inventory.
    pub fn run_all(&self) -> Result<RunOutcome, VerifyError> {
        let count = self.source.len();
        if count == 0 {
            return Err(VerifyError::InvalidRange { start: 0, end: 0, count: 0 });
        }
        self.run(0, count - 1)
    }

    /// Verify the inclusive index range `start..=end`.
    ///
    /// An invalid range performs no work: no submissions, no report file.
    pub fn run(&self, start: usize, end: usize) -> Result<RunOutcome, VerifyError> {
        let count = self.source.len();
        if start > end || end >= count {
            return Err(VerifyError::InvalidRange { start, end, count });
        }

        let mut items = Vec::with_capacity(end - start + 1);
        for index in start..=end {
            let resolved = match self.source.resolve(index) {
                Some(resolved) => resolved,
                None => {
                    items.push(InvoiceResult::error(
                        InvoiceSource::file_name(index),
                        MSG_FILE_NOT_FOUND,
                    ));
                    continue;
                }
            };

            let actual = match self.client.submit(&resolved.image_path) {
                Ok(actual) => actual,
                Err(ClientError::Auth(message)) => {
                    // Every remaining index would fail the same way; stop
                    // submitting and withhold persistence for the run.
                    return Err(VerifyError::AuthExpired {
                        partial: Report { items },
                        message,
                    });
                }
                Err(e) => {
                    items.push(InvoiceResult::error(resolved.file_name, e.to_string()));
                    continue;
                }
            };

            let differences = compare(resolved.expected, &actual);
            let matched = differences.is_empty();
            items.push(InvoiceResult {
                file: resolved.file_name,
                status: if matched { Status::Success } else { Status::Failure },
                message: if matched { MSG_MATCH } else { MSG_DIFFERENCES }.to_string(),
                differences,
                actual: Some(actual),
                expected: Some(resolved.expected.clone()),
            });
        }

        let report = Report { items };
        print_summary(&report);

        let path = invproof_store::write(&self.report_dir, &report)
            .map_err(|e| VerifyError::Persist(e.to_string()))?;
        eprintln!("wrote {}", path.display());

        Ok(RunOutcome { report, path })
    }
}

/// Human summary to stderr: counts, then one line per non-success item.
fn print_summary(report: &Report) {
    let mut success = 0usize;
    let mut failure = 0usize;
    let mut error = 0usize;
    for item in &report.items {
        match item.status {
            Status::Success => success += 1,
            Status::Failure => failure += 1,
            Status::Error => error += 1,
        }
    }

    eprintln!(
        "verified {} invoice(s): {} success, {} failure, {} error",
        report.len(),
        success,
        failure,
        error,
    );

    for item in &report.items {
        eprintln!("  {} [{}]", item.file, item.status);
        if item.status == Status::Success {
            continue;
        }
        eprintln!("    reason: {}", item.message);
        for diff in &item.differences {
            eprintln!("    {}: expected {}, got {}", diff.field, diff.expected, diff.actual);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use tempfile::tempdir;

    /// Inventory of `n` invoices whose file contents are `img{i}` and whose
    /// expected record is `{"total": "{i}.00"}`. Returns the fixture root;
    /// images live in `invoices/`, reports in `reports/`.
    fn fixture(n: usize) -> (tempfile::TempDir, InvoiceSource, PathBuf) {
        let dir = tempdir().unwrap();
        let invoice_dir = dir.path().join("invoices");
        let report_dir = dir.path().join("reports");
        std::fs::create_dir(&invoice_dir).unwrap();
        std::fs::create_dir(&report_dir).unwrap();

        let expected: Vec<serde_json::Value> =
            (0..n).map(|i| json!({"total": format!("{i}.00")})).collect();
        let expected_file = dir.path().join("expected.json");
        std::fs::write(&expected_file, serde_json::to_string(&expected).unwrap()).unwrap();

        for i in 0..n {
            std::fs::write(invoice_dir.join(format!("invoice-{i}.jpg")), format!("img{i}")).unwrap();
        }

        let source = InvoiceSource::open(&expected_file, &invoice_dir).unwrap();
        (dir, source, report_dir)
    }

    fn engine_for(server: &MockServer, source: InvoiceSource, report_dir: &PathBuf) -> VerifyEngine {
        let client = ExtractClient::new(server.url("/info/receipt"), "tok_test");
        VerifyEngine::new(client, source, report_dir.clone())
    }

    /// Mock a 200 response for the submission carrying `img{index}`.
    fn mock_ok(server: &MockServer, index: usize, body: serde_json::Value) {
        server.mock(|when, then| {
            when.method(POST)
                .path("/info/receipt")
                .body_includes(format!("img{index}"));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(body);
        });
    }

    #[test]
    fn full_run_classifies_and_persists() {
        let server = MockServer::start();
        let (_dir, source, report_dir) = fixture(3);

        mock_ok(&server, 0, json!({"total": "0.00"}));
        mock_ok(&server, 1, json!({"total": "wrong"}));
        mock_ok(&server, 2, json!({"total": "2.00", "extra": true}));

        let engine = engine_for(&server, source, &report_dir);
        let outcome = engine.run_all().unwrap();

        let statuses: Vec<Status> = outcome.report.items.iter().map(|i| i.status).collect();
        assert_eq!(statuses, [Status::Success, Status::Failure, Status::Success]);

        let failure = &outcome.report.items[1];
        assert_eq!(failure.message, "Differences found.");
        assert_eq!(failure.differences.len(), 1);
        assert_eq!(failure.differences[0].field, "total");
        assert_eq!(failure.actual.as_ref().unwrap()["total"], "wrong");
        assert!(failure.expected.is_some());

        // Persisted and loadable.
        assert!(outcome.path.is_file());
        assert_eq!(invproof_store::load(&outcome.path).unwrap(), outcome.report);
        assert_eq!(invproof_store::list(&report_dir).unwrap().len(), 1);
    }

    #[test]
    fn missing_image_is_an_error_item_not_an_abort() {
        let server = MockServer::start();
        let (dir, source, report_dir) = fixture(3);
        std::fs::remove_file(dir.path().join("invoices/invoice-1.jpg")).unwrap();

        mock_ok(&server, 0, json!({"total": "0.00"}));
        mock_ok(&server, 2, json!({"total": "2.00"}));

        let engine = engine_for(&server, source, &report_dir);
        let outcome = engine.run(0, 2).unwrap();

        assert_eq!(outcome.report.len(), 3);
        assert_eq!(outcome.report.items[0].status, Status::Success);
        assert_eq!(outcome.report.items[1].status, Status::Error);
        assert_eq!(outcome.report.items[1].message, "Invoice image not found.");
        assert_eq!(outcome.report.items[2].status, Status::Success);
    }

    #[test]
    fn auth_failure_aborts_with_partial_results_and_no_file() {
        let server = MockServer::start();
        let (_dir, source, report_dir) = fixture(3);

        mock_ok(&server, 0, json!({"total": "0.00"}));
        mock_ok(&server, 1, json!({"total": "1.00"}));
        server.mock(|when, then| {
            when.method(POST)
                .path("/info/receipt")
                .body_includes("img2");
            then.status(401).body("token expired");
        });

        let engine = engine_for(&server, source, &report_dir);
        let err = engine.run(0, 2).unwrap_err();

        match err {
            VerifyError::AuthExpired { partial, message } => {
                assert_eq!(partial.len(), 2);
                assert!(partial.items.iter().all(|i| i.status == Status::Success));
                assert!(message.contains("token expired"));
            }
            other => panic!("expected AuthExpired, got {other:?}"),
        }

        // Fatal abort withholds persistence.
        assert!(invproof_store::list(&report_dir).unwrap().is_empty());
    }

    #[test]
    fn non_auth_api_error_is_per_item() {
        let server = MockServer::start();
        let (_dir, source, report_dir) = fixture(3);

        mock_ok(&server, 0, json!({"total": "0.00"}));
        server.mock(|when, then| {
            when.method(POST)
                .path("/info/receipt")
                .body_includes("img1");
            then.status(500).body("backend unavailable");
        });
        mock_ok(&server, 2, json!({"total": "2.00"}));

        let engine = engine_for(&server, source, &report_dir);
        let outcome = engine.run(0, 2).unwrap();

        assert_eq!(outcome.report.items[1].status, Status::Error);
        assert!(outcome.report.items[1].message.contains("HTTP 500"));
        assert_eq!(outcome.report.items[2].status, Status::Success);
    }

    #[test]
    fn invalid_range_performs_no_work() {
        let server = MockServer::start();
        let (_dir, source, report_dir) = fixture(2);

        let mock = server.mock(|when, then| {
            when.method(POST).path("/info/receipt");
            then.status(200).json_body(json!({}));
        });

        let engine = engine_for(&server, source, &report_dir);

        for (start, end) in [(1, 0), (0, 2), (5, 9)] {
            let err = engine.run(start, end).unwrap_err();
            assert!(matches!(err, VerifyError::InvalidRange { .. }), "{start}..={end}: {err:?}");
        }

        mock.assert_calls(0);
        assert!(invproof_store::list(&report_dir).unwrap().is_empty());
    }

    #[test]
    fn run_all_on_empty_inventory_is_an_invalid_range() {
        let server = MockServer::start();
        let (_dir, source, report_dir) = fixture(0);

        let engine = engine_for(&server, source, &report_dir);
        let err = engine.run_all().unwrap_err();
        assert!(matches!(err, VerifyError::InvalidRange { count: 0, .. }));
    }

    #[test]
    fn subrange_covers_only_requested_indices() {
        let server = MockServer::start();
        let (_dir, source, report_dir) = fixture(4);

        mock_ok(&server, 1, json!({"total": "1.00"}));
        mock_ok(&server, 2, json!({"total": "2.00"}));

        let engine = engine_for(&server, source, &report_dir);
        let outcome = engine.run(1, 2).unwrap();

        let files: Vec<&str> = outcome.report.items.iter().map(|i| i.file.as_str()).collect();
        assert_eq!(files, ["invoice-1.jpg", "invoice-2.jpg"]);
    }
}
