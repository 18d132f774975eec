//! Sends fixture requests and compares the responses.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::{Client, Method};
use serde_json::Value;

use rincon_core::http::{REQUEST_ID_HEADER, build_client, new_request_id};

use crate::fixture::Fixture;

/// Result of running a single fixture assertion.
#[derive(Debug)]
pub struct RunResult {
    pub expected_status: u16,
    pub actual_status: Option<u16>,
    /// Headers that were expected but missing or had the wrong value.
    pub header_mismatches: Vec<String>,
    /// Set when `expect.body` was provided and the actual body didn't match.
    pub body_mismatch: Option<String>,
    /// Set when the request could not be sent (e.g. connection refused).
    pub error: Option<String>,
    pub request_id: String,
}

impl RunResult {
    pub fn passed(&self) -> bool {
        self.error.is_none()
            && self.actual_status == Some(self.expected_status)
            && self.header_mismatches.is_empty()
            && self.body_mismatch.is_none()
    }

    fn failed(fixture: &Fixture, request_id: String, error: String) -> Self {
        Self {
            expected_status: fixture.expect.status,
            actual_status: None,
            header_mismatches: Vec::new(),
            body_mismatch: None,
            error: Some(error),
            request_id,
        }
    }
}

pub struct Runner {
    client: Client,
    base_url: String,
}

impl Runner {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Run fixtures with up to `concurrency` in flight, keeping input order.
    pub async fn run_all<'a>(
        &self,
        fixtures: &'a [Fixture],
        concurrency: usize,
    ) -> Vec<(&'a Fixture, RunResult)> {
        stream::iter(fixtures)
            .map(|f| async move { (f, self.run(f).await) })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    pub async fn run(&self, fixture: &Fixture) -> RunResult {
        let url = format!("{}{}", self.base_url, fixture.request.path);
        let request_id = new_request_id();

        let method = match Method::from_bytes(fixture.request.method.to_uppercase().as_bytes()) {
            Ok(m) => m,
            Err(_) => {
                return RunResult::failed(
                    fixture,
                    request_id,
                    format!("unknown HTTP method: {}", fixture.request.method),
                );
            }
        };

        let mut req = self
            .client
            .request(method, &url)
            .header(REQUEST_ID_HEADER, &request_id);
        for (k, v) in &fixture.request.headers {
            req = req.header(k, v);
        }
        if let Some(body) = &fixture.request.body {
            req = req.json(body);
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => return RunResult::failed(fixture, request_id, e.to_string()),
        };
        let actual_status = resp.status().as_u16();
        let headers = resp.headers().clone();

        let mut header_mismatches = Vec::new();
        for (name, expected_val) in &fixture.expect.headers {
            match headers.get(name.as_str()) {
                Some(actual_val) if actual_val.to_str().unwrap_or("") == expected_val => {}
                Some(actual_val) => {
                    header_mismatches.push(format!(
                        "{name}: expected {:?}, got {:?}",
                        expected_val,
                        actual_val.to_str().unwrap_or("<non-utf8>")
                    ));
                }
                None => {
                    header_mismatches.push(format!("{name}: missing (expected {expected_val:?})"));
                }
            }
        }

        let body_mismatch = match &fixture.expect.body {
            Some(expected) => {
                let text = resp.text().await.unwrap_or_default();
                let actual: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
                (!json_contains(&actual, expected))
                    .then(|| format!("body: expected fragment {expected}, got {actual}"))
            }
            None => None,
        };

        tracing::debug!(
            group = %fixture.group,
            id = %fixture.id,
            %request_id,
            status = actual_status,
            "fixture request answered"
        );

        RunResult {
            expected_status: fixture.expect.status,
            actual_status: Some(actual_status),
            header_mismatches,
            body_mismatch,
            error: None,
            request_id,
        }
    }
}

/// `true` when `expected` is a fragment of `actual`.
pub fn json_contains(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => expected
            .iter()
            .all(|(k, v)| actual.get(k).is_some_and(|a| json_contains(a, v))),
        (Value::Array(actual), Value::Array(expected)) => {
            actual.len() == expected.len()
                && actual.iter().zip(expected).all(|(a, e)| json_contains(a, e))
        }
        (Value::Number(a), Value::Number(e)) => a.as_f64() == e.as_f64(),
        _ => actual == expected,
    }
}
