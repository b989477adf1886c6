// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod codec;

use anyhow::{Context, Result, bail};
use docket_app::{Echo, FieldMap, FormSchema, Record, RecordKey, Resource};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use serde_json::{Map, Value as Json};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub use codec::{echo_from_json, fields_to_json, record_from_json};

const ECHO_KEYS: [&str; 2] = ["data", "record"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("cannot reach {url} -- check api.base_url or start the backend ({reason})")]
    Connect { url: String, reason: String },
    #[error("server error ({code}): {message}")]
    Status { code: u16, message: String },
    #[error("backend rejected the request: {message}")]
    Rejected { message: String },
    #[error("cannot decode backend response: {0}")]
    Decode(String),
}

/// Blocking JSON client for the dashboard backend.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    base: Url,
    token: Option<String>,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let base = Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(base.scheme(), "http" | "https") {
            bail!(
                "api.base_url must use http or https, got {}://",
                base.scheme()
            );
        }
        if timeout.is_zero() {
            bail!("api.timeout must be positive");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            base,
            token: token
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_owned),
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Loads every record of `resource`. Elements without an `id` are keyed
    /// by their position.
    pub fn list(
        &self,
        resource: &Resource,
        schema: &FormSchema,
    ) -> Result<Vec<Record>, NetworkError> {
        let url = self.url(resource.path, None);
        debug!(%url, "list records");
        let body = self.send(self.http.get(&url), &url)?;

        if !list_succeeded(&body) {
            return Err(rejected(&body));
        }

        let items = record_list(&body, resource.list_key).ok_or_else(|| {
            NetworkError::Decode(format!(
                "no `data`, `{}` or `items` list in response",
                resource.list_key
            ))
        })?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| record_from_json(schema, index, item))
            .collect()
    }

    pub fn create(
        &self,
        resource: &Resource,
        schema: &FormSchema,
        fields: &FieldMap,
    ) -> Result<Option<Echo>, NetworkError> {
        let url = self.url(resource.path, None);
        debug!(%url, "create record");
        let payload = Json::Object(fields_to_json(schema, fields));
        let body = self.send(self.http.post(&url).json(&payload), &url)?;
        self.accepted(resource, schema, &body)
    }

    pub fn update(
        &self,
        resource: &Resource,
        schema: &FormSchema,
        key: &RecordKey,
        fields: &FieldMap,
    ) -> Result<Option<Echo>, NetworkError> {
        let url = self.url(resource.path, Some(key));
        debug!(%url, "update record");
        let payload = Json::Object(fields_to_json(schema, fields));
        let body = self.send(self.http.put(&url).json(&payload), &url)?;
        self.accepted(resource, schema, &body)
    }

    /// Appends `path` and an optional record key to the base URL. The key is
    /// one percent-encoded segment, so positional keys like `#3` stay in the path.
    fn url(&self, path: &str, key: Option<&RecordKey>) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
            if let Some(key) = key {
                segments.push(key.as_str());
            }
        }
        url.to_string()
    }

    fn send(&self, request: RequestBuilder, url: &str) -> Result<Json, NetworkError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().map_err(|error| NetworkError::Connect {
            url: url.to_owned(),
            reason: error.to_string(),
        })?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|error| NetworkError::Decode(error.to_string()))?;
        if !status.is_success() {
            return Err(status_error(status, &text));
        }
        serde_json::from_str(&text).map_err(|error| NetworkError::Decode(error.to_string()))
    }

    fn accepted(
        &self,
        resource: &Resource,
        schema: &FormSchema,
        body: &Json,
    ) -> Result<Option<Echo>, NetworkError> {
        let success = body.get("success").is_some_and(truthy);
        let message = body
            .get("message")
            .and_then(Json::as_str)
            .is_some_and(|message| !message.is_empty());
        if !success && !message {
            return Err(rejected(body));
        }

        Ok(ECHO_KEYS
            .iter()
            .copied()
            .chain([resource.item_key])
            .find_map(|key| body.get(key).and_then(Json::as_object))
            .map(|object| echo_from_json(schema, object)))
    }
}

fn list_succeeded(body: &Json) -> bool {
    body.get("success").and_then(Json::as_bool) == Some(true)
        || body.get("status").and_then(Json::as_str) == Some("success")
}

fn record_list<'a>(body: &'a Json, list_key: &str) -> Option<&'a Vec<Json>> {
    if let Some(data) = body.get("data") {
        if let Some(items) = data.as_array() {
            return Some(items);
        }
        if let Some(items) = data.get(list_key).and_then(Json::as_array) {
            return Some(items);
        }
    }
    body.get(list_key)
        .and_then(Json::as_array)
        .or_else(|| body.get("items").and_then(Json::as_array))
}

fn truthy(value: &Json) -> bool {
    match value {
        Json::Bool(flag) => *flag,
        Json::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Json::String(text) => !text.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
        Json::Null => false,
    }
}

fn error_message(body: &Map<String, Json>) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Json::as_str))
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}

fn rejected(body: &Json) -> NetworkError {
    NetworkError::Rejected {
        message: body
            .as_object()
            .and_then(error_message)
            .unwrap_or_else(|| "backend reported failure".to_owned()),
    }
}

fn status_error(status: StatusCode, text: &str) -> NetworkError {
    let parsed = serde_json::from_str::<Json>(text).ok();
    let message = parsed
        .as_ref()
        .and_then(Json::as_object)
        .and_then(error_message)
        .or_else(|| (text.len() < 100 && !text.contains('{')).then(|| text.trim().to_owned()))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned()
        });
    NetworkError::Status {
        code: status.as_u16(),
        message,
    }
}
