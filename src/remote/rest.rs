//! PostgREST-style HTTP backend
//!
//! Talks to the hosted backend's REST endpoint (`{base}/rest/v1/{table}`) with the project's
//! anon key. Realtime and auth notifications need the backend's websocket channel, which this
//! client does not speak; both feeds stay silent and the settings store relies on its fallback
//! poll instead.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use url::Url;

use super::{AuthFeed, ChangeFeed, Filter, OrderBy, RemoteDataService, RemoteError, Row};
use crate::config::{ConfigError, ThemeConfig};

/// HTTP client for the hosted backend
#[derive(Debug, Clone)]
pub struct RestDataService {
    client: reqwest::Client,
    base: Url,
}

impl RestDataService {
    /// Create a client for `base_url` authenticated with `anon_key`
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, ConfigError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| ConfigError::Invalid(format!("backend url '{base_url}': {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let base = base
            .join("rest/v1/")
            .map_err(|e| ConfigError::Invalid(format!("backend url '{base_url}': {e}")))?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(anon_key)
            .map_err(|e| ConfigError::Invalid(format!("anon key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {anon_key}"))
            .map_err(|e| ConfigError::Invalid(format!("anon key: {e}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::Invalid(format!("http client: {e}")))?;

        Ok(Self { client, base })
    }

    /// Create a client from `backend_url` / `backend_anon_key` in the config
    pub fn from_config(config: &ThemeConfig) -> Result<Self, ConfigError> {
        let url = config
            .backend_url
            .as_deref()
            .ok_or(ConfigError::Missing("backend_url"))?;
        let key = config
            .backend_anon_key
            .as_deref()
            .ok_or(ConfigError::Missing("backend_anon_key"))?;
        Self::new(url, key)
    }

    fn table_url(&self, table: &str) -> Result<Url, RemoteError> {
        self.base
            .join(table)
            .map_err(|e| RemoteError::Transport(format!("invalid table '{table}': {e}")))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, RemoteError> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        serde_json::from_str(&body).map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

fn filter_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn apply_filter(url: &mut Url, filter: &Filter) {
    url.query_pairs_mut().append_pair(
        &filter.column,
        &format!("eq.{}", filter_value(&filter.value)),
    );
}

fn into_rows(value: Value) -> Result<Vec<Row>, RemoteError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => Ok(row),
                other => Err(RemoteError::Decode(format!("expected row object, got {other}"))),
            })
            .collect(),
        Value::Object(row) => Ok(vec![row]),
        other => Err(RemoteError::Decode(format!("expected row array, got {other}"))),
    }
}

#[async_trait]
impl RemoteDataService for RestDataService {
    async fn get_one(&self, table: &str, filter: &Filter) -> Result<Option<Row>, RemoteError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("select", "*");
        apply_filter(&mut url, filter);
        url.query_pairs_mut().append_pair("limit", "1");

        let rows = into_rows(self.send(self.client.get(url)).await?)?;
        Ok(rows.into_iter().next())
    }

    async fn list(
        &self,
        table: &str,
        filter: Option<&Filter>,
        order: Option<&OrderBy>,
    ) -> Result<Vec<Row>, RemoteError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("select", "*");
        if let Some(filter) = filter {
            apply_filter(&mut url, filter);
        }
        if let Some(order) = order {
            let direction = if order.ascending { "asc" } else { "desc" };
            url.query_pairs_mut()
                .append_pair("order", &format!("{}.{}", order.column, direction));
        }

        into_rows(self.send(self.client.get(url)).await?)
    }

    async fn upsert(
        &self,
        table: &str,
        row: Row,
        conflict_column: &str,
    ) -> Result<Row, RemoteError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut()
            .append_pair("on_conflict", conflict_column);

        let request = self
            .client
            .post(url)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&Value::Object(row.clone()));

        let rows = into_rows(self.send(request).await?)?;
        Ok(rows.into_iter().next().unwrap_or(row))
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<usize, RemoteError> {
        let mut url = self.table_url(table)?;
        apply_filter(&mut url, filter);

        let request = self
            .client
            .delete(url)
            .header("Prefer", "return=representation");
        Ok(into_rows(self.send(request).await?)?.len())
    }

    fn subscribe_changes(&self, table: &str) -> ChangeFeed {
        log::warn!(
            "realtime changes for '{table}' are not available over REST; relying on polling"
        );
        futures::stream::pending().boxed()
    }

    fn subscribe_auth(&self) -> AuthFeed {
        log::warn!("auth state changes are not available over REST");
        futures::stream::pending().boxed()
    }
}
