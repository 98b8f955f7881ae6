use reqwest::header::CONTENT_RANGE;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, warn};

use super::RestConfig;
use crate::common::DatabaseError;

/// Cheaply cloneable handle to a PostgREST endpoint
#[derive(Clone, Debug)]
pub struct RestClient {
    http: Client,
    base_url: String,
    api_key: String,
    schema: String,
}

impl RestClient {
    pub fn new(config: &RestConfig) -> Result<Self, DatabaseError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.rest_url(),
            api_key: config.api_key.clone(),
            schema: config.schema.clone(),
        })
    }

    /// Start a query against `table`.
    pub fn from(&self, table: &str) -> RestQuery<'_> {
        RestQuery {
            client: self,
            table: table.to_string(),
            params: Vec::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base_url, path))
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key)
            .header("Accept-Profile", self.schema.as_str())
    }

    pub(crate) async fn ping(&self) -> Result<(), DatabaseError> {
        let response = self.request(Method::GET, "").send().await?;
        ensure_success(response).await.map(|_| ())
    }
}

/// A single table query, built up from filters and executed as either a
/// row fetch or an exact count.
///
/// ```ignore
/// let rows: Vec<ProductRow> = client
///     .from("products")
///     .select("*,seller:sellers(id,store_name,logo)")
///     .eq("active", true)
///     .order("created_at", false)
///     .range(0, 12)
///     .fetch()
///     .await?;
/// ```
#[derive(Debug)]
pub struct RestQuery<'a> {
    client: &'a RestClient,
    table: String,
    params: Vec<(String, String)>,
}

impl RestQuery<'_> {
    fn push(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Column projection, including embedded relations (`alias:table(cols)`)
    pub fn select(self, columns: &str) -> Self {
        self.push("select", columns)
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.push(column, format!("eq.{value}"))
    }

    /// Case-insensitive match; `*` and `%` act as wildcards
    pub fn ilike(self, column: &str, pattern: &str) -> Self {
        self.push(column, format!("ilike.{pattern}"))
    }

    /// Array column contains every value
    pub fn contains<I>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.push(column, format!("cs.{{{}}}", quoted_list(values)))
    }

    pub fn in_list<I>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.push(column, format!("in.({})", quoted_list(values)))
    }

    pub fn not_null(self, column: &str) -> Self {
        self.push(column, "not.is.null")
    }

    pub fn order(self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.push("order", format!("{column}.{direction}"))
    }

    /// Zero-based `offset` and row count
    pub fn range(self, offset: u64, limit: u64) -> Self {
        self.push("offset", offset.to_string())
            .push("limit", limit.to_string())
    }

    /// Query parameters as they will be sent
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Fetch matching rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, DatabaseError> {
        debug!(table = %self.table, params = ?self.params, "REST select");

        let response = self
            .client
            .request(Method::GET, &self.table)
            .query(&self.params)
            .send()
            .await?;
        let body = ensure_success(response).await?.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| DatabaseError::Decode(e.to_string()))
    }

    /// Exact number of matching rows, without transferring any of them.
    pub async fn count(self) -> Result<u64, DatabaseError> {
        debug!(table = %self.table, params = ?self.params, "REST count");

        let response = self
            .client
            .request(Method::HEAD, &self.table)
            .query(&self.params)
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let header = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| DatabaseError::Decode("missing Content-Range header".to_string()))?;

        parse_content_range(header)
            .ok_or_else(|| DatabaseError::Decode(format!("unparseable Content-Range '{header}'")))
    }
}

fn quoted_list<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    values
        .into_iter()
        .map(|value| format!("\"{value}\""))
        .collect::<Vec<_>>()
        .join(",")
}

async fn ensure_success(response: Response) -> Result<Response, DatabaseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), %message, "REST service rejected request");

    Err(DatabaseError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// Total from a `Content-Range` header such as `0-9/42` or `*/0`.
pub fn parse_content_range(value: &str) -> Option<u64> {
    let (_, total) = value.trim().rsplit_once('/')?;
    total.parse().ok()
}
