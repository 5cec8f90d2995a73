//! Registration store spoken to over a PostgREST-style HTTP API.
//!
//! Existence check: `GET {base}/rest/v1/{table}?select=id&email=eq.{email}`.
//! Insert: `POST {base}/rest/v1/{table}` with a one-element JSON array.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use rw_core::ports::{RegistrationRepositoryError, RegistrationRepositoryPort};
use rw_core::{RegistrationId, RegistrationRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestConfig {
    pub base_url: String,
    pub api_key: String,
    pub table: String,
}

pub struct RestRegistrationRepository {
    client: Client,
    config: RestConfig,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: serde_json::Value,
}

/// Column layout of the registrations table.
#[derive(Debug, Serialize)]
struct RegistrationPayload<'a> {
    email: &'a str,
    full_name: &'a str,
    contact_number: &'a str,
    address: &'a str,
    company: &'a str,
    designation: &'a str,
    first_time: &'static str,
    selected_events: Vec<&'static str>,
}

impl<'a> From<&'a RegistrationRecord> for RegistrationPayload<'a> {
    fn from(record: &'a RegistrationRecord) -> Self {
        Self {
            email: &record.email,
            full_name: &record.full_name,
            contact_number: &record.contact_number,
            address: &record.address,
            company: &record.company,
            designation: &record.designation,
            first_time: if record.first_time_attendee { "yes" } else { "no" },
            selected_events: record.selected_events.iter().map(|e| e.as_str()).collect(),
        }
    }
}

impl RestRegistrationRepository {
    pub fn new(config: RestConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: RestConfig) -> Self {
        Self { client, config }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.table
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }
}

#[async_trait]
impl RegistrationRepositoryPort for RestRegistrationRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<RegistrationId>, RegistrationRepositoryError> {
        let filter = format!("eq.{email}");
        let response = self
            .authorized(self.client.get(self.table_url()))
            .query(&[("select", "id"), ("email", filter.as_str())])
            .send()
            .await
            .map_err(|e| RegistrationRepositoryError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistrationRepositoryError::Unavailable(format!(
                "existence query returned {status}: {body}"
            )));
        }

        let rows: Vec<IdRow> = response
            .json()
            .await
            .map_err(|e| RegistrationRepositoryError::Storage(e.to_string()))?;
        debug!(matches = rows.len(), "existence query answered");

        Ok(rows
            .into_iter()
            .map(|row| match row.id {
                serde_json::Value::String(s) => RegistrationId::new(s),
                other => RegistrationId::new(other.to_string()),
            })
            .collect())
    }

    async fn insert(&self, record: &RegistrationRecord) -> Result<(), RegistrationRepositoryError> {
        let payload = [RegistrationPayload::from(record)];
        let response = self
            .authorized(self.client.post(self.table_url()))
            .header("Prefer", "return=minimal")
            .json(&payload)
            .send()
            .await
            .map_err(|e| RegistrationRepositoryError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_insert_failure(status, body))
    }
}

fn classify_insert_failure(status: StatusCode, body: String) -> RegistrationRepositoryError {
    if status.is_client_error() {
        RegistrationRepositoryError::Rejected(format!("{status}: {body}"))
    } else {
        RegistrationRepositoryError::Unavailable(format!("{status}: {body}"))
    }
}
