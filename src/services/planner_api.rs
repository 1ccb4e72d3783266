use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};

use crate::{
    models::recipe::{AddIngredientRequest, AddToPlanRequest, PlannedRecipe},
    services::{
        credentials::{CredentialError, CredentialProvider},
        schedule::format_date,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),
    #[error("rejected by server with status {status}")]
    RejectedByServer { status: u16 },
    #[error("unexpected response payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    #[error("not logged in")]
    MissingCredentials,
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error("invalid backend URL '{0}'")]
    InvalidUrl(String),
}

/// Backend operations the screens depend on.
pub trait PlannerApi: Send + Sync {
    /// GET /planejamento
    fn fetch_plan(&self) -> impl Future<Output = Result<Vec<PlannedRecipe>, ApiError>> + Send;

    /// POST /adicionar-ingrediente
    fn add_ingredient(&self, ingredient_id: i64) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// POST /adicionar-planejamento
    fn add_to_plan(
        &self,
        recipe_id: i64,
        date: NaiveDate,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Static image location for a recipe's `imagem` file name.
    fn image_url(&self, file_name: &str) -> String;
}

/// HTTP implementation of [`PlannerApi`] with bearer authentication.
#[derive(Clone)]
pub struct PlannerClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl PlannerClient {
    pub fn new(
        base_url: &str,
        credentials: Arc<dyn CredentialProvider>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let parsed =
            reqwest::Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<String, ApiError> {
        let token = self
            .credentials
            .token()?
            .ok_or(ApiError::MissingCredentials)?;
        Ok(format!("Bearer {token}"))
    }

    /// POSTs `body` and accepts only 201 Created.
    async fn post_created<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let auth = self.bearer()?;
        let response = self
            .client
            .post(self.url(path))
            .header("Authorization", auth)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!("POST /{} rejected {}: {}", path, status, text);
            return Err(ApiError::RejectedByServer {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

impl PlannerApi for PlannerClient {
    async fn fetch_plan(&self) -> Result<Vec<PlannedRecipe>, ApiError> {
        let auth = self.bearer()?;
        let response = self
            .client
            .get(self.url("planejamento"))
            .header("Authorization", auth)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("GET /planejamento rejected {}", status);
            return Err(ApiError::RejectedByServer {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let rows: Vec<serde_json::Value> = serde_json::from_slice(&bytes)?;
        let total = rows.len();
        let plan: Vec<PlannedRecipe> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(i, row)| match serde_json::from_value(row) {
                Ok(recipe) => Some(recipe),
                Err(e) => {
                    tracing::warn!("Skipping malformed plan record #{}: {}", i, e);
                    None
                }
            })
            .collect();
        tracing::debug!("Fetched {} of {} planned recipe(s)", plan.len(), total);
        Ok(plan)
    }

    async fn add_ingredient(&self, ingredient_id: i64) -> Result<(), ApiError> {
        self.post_created(
            "adicionar-ingrediente",
            &AddIngredientRequest {
                ingrediente_id: ingredient_id,
            },
        )
        .await
    }

    async fn add_to_plan(&self, recipe_id: i64, date: NaiveDate) -> Result<(), ApiError> {
        self.post_created(
            "adicionar-planejamento",
            &AddToPlanRequest {
                receita_id: recipe_id,
                data: format_date(date),
            },
        )
        .await
    }

    fn image_url(&self, file_name: &str) -> String {
        self.url(&format!("imagens/{file_name}"))
    }
}
