use tracing::{error, info};

use crate::errors::AppError;
use crate::external::ApiClient;
use crate::models::{Investment, InvestmentUpdate, NewInvestment};

const INVESTMENTS_PATH: &str = "/investments";

fn investment_path(id: &str) -> String {
    // form encoding turns spaces into '+', a literal '+' is already %2B
    let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("{}/{}", INVESTMENTS_PATH, encoded.replace('+', "%20"))
}

/// Typed access to the `/investments` resource. Each call is fire-once:
/// no retries, no batching.
#[derive(Clone)]
pub struct InvestmentService {
    api: ApiClient,
}

impl InvestmentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All investments of the current user, in the order the store returns them.
    pub async fn list(&self) -> Result<Vec<Investment>, AppError> {
        self.api.get(INVESTMENTS_PATH).await.map_err(|e| {
            error!("Failed to fetch investments: {}", e);
            e
        })
    }

    pub async fn get(&self, id: &str) -> Result<Investment, AppError> {
        self.api.get(&investment_path(id)).await.map_err(|e| {
            error!("Failed to fetch investment {}: {}", id, e);
            e
        })
    }

    pub async fn create(&self, draft: &NewInvestment) -> Result<Investment, AppError> {
        let created: Investment = self.api.post(INVESTMENTS_PATH, draft).await.map_err(|e| {
            error!("Failed to create investment {}: {}", draft.symbol, e);
            e
        })?;
        info!("Created investment {} ({:?})", created.symbol, created.id);
        Ok(created)
    }

    pub async fn update(&self, id: &str, update: &InvestmentUpdate) -> Result<Investment, AppError> {
        let updated: Investment = self.api.put(&investment_path(id), update).await.map_err(|e| {
            error!("Failed to update investment {}: {}", id, e);
            e
        })?;
        info!("Updated investment {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.api.delete(&investment_path(id)).await.map_err(|e| {
            error!("Failed to delete investment {}: {}", id, e);
            e
        })?;
        info!("Deleted investment {}", id);
        Ok(())
    }
}
