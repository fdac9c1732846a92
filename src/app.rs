use std::sync::Arc;

use tracing::info;

use crate::config::ClientConfig;
use crate::errors::AppError;
use crate::external::ApiClient;
use crate::routes::Navigator;
use crate::services::{InvestmentService, Notifier, UserService};
use crate::session::IdentityProvider;
use crate::state::AppState;

pub fn create_app(
    config: &ClientConfig,
    identity: Arc<dyn IdentityProvider>,
) -> Result<AppState, AppError> {
    config.validate()?;
    let api = ApiClient::new(config, identity.clone())?;
    info!("Using portfolio API at {}", api.base_url());

    Ok(AppState {
        identity,
        investments: InvestmentService::new(api.clone()),
        users: UserService::new(api),
        notifier: Notifier::new(),
        navigator: Navigator::new(),
    })
}
