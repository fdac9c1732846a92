use std::sync::Arc;

use crate::routes::Navigator;
use crate::services::{InvestmentService, Notifier, UserService};
use crate::session::IdentityProvider;

/// Everything a screen needs, handed in at construction.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub investments: InvestmentService,
    pub users: UserService,
    pub notifier: Notifier,
    pub navigator: Navigator,
}
