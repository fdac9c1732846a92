//! Screen-level state holders. Each screen owns a private copy of what it
//! fetched; nothing is shared between screens except through the API.

pub mod add_investment;
pub mod dashboard;
pub mod edit_investment;
pub mod investment_form;

pub use add_investment::AddInvestmentScreen;
pub use dashboard::DashboardScreen;
pub use edit_investment::EditInvestmentScreen;
pub use investment_form::{InvestmentForm, ParsedInvestment};

use tracing::info;

use crate::routes::Route;
use crate::session::{resolve_session, Identity, SessionState};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Loading,
    Ready,
    Mutating,
}

/// Block until the identity check completes. Anonymous sessions are sent to
/// the login route before any resource call is attempted.
pub(crate) async fn require_session(app: &AppState) -> Option<Identity> {
    match resolve_session(app.identity.as_ref()).await {
        SessionState::Authenticated(identity) => Some(identity),
        SessionState::Anonymous => {
            info!("No active session, redirecting to {}", Route::Login);
            app.navigator.push(Route::Login);
            None
        }
    }
}
