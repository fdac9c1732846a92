use tracing::warn;

use crate::errors::AppError;
use crate::models::Investment;
use crate::routes::Route;
use crate::screens::{require_session, InvestmentForm, ScreenState};
use crate::session::Identity;
use crate::state::AppState;

pub struct EditInvestmentScreen {
    app: AppState,
    id: String,
    state: ScreenState,
    user: Option<Identity>,
    investment: Option<Investment>,
    pub form: InvestmentForm,
}

impl EditInvestmentScreen {
    pub fn new(app: AppState, id: impl Into<String>) -> Self {
        Self {
            app,
            id: id.into(),
            state: ScreenState::Loading,
            user: None,
            investment: None,
            form: InvestmentForm::default(),
        }
    }

    /// Load the record and pre-fill the form. A failed load sends the user
    /// back to the dashboard.
    pub async fn mount(&mut self) {
        self.state = ScreenState::Loading;
        let Some(identity) = require_session(&self.app).await else {
            return;
        };
        self.user = Some(identity);

        match self.app.investments.get(&self.id).await {
            Ok(investment) => {
                self.form = InvestmentForm::from_investment(&investment);
                self.investment = Some(investment);
            }
            Err(e) => {
                warn!("Could not load investment {} for editing", self.id);
                self.app.notifier.error(&e, "Failed to fetch investment");
                self.app.navigator.push(Route::Dashboard);
            }
        }
        self.state = ScreenState::Ready;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }

    /// The record as loaded on mount.
    pub fn investment(&self) -> Option<&Investment> {
        self.investment.as_ref()
    }

    pub async fn submit(&mut self) -> Option<Investment> {
        if self.state != ScreenState::Ready || self.investment.is_none() {
            return None;
        }
        self.state = ScreenState::Mutating;
        let result = self.update().await;
        self.state = ScreenState::Ready;

        match result {
            Ok(updated) => {
                self.app.notifier.success(
                    "Investment updated",
                    format!("{} has been updated.", updated.display_name()),
                );
                self.app.navigator.push(Route::Dashboard);
                Some(updated)
            }
            Err(e) => {
                self.app.notifier.error(&e, "Failed to update investment");
                None
            }
        }
    }

    async fn update(&self) -> Result<Investment, AppError> {
        let update = self.form.validate()?.into_update();
        self.app.investments.update(&self.id, &update).await
    }
}
