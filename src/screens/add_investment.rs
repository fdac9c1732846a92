use chrono::Utc;

use crate::errors::AppError;
use crate::models::Investment;
use crate::routes::Route;
use crate::screens::{require_session, InvestmentForm, ScreenState};
use crate::session::Identity;
use crate::state::AppState;

pub struct AddInvestmentScreen {
    app: AppState,
    state: ScreenState,
    user: Option<Identity>,
    pub form: InvestmentForm,
}

impl AddInvestmentScreen {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            state: ScreenState::Loading,
            user: None,
            form: InvestmentForm::default(),
        }
    }

    pub async fn mount(&mut self) {
        self.state = ScreenState::Loading;
        if let Some(identity) = require_session(&self.app).await {
            self.user = Some(identity);
            self.state = ScreenState::Ready;
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }

    /// Validate, create and leave for the dashboard. On failure the form
    /// keeps what the user typed. Ignored unless the screen is ready.
    pub async fn submit(&mut self) -> Option<Investment> {
        if self.state != ScreenState::Ready {
            return None;
        }
        self.state = ScreenState::Mutating;
        let result = self.create().await;
        self.state = ScreenState::Ready;

        match result {
            Ok(created) => {
                self.app.notifier.success(
                    "Investment added",
                    format!("{} has been added to your portfolio.", created.display_name()),
                );
                self.app.navigator.push(Route::Dashboard);
                Some(created)
            }
            Err(e) => {
                self.app.notifier.error(&e, "Failed to add investment");
                None
            }
        }
    }

    async fn create(&self) -> Result<Investment, AppError> {
        let draft = self.form.validate()?.into_new(Utc::now());
        self.app.investments.create(&draft).await
    }
}
