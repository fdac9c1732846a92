use tracing::{error, info};

use crate::models::Investment;
use crate::routes::Route;
use crate::screens::{require_session, ScreenState};
use crate::services::portfolio_service::{
    self, filter_investments, format_money, CategoryFilter, TypeCounts,
};
use crate::session::Identity;
use crate::state::AppState;

/// Prompt shown between the delete trigger and the actual call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// One table row, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentRow {
    pub id: Option<String>,
    pub name: String,
    pub kind: String,
    pub price: String,
    pub holdings: String,
    pub value: String,
}

impl From<&Investment> for InvestmentRow {
    fn from(inv: &Investment) -> Self {
        Self {
            id: inv.id.clone(),
            name: inv.display_name(),
            kind: inv.kind.label().to_string(),
            price: format_money(inv.price),
            holdings: inv.quantity.to_string(),
            value: format_money(inv.value),
        }
    }
}

/// The investment list with its summary cards and category tabs.
pub struct DashboardScreen {
    app: AppState,
    state: ScreenState,
    user: Option<Identity>,
    investments: Vec<Investment>,
    filter: CategoryFilter,
    pending_delete: Option<DeleteConfirmation>,
    refreshing: bool,
}

impl DashboardScreen {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            state: ScreenState::Loading,
            user: None,
            investments: Vec::new(),
            filter: CategoryFilter::All,
            pending_delete: None,
            refreshing: false,
        }
    }

    pub async fn mount(&mut self) {
        self.state = ScreenState::Loading;
        let Some(identity) = require_session(&self.app).await else {
            return;
        };
        self.user = Some(identity);
        self.state = ScreenState::Ready;
        self.refresh().await;
    }

    /// Replace the list with what the store returns. On failure the current
    /// list stays as it was.
    pub async fn refresh(&mut self) {
        if self.user.is_none() {
            return;
        }
        self.refreshing = true;
        let result = self.app.investments.list().await;
        self.refreshing = false;
        match result {
            Ok(investments) => {
                info!("Loaded {} investments", investments.len());
                self.investments = investments;
            }
            Err(e) => {
                self.app.notifier.error(&e, "Failed to fetch investments");
            }
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// True while a list fetch is in flight; the refresh action is disabled.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }

    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// The subset shown under the active tab.
    pub fn visible(&self) -> Vec<&Investment> {
        filter_investments(&self.investments, self.filter)
    }

    pub fn rows(&self) -> Vec<InvestmentRow> {
        self.visible().into_iter().map(InvestmentRow::from).collect()
    }

    /// Sum over the unfiltered list; the tab only narrows the table.
    pub fn total_value(&self) -> f64 {
        portfolio_service::total_value(&self.investments)
    }

    pub fn type_counts(&self) -> TypeCounts {
        portfolio_service::type_counts(&self.investments)
    }

    pub fn total_value_caption(&self) -> String {
        format!("{} investments in your portfolio", self.investments.len())
    }

    /// First phase of a delete: open the confirmation for a listed investment.
    pub fn request_delete(&mut self, id: &str) -> Option<&DeleteConfirmation> {
        let investment = self
            .investments
            .iter()
            .find(|inv| inv.id.as_deref() == Some(id))?;
        self.pending_delete = Some(DeleteConfirmation {
            id: id.to_string(),
            title: "Are you sure?".to_string(),
            description: format!(
                "This will permanently delete {} from your portfolio.",
                investment.display_name()
            ),
        });
        self.pending_delete.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&DeleteConfirmation> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second phase: perform the delete, then re-fetch. Returns whether the
    /// store accepted it.
    pub async fn confirm_delete(&mut self) -> bool {
        if self.state != ScreenState::Ready {
            return false;
        }
        let Some(confirmation) = self.pending_delete.take() else {
            return false;
        };

        self.state = ScreenState::Mutating;
        let deleted = match self.app.investments.delete(&confirmation.id).await {
            Ok(()) => {
                self.app.notifier.success(
                    "Investment deleted",
                    "The investment has been successfully deleted.",
                );
                true
            }
            Err(e) => {
                error!("Delete of {} failed, keeping current list", confirmation.id);
                self.app.notifier.error(&e, "Failed to delete investment");
                false
            }
        };
        self.state = ScreenState::Ready;

        if deleted {
            self.refresh().await;
        }
        deleted
    }

    pub fn open_add(&self) {
        self.app.navigator.push(Route::AddInvestment);
    }

    pub fn open_edit(&self, id: &str) {
        self.app.navigator.push(Route::EditInvestment(id.to_string()));
    }
}
