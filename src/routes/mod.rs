use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

const EDIT_PREFIX: &str = "/dashboard/edit-investment/";

/// Client-side destinations. Screens only ask to go somewhere; whoever
/// drives the app decides how to render the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    AddInvestment,
    EditInvestment(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::AddInvestment => "/dashboard/add-investment".to_string(),
            Route::EditInvestment(id) => format!("{}{}", EDIT_PREFIX, id),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        match path {
            "/login" => Some(Route::Login),
            "/dashboard" => Some(Route::Dashboard),
            "/dashboard/add-investment" => Some(Route::AddInvestment),
            _ => path
                .strip_prefix(EDIT_PREFIX)
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Route::EditInvestment(id.to_string())),
        }
    }

    /// Screens behind the login gate.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Clone, Default)]
pub struct Navigator {
    history: Arc<Mutex<Vec<Route>>>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, route: Route) {
        debug!("navigate -> {}", route);
        self.history.lock().push(route);
    }

    pub fn current(&self) -> Option<Route> {
        self.history.lock().last().cloned()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().clone()
    }
}
