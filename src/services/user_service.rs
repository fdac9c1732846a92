use crate::errors::AppError;
use crate::external::ApiClient;
use crate::models::{User, UserUpdate};

const CURRENT_USER_PATH: &str = "/users/me";

#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn current(&self) -> Result<User, AppError> {
        self.api.get(CURRENT_USER_PATH).await
    }

    pub async fn update_current(&self, update: &UserUpdate) -> Result<User, AppError> {
        self.api.put(CURRENT_USER_PATH, update).await
    }
}
