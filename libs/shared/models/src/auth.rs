use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Authenticated session handed explicitly to every service and to the
/// schedule controller. There is no ambient auth context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl Session {
    pub fn bearer_token(&self) -> &str {
        &self.token
    }
}

/// Wire shape of `POST /sessions`.
#[derive(Debug, Deserialize)]
pub struct SignInResponse {
    pub user: User,
    pub token: String,
}

impl From<SignInResponse> for Session {
    fn from(response: SignInResponse) -> Self {
        Self {
            user: response.user,
            token: response.token,
        }
    }
}
