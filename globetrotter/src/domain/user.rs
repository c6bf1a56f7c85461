use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{datetime, ApiFilter};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, alias = "name")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default, with = "datetime::option")]
    pub created_at: Option<NaiveDateTime>,
}

impl User {
    /// Name to show in headers: full name, then username, then email.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.username.as_deref())
            .unwrap_or(self.email.as_str())
    }
}

/// Profile changes pushed to `PUT /users/me`. The API takes these as query
/// parameters rather than a JSON body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub full_name: Option<String>,
    pub profile_photo: Option<String>,
}

impl ApiFilter for UserUpdate {
    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(name) = &self.full_name {
            params.push(("full_name", name.clone()));
        }
        if let Some(photo) = &self.profile_photo {
            params.push(("profile_photo", photo.clone()));
        }
        params
    }
}
