use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        Activity, ActivitySearch, BudgetEntry, BudgetSummary, City, CitySearch, NewBudgetEntry,
        NewStop, NewStopActivity, NewTrip, SharedTrip, Stop, StopActivity, Trip, TripUpdate, User,
        UserUpdate,
    },
    ApiURL, AuthResponse, Credentials, NewUser,
};

/// Async client for the GlobeTrotter REST API.
///
/// Every request after login carries the bearer token set through
/// [`GlobetrotterClient::set_token`]. The shared-trip read never does.
#[derive(Debug, Clone)]
pub struct GlobetrotterClient {
    http: reqwest::Client,
    base_url: ApiURL,
    token: Option<String>,
}

impl GlobetrotterClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        reqwest::Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: ApiURL::new(base_url),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_ref()
    }

    fn url(&self, path: &str) -> ApiURL {
        self.base_url.append_path(path)
    }

    fn request(&self, method: Method, url: &ApiURL) -> RequestBuilder {
        let builder = self.http.request(method, url.as_ref());
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::ResponseError(format!("{} failed: {}", call_name, e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            let detail = extract_detail(&body);
            tracing::warn!(call = call_name, status = status.as_u16(), ?detail, "unauthorized");
            return Err(ApiError::Unauthorized { detail });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = extract_detail(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
            tracing::warn!(call = call_name, status = status.as_u16(), %detail, "request rejected");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        tracing::debug!(call = call_name, status = status.as_u16(), "request ok");
        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, call_name).await?;
        response.json::<T>().await.map_err(|e| {
            ApiError::ParsingError(format!("Failed to parse {} response: {}", call_name, e))
        })
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<(), ApiError> {
        let response = self.send(request, call_name).await?;
        let _ = response.bytes().await;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, url: ApiURL, call_name: &str) -> Result<T, ApiError> {
        self.fetch_json(self.request(Method::GET, &url), call_name)
            .await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: ApiURL,
        body: &B,
        call_name: &str,
    ) -> Result<T, ApiError> {
        self.fetch_json(self.request(Method::POST, &url).json(body), call_name)
            .await
    }

    async fn delete(&self, url: ApiURL, call_name: &str) -> Result<(), ApiError> {
        self.send_without_body(self.request(Method::DELETE, &url), call_name)
            .await
    }

    // Auth and profile

    pub async fn register(&self, new_user: &NewUser) -> Result<User, ApiError> {
        self.post(self.url("/auth/register"), new_user, "POST /auth/register")
            .await
    }

    /// Form-encoded email/password login. Does not store the returned token.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let url = self.url("/auth/login");
        let request = self
            .http
            .request(Method::POST, url.as_ref())
            .form(&credentials.as_form()[..]);
        self.fetch_json(request, "POST /auth/login").await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get(self.url("/users/me"), "GET /users/me").await
    }

    pub async fn update_current_user(&self, update: &UserUpdate) -> Result<User, ApiError> {
        let url = self.url("/users/me").with_filter(update);
        self.fetch_json(self.request(Method::PUT, &url), "PUT /users/me")
            .await
    }

    // Trips

    pub async fn list_trips(&self) -> Result<Vec<Trip>, ApiError> {
        self.get(self.url("/trips/"), "GET /trips").await
    }

    pub async fn create_trip(&self, trip: &NewTrip) -> Result<Trip, ApiError> {
        self.post(self.url("/trips/"), trip, "POST /trips").await
    }

    pub async fn get_trip(&self, trip_id: i64) -> Result<Trip, ApiError> {
        self.get(self.url(&format!("/trips/{}", trip_id)), "GET /trips/{id}")
            .await
    }

    pub async fn update_trip(&self, trip_id: i64, update: &TripUpdate) -> Result<Trip, ApiError> {
        let url = self.url(&format!("/trips/{}", trip_id));
        self.fetch_json(
            self.request(Method::PUT, &url).json(update),
            "PUT /trips/{id}",
        )
        .await
    }

    pub async fn delete_trip(&self, trip_id: i64) -> Result<(), ApiError> {
        self.delete(self.url(&format!("/trips/{}", trip_id)), "DELETE /trips/{id}")
            .await
    }

    // Catalog

    pub async fn search_cities(&self, search: &CitySearch) -> Result<Vec<City>, ApiError> {
        let url = self.url("/cities/").with_filter(search);
        self.get(url, "GET /cities").await
    }

    pub async fn get_city(&self, city_id: i64) -> Result<City, ApiError> {
        self.get(self.url(&format!("/cities/{}", city_id)), "GET /cities/{id}")
            .await
    }

    pub async fn search_activities(
        &self,
        search: &ActivitySearch,
    ) -> Result<Vec<Activity>, ApiError> {
        let url = self.url("/activities/").with_filter(search);
        self.get(url, "GET /activities").await
    }

    pub async fn get_activity(&self, activity_id: i64) -> Result<Activity, ApiError> {
        self.get(
            self.url(&format!("/activities/{}", activity_id)),
            "GET /activities/{id}",
        )
        .await
    }

    // Itinerary

    pub async fn list_stops(&self, trip_id: i64) -> Result<Vec<Stop>, ApiError> {
        self.get(
            self.url(&format!("/itinerary/{}/stops", trip_id)),
            "GET /itinerary/{trip_id}/stops",
        )
        .await
    }

    pub async fn add_stop(&self, trip_id: i64, stop: &NewStop) -> Result<Stop, ApiError> {
        self.post(
            self.url(&format!("/itinerary/{}/stops", trip_id)),
            stop,
            "POST /itinerary/{trip_id}/stops",
        )
        .await
    }

    pub async fn delete_stop(&self, stop_id: i64) -> Result<(), ApiError> {
        self.delete(
            self.url(&format!("/itinerary/stops/{}", stop_id)),
            "DELETE /itinerary/stops/{stop_id}",
        )
        .await
    }

    pub async fn add_stop_activity(
        &self,
        stop_id: i64,
        activity: &NewStopActivity,
    ) -> Result<StopActivity, ApiError> {
        self.post(
            self.url(&format!("/itinerary/stops/{}/activities", stop_id)),
            activity,
            "POST /itinerary/stops/{stop_id}/activities",
        )
        .await
    }

    pub async fn remove_stop_activity(&self, stop_id: i64, item_id: i64) -> Result<(), ApiError> {
        self.delete(
            self.url(&format!(
                "/itinerary/stops/{}/activities/{}",
                stop_id, item_id
            )),
            "DELETE /itinerary/stops/{stop_id}/activities/{item_id}",
        )
        .await
    }

    // Budget

    pub async fn budget_entries(&self, trip_id: i64) -> Result<Vec<BudgetEntry>, ApiError> {
        self.get(
            self.url(&format!("/budget/{}", trip_id)),
            "GET /budget/{trip_id}",
        )
        .await
    }

    pub async fn add_budget_entry(
        &self,
        trip_id: i64,
        entry: &NewBudgetEntry,
    ) -> Result<BudgetEntry, ApiError> {
        self.post(
            self.url(&format!("/budget/{}", trip_id)),
            entry,
            "POST /budget/{trip_id}",
        )
        .await
    }

    pub async fn budget_summary(&self, trip_id: i64) -> Result<BudgetSummary, ApiError> {
        self.get(
            self.url(&format!("/budget/{}/summary", trip_id)),
            "GET /budget/{trip_id}/summary",
        )
        .await
    }

    // Sharing

    /// Public read of a shared itinerary. Sent without credentials.
    pub async fn shared_trip(&self, trip_id: i64) -> Result<SharedTrip, ApiError> {
        let url = self.url(&format!("/shared/{}", trip_id));
        self.fetch_json(
            self.http.request(Method::GET, url.as_ref()),
            "GET /shared/{trip_id}",
        )
        .await
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized { detail: Option<String> },
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("InvalidUrl: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// The server-provided message of a rejected request.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => Some(detail),
            ApiError::Unauthorized { detail } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 404, .. })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: ErrorDetail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Validation(Vec<ValidationIssue>),
}

#[derive(Deserialize)]
struct ValidationIssue {
    msg: String,
}

/// Pulls the human-readable `detail` out of an error body. Validation errors
/// carry a list of issues whose messages are joined.
pub fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let detail = match parsed.detail {
        ErrorDetail::Message(message) => message,
        ErrorDetail::Validation(issues) => issues
            .into_iter()
            .map(|issue| issue.msg)
            .collect::<Vec<_>>()
            .join("; "),
    };
    let detail = detail.trim();
    (!detail.is_empty()).then(|| detail.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_from_plain_message() {
        assert_eq!(
            extract_detail(r#"{"detail":"Email already registered"}"#).as_deref(),
            Some("Email already registered")
        );
    }

    #[test]
    fn detail_from_validation_list() {
        let body = r#"{"detail":[
            {"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"},
            {"loc":["body","password"],"msg":"field required","type":"missing"}
        ]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("value is not a valid email address; field required")
        );
    }

    #[test]
    fn detail_missing_or_blank() {
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"detail":"  "}"#), None);
        assert_eq!(extract_detail(r#"{"message":"x"}"#), None);
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = GlobetrotterClient::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn rejected_error_displays_detail() {
        let err = ApiError::Rejected {
            status: 400,
            detail: "End date before start".to_string(),
        };
        assert_eq!(err.to_string(), "End date before start");
        assert_eq!(err.detail(), Some("End date before start"));
        assert!(!err.is_unauthorized());
    }
}
