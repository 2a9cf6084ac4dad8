//! Backend REST client

use std::sync::Arc;

use color_eyre::Result;
use garage::SessionStore;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::model::ErrorBody;
use crate::model::auth::{
    Credentials, LoginResponse, Message, RecoverPassword, Registration, ResetPassword,
};
use crate::model::documents::Document;
use crate::model::fuel::FuelRefill;
use crate::model::links::InterestLink;
use crate::model::maintenance::{MaintenanceService, PreventiveMaintenance};
use crate::model::services::PerformedService;
use crate::model::users::UserProfile;
use crate::model::vehicles::Vehicle;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid backend URL {url}")]
    InvalidUrl { url: String },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Backend responded with {status}: {}", .detail.as_deref().unwrap_or("no details"))]
    Backend {
        status: StatusCode,
        detail: Option<String>,
    },
}

impl Error {
    /// Message reported by the backend, if the failure came from it
    pub fn backend_detail(err: &color_eyre::Report) -> Option<Option<&str>> {
        match err.downcast_ref::<Error>()? {
            Error::Backend { detail, .. } => Some(detail.as_deref()),
            _ => None,
        }
    }
}

/// Client of the backend API
///
/// Requests are authorized with the bearer token kept by the session store, if there is one.
#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    client: reqwest::Client,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Creates a client for the backend at `base`
    ///
    /// A path in `base` is kept as a prefix of every endpoint path.
    pub fn new(base: &str, session: Arc<SessionStore>) -> Result<Self> {
        let invalid = || Error::InvalidUrl {
            url: base.to_owned(),
        };
        let mut base = Url::parse(base).map_err(|_| invalid())?;
        if base.cannot_be_a_base() {
            return Err(invalid().into());
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            base,
            client,
            session,
        })
    }

    /// Session the client authorizes with
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Endpoint URL, `path` being relative to the base even with a leading slash
    fn url(&self, path: &str) -> Result<Url> {
        self.base.join(path.trim_start_matches('/')).map_err(|_| {
            Error::InvalidUrl {
                url: format!("{}{path}", self.base),
            }
            .into()
        })
    }

    /// Prepares request with bearer authorization
    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let request = self.client.request(method, self.url(path)?);
        let request = match self.session.token().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        Ok(request)
    }

    /// Sends the request failing on non-success statuses
    async fn send(request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await.map_err(Error::Transport)?;
        let status = response.status();
        debug!(%status, url = %response.url(), "Backend responded");

        if status.is_success() {
            return Ok(response);
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        Err(Error::Backend {
            status,
            detail: body.message(),
        }
        .into())
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = Self::send(request).await?;
        Ok(response.json().await.map_err(Error::Transport)?)
    }

    /// Like `json`, but tolerates empty bodies
    async fn value(request: RequestBuilder) -> Result<serde_json::Value> {
        let response = Self::send(request).await?;
        let body = response.bytes().await.map_err(Error::Transport)?;
        if body.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        Self::json(self.request(Method::GET, path).await?).await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<serde_json::Value> {
        Self::value(self.request(Method::POST, path).await?.json(body)).await
    }

    async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<serde_json::Value> {
        Self::value(self.request(Method::PUT, path).await?.json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<serde_json::Value> {
        Self::value(self.request(Method::DELETE, path).await?).await
    }

    /// Exchanges credentials for an access token
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let request = self
            .client
            .post(self.url("/api/auth/login")?)
            .form(credentials);
        Self::json(request).await
    }

    #[instrument(skip_all, fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<Message> {
        let request = self
            .client
            .post(self.url("/api/auth/register")?)
            .json(registration);
        Self::json(request).await
    }

    #[instrument(skip(self))]
    pub async fn recover_password(&self, email: &str) -> Result<serde_json::Value> {
        let request = self
            .client
            .post(self.url("/api/auth/recover-password")?)
            .json(&RecoverPassword {
                email: email.to_owned(),
            });
        Self::value(request).await
    }

    #[instrument(skip_all)]
    pub async fn reset_password(&self, reset: &ResetPassword) -> Result<serde_json::Value> {
        let request = self
            .client
            .post(self.url("/api/auth/reset-password")?)
            .json(reset);
        Self::value(request).await
    }

    pub async fn vehicles(&self, user_id: i64) -> Result<Vec<Vehicle>> {
        self.get(&format!("/api/vehicle/{user_id}/vehicles")).await
    }

    /// Vehicle by its identifier (the plate)
    pub async fn vehicle(&self, vehicle_id: &str) -> Result<Vehicle> {
        self.get(&format!("/api/vehicle/{}", encode(vehicle_id)))
            .await
    }

    pub async fn create_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        let request = self.request(Method::POST, "/api/vehicle").await?;
        Self::json(request.json(vehicle)).await
    }

    pub async fn update_vehicle(&self, vehicle_id: &str, vehicle: &Vehicle) -> Result<Vehicle> {
        let path = format!("/api/vehicle/{}", encode(vehicle_id));
        let request = self.request(Method::PUT, &path).await?;
        Self::json(request.json(vehicle)).await
    }

    pub async fn user_refills(&self, user_id: i64) -> Result<Vec<FuelRefill>> {
        self.get(&format!("/api/fuel_refills/users/{user_id}"))
            .await
    }

    pub async fn vehicle_refills(&self, vehicle_id: &str) -> Result<Vec<FuelRefill>> {
        self.get(&format!("/api/fuel_refills/vehicles/{}", encode(vehicle_id)))
            .await
    }

    pub async fn create_refill(&self, refill: &FuelRefill) -> Result<serde_json::Value> {
        self.post("/api/fuel_refills/", refill).await
    }

    pub async fn update_refill(&self, id: i64, refill: &FuelRefill) -> Result<serde_json::Value> {
        self.put(&format!("/api/fuel_refills/{id}"), refill).await
    }

    pub async fn delete_refill(&self, id: i64) -> Result<serde_json::Value> {
        self.delete(&format!("/api/fuel_refills/{id}")).await
    }

    pub async fn vehicle_maintenance(&self, vehicle_id: &str) -> Result<Vec<PreventiveMaintenance>> {
        self.get(&format!("/api/maintenance/vehicles/{}", encode(vehicle_id)))
            .await
    }

    pub async fn create_maintenance(
        &self,
        maintenance: &PreventiveMaintenance,
    ) -> Result<serde_json::Value> {
        self.post("/api/maintenance/", maintenance).await
    }

    pub async fn delete_maintenance(&self, id: i64) -> Result<serde_json::Value> {
        self.delete(&format!("/api/maintenance/{id}")).await
    }

    /// Catalog of maintenance services
    pub async fn maintenance_services(&self) -> Result<Vec<MaintenanceService>> {
        self.get("/api/service/maintenance_service").await
    }

    pub async fn performed_services(&self, user_id: i64) -> Result<Vec<PerformedService>> {
        self.get(&format!("/api/users/{user_id}/services_performed"))
            .await
    }

    pub async fn performed_service(&self, id: i64) -> Result<PerformedService> {
        self.get(&format!("/api/services_performed/{id}")).await
    }

    pub async fn create_performed_service(
        &self,
        service: &PerformedService,
    ) -> Result<serde_json::Value> {
        self.post("/api/services_performed/", service).await
    }

    pub async fn update_performed_service(
        &self,
        id: i64,
        service: &PerformedService,
    ) -> Result<serde_json::Value> {
        self.put(&format!("/api/services_performed/{id}"), service)
            .await
    }

    pub async fn delete_performed_service(&self, id: i64) -> Result<serde_json::Value> {
        self.delete(&format!("/api/services_performed/{id}")).await
    }

    pub async fn documents(&self, user_id: i64) -> Result<Vec<Document>> {
        self.get(&format!("/api/documents/users/{user_id}/documents"))
            .await
    }

    pub async fn create_document(&self, document: &Document) -> Result<serde_json::Value> {
        self.post("/api/documents/", document).await
    }

    pub async fn delete_document(&self, id: i64) -> Result<serde_json::Value> {
        self.delete(&format!("/api/documents/{id}")).await
    }

    pub async fn links(&self) -> Result<Vec<InterestLink>> {
        self.get("/api/link/").await
    }

    /// Profile of the logged in user
    pub async fn me(&self) -> Result<UserProfile> {
        self.get("/api/user/me").await
    }

    pub async fn update_profile(&self, profile: &UserProfile) -> Result<serde_json::Value> {
        self.put("/api/user/update/", profile).await
    }

    pub async fn delete_account(&self) -> Result<serde_json::Value> {
        self.delete("/api/user/delete/").await
    }
}

/// Encodes a path segment
fn encode(segment: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(segment)
}
