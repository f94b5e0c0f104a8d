//! SMERSH API client implementation

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Certificate, Client as HttpClient, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::RwLock;

use super::models::{JwtToken, LoginResponse};
use super::wire::{DESCRIPTION_KEY, parse_body};
use super::{LD_JSON, SmershApi};
use crate::error::{ApiError, ConfigError, Result};

/// Default `User-Agent` header
pub const DEFAULT_USER_AGENT: &str = "SmershRustClient";

/// Login endpoint, outside of the resource root
const AUTH_PATH: &str = "/authentication_token";

/// Host list upload endpoint
const UPLOAD_HOSTS_PATH: &str = "/api/upload/host";

/// Connection settings of a [`SmershClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Server root, e.g. `https://smersh.example`
    pub url: String,
    pub user_agent: String,
    /// PEM bundle used to verify the server certificate
    pub certificate: Option<PathBuf>,
    /// Skip server certificate verification entirely
    pub insecure: bool,
}

impl ClientOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            certificate: None,
            insecure: false,
        }
    }
}

/// Result of a host list upload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadReport {
    /// Domains the backend refused to import
    #[serde(default)]
    pub rejected_domains: Vec<String>,
}

/// SMERSH API client
pub struct SmershClient {
    http: HttpClient,
    base_url: String,
    auth_state: Arc<RwLock<AuthState>>,
}

/// Internal authentication state
#[derive(Debug, Clone, Default)]
struct AuthState {
    token: Option<String>,
}

/// Map an HTTP status to the error it stands for. `None` means the body is data.
pub(crate) fn status_error(status: StatusCode, path: &str, body: &str) -> Option<ApiError> {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Some(ApiError::ValidationRejected(rejection_reason(body)))
        }
        StatusCode::UNAUTHORIZED => Some(ApiError::Unauthorized),
        StatusCode::FORBIDDEN => Some(ApiError::Forbidden),
        StatusCode::NOT_FOUND => Some(ApiError::NotFound(path.to_string())),
        StatusCode::METHOD_NOT_ALLOWED => Some(ApiError::MethodNotAllowed(path.to_string())),
        status if status.is_server_error() => {
            let detail = body.trim();
            Some(ApiError::ServerError(if detail.is_empty() {
                status.to_string()
            } else {
                format!("{}: {}", status, detail)
            }))
        }
        status if status.is_client_error() => Some(ApiError::InvalidResponse(format!(
            "Unexpected status code: {}",
            status
        ))),
        _ => None,
    }
}

/// Description of a 400 answer: the hydra description when present, the raw body otherwise.
fn rejection_reason(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get(DESCRIPTION_KEY).and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            let raw = body.trim();
            if raw.is_empty() {
                "Bad request".to_string()
            } else {
                raw.to_string()
            }
        })
}

impl SmershClient {
    /// Create a new SMERSH API client
    pub fn new(options: &ClientOptions) -> Result<Self> {
        let mut builder = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(options.user_agent.clone());

        if let Some(path) = &options.certificate {
            if !path.exists() {
                return Err(ConfigError::MissingCertificate(path.display().to_string()).into());
            }
            let pem = std::fs::read(path)?;
            let certificate = Certificate::from_pem(&pem)
                .map_err(|e| ConfigError::Invalid(format!("certificate {}: {}", path.display(), e)))?;
            builder = builder.add_root_certificate(certificate);
        }

        if options.insecure {
            warn!("Server certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: options.url.trim_end_matches('/').to_string(),
            auth_state: Arc::new(RwLock::new(AuthState::default())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Set the bearer token sent with every request
    pub async fn set_token(&self, token: impl Into<String>) {
        self.auth_state.write().await.token = Some(token.into());
    }

    pub async fn is_authenticated(&self) -> bool {
        self.auth_state.read().await.token.is_some()
    }

    /// Current token with its decoded claims
    pub async fn token(&self) -> Result<JwtToken> {
        let raw = self
            .auth_state
            .read()
            .await
            .token
            .clone()
            .ok_or(ApiError::Unauthorized)?;

        Ok(JwtToken::parse(raw)?)
    }

    /// Bare id of the logged-in user, taken from the token's `user` claim.
    ///
    /// An expired token counts as no login.
    pub async fn authenticated_user_id(&self) -> Result<String> {
        let token = self.token().await?;
        if token.is_expired() {
            debug!("Bearer token expired at {:?}", token.expires_at);
            return Err(ApiError::Unauthorized.into());
        }

        token
            .user_id()
            .map(str::to_string)
            .ok_or_else(|| ApiError::InvalidToken.into())
    }

    /// Log in and keep the issued bearer token
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<JwtToken> {
        debug!("Authenticating as {}", username);

        let body = json!({ "username": username, "password": password });
        let response = match self
            .request(Method::POST, AUTH_PATH, Some(body), LD_JSON)
            .await
        {
            Ok(response) => response,
            Err(crate::error::Error::Api(ApiError::Unauthorized)) => {
                return Err(ApiError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let login: LoginResponse = match response {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse login response: {}", e))
            })?,
            None => {
                return Err(
                    ApiError::InvalidResponse("Login answered without data".to_string()).into(),
                );
            }
        };

        if login.is_rejected() {
            debug!("Login rejected: {:?}", login.message);
            return Err(ApiError::InvalidCredentials.into());
        }

        let raw = login
            .token
            .ok_or_else(|| ApiError::InvalidResponse("Login answered without token".to_string()))?;

        let token = JwtToken::parse(raw.clone())?;
        self.set_token(raw).await;

        Ok(token)
    }

    /// Upload a host list file into the named mission
    pub async fn upload_hosts(&self, file: &Path, mission_name: &str) -> Result<UploadReport> {
        let content = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "hosts".to_string());

        let form = Form::new()
            .text("missionName", mission_name.to_string())
            .part("filename", Part::bytes(content).file_name(file_name));

        let url = self.url(UPLOAD_HOSTS_PATH);
        debug!("POST {} (multipart)", url);

        let request = self.http.post(&url).multipart(form);
        let response = self.send(request, UPLOAD_HOSTS_PATH).await?;

        match response {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse upload report: {}", e)).into()
            }),
            None => Ok(UploadReport::default()),
        }
    }

    /// Attach auth headers, send, and map the answer
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Option<Value>> {
        let mut request = request.header(ACCEPT, LD_JSON);

        if let Some(token) = &self.auth_state.read().await.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        debug!("Response status: {}", status);

        let text = response.text().await.map_err(ApiError::from)?;

        if let Some(err) = status_error(status, path, &text) {
            return Err(err.into());
        }

        Ok(parse_body(&text))
    }
}

#[async_trait]
impl SmershApi for SmershClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        content_type: &str,
    ) -> Result<Option<Value>> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, content_type)
                .body(serde_json::to_vec(&body)?);
        }

        self.send(request, path).await
    }
}
