//! The VaultKeep HTTP client.

use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use vaultkeep_core::error::{AppError, ErrorKind};
use vaultkeep_core::result::AppResult;
use vaultkeep_entity::secret::{CardEntry, CredentialEntry, NoteEntry};
use vaultkeep_entity::tier::SubscriptionTier;

use crate::transfer::{build_upload_body, read_download_body};

/// Cached login/password pair used for transparent re-authentication.
#[derive(Debug, Clone)]
struct Credentials {
    login: String,
    password: String,
}

/// Success envelope returned by every JSON endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[allow(dead_code)]
    success: bool,
    data: T,
}

/// Error body returned by failed requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    error: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct TokenData {
    token: String,
}

/// Object listing returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectList {
    /// Stored object names, sorted.
    pub objects: Vec<String>,
    /// Current byte usage.
    pub used_bytes: u64,
}

#[derive(Debug, Serialize)]
struct AuthBody<'a> {
    login: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<SubscriptionTier>,
}

/// Client for the VaultKeep HTTP API.
///
/// Register and login never attach a token. Every other request goes
/// through [`VaultClient::send_authorized`], which re-authenticates once
/// with the cached credentials when the server answers 401 and retries
/// the request exactly once.
#[derive(Debug)]
pub struct VaultClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Mutex<Option<Credentials>>,
    token: Mutex<Option<String>>,
}

impl VaultClient {
    /// Create a client against the given server base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: Mutex::new(None),
            token: Mutex::new(None),
        }
    }

    /// Seed the session token, e.g. from a saved session file.
    pub async fn set_token(&self, token: String) {
        *self.token.lock().await = Some(token);
    }

    /// Current session token, if any.
    pub async fn token(&self) -> Option<String> {
        self.token.lock().await.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Register a new account and start a session.
    pub async fn register(
        &self,
        login: &str,
        password: &str,
        tier: SubscriptionTier,
    ) -> AppResult<String> {
        let body = AuthBody {
            login,
            password,
            tier: Some(tier),
        };
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        let token = Self::parse::<TokenData>(response).await?.token;

        self.remember(login, password, &token).await;
        Ok(token)
    }

    /// Log in and start a session.
    pub async fn login(&self, login: &str, password: &str) -> AppResult<String> {
        let body = AuthBody {
            login,
            password,
            tier: None,
        };
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        let token = Self::parse::<TokenData>(response).await?.token;

        self.remember(login, password, &token).await;
        Ok(token)
    }

    async fn remember(&self, login: &str, password: &str, token: &str) {
        *self.credentials.lock().await = Some(Credentials {
            login: login.to_string(),
            password: password.to_string(),
        });
        *self.token.lock().await = Some(token.to_string());
    }

    /// Re-authenticate with the cached credentials and cache the new token.
    async fn re_login(&self) -> AppResult<String> {
        let credentials = self
            .credentials
            .lock()
            .await
            .clone()
            .ok_or_else(|| AppError::authentication("session expired; log in again"))?;

        debug!("Session rejected; re-authenticating");
        self.login(&credentials.login, &credentials.password).await
    }

    /// Send an authorized request built by `build`, which receives the
    /// bearer token and must produce a fresh request each call.
    ///
    /// On 401 the client re-authenticates once and retries once; the
    /// second response is final either way.
    async fn send_authorized<F>(&self, build: F) -> AppResult<reqwest::Response>
    where
        F: Fn(String) -> reqwest::RequestBuilder,
    {
        let token = match self.token().await {
            Some(token) => token,
            None => self.re_login().await?,
        };

        let response = build(token).send().await.map_err(request_error)?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check(response).await;
        }

        let token = self.re_login().await?;
        let response = build(token).send().await.map_err(request_error)?;
        Self::check(response).await
    }

    async fn check(response: reqwest::Response) -> AppResult<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let response = Self::check(response).await?;
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Malformed response body: {e}")))?;
        Ok(envelope.data)
    }

    /// Store a credential pair.
    pub async fn create_credential(&self, entry: &CredentialEntry) -> AppResult<CredentialEntry> {
        let response = self
            .send_authorized(|token| {
                self.http
                    .post(self.url("/api/secrets/credentials"))
                    .bearer_auth(token)
                    .json(entry)
            })
            .await?;
        Self::parse(response).await
    }

    /// Fetch one credential by resource name.
    pub async fn get_credential(&self, resource: &str) -> AppResult<CredentialEntry> {
        let response = self
            .send_authorized(|token| {
                self.http
                    .get(self.url(&format!("/api/secrets/credentials/{resource}")))
                    .bearer_auth(token)
            })
            .await?;
        Self::parse(response).await
    }

    /// List stored credentials.
    pub async fn list_credentials(&self) -> AppResult<Vec<CredentialEntry>> {
        let response = self
            .send_authorized(|token| {
                self.http
                    .get(self.url("/api/secrets/credentials"))
                    .bearer_auth(token)
            })
            .await?;
        Self::parse(response).await
    }

    /// Delete one credential by resource name.
    pub async fn delete_credential(&self, resource: &str) -> AppResult<()> {
        self.send_authorized(|token| {
            self.http
                .delete(self.url(&format!("/api/secrets/credentials/{resource}")))
                .bearer_auth(token)
        })
        .await?;
        Ok(())
    }

    /// Store a text note.
    pub async fn create_note(&self, entry: &NoteEntry) -> AppResult<NoteEntry> {
        let response = self
            .send_authorized(|token| {
                self.http
                    .post(self.url("/api/secrets/notes"))
                    .bearer_auth(token)
                    .json(entry)
            })
            .await?;
        Self::parse(response).await
    }

    /// Fetch one note by label.
    pub async fn get_note(&self, label: &str) -> AppResult<NoteEntry> {
        let response = self
            .send_authorized(|token| {
                self.http
                    .get(self.url(&format!("/api/secrets/notes/{label}")))
                    .bearer_auth(token)
            })
            .await?;
        Self::parse(response).await
    }

    /// List stored notes.
    pub async fn list_notes(&self) -> AppResult<Vec<NoteEntry>> {
        let response = self
            .send_authorized(|token| {
                self.http
                    .get(self.url("/api/secrets/notes"))
                    .bearer_auth(token)
            })
            .await?;
        Self::parse(response).await
    }

    /// Delete one note by label.
    pub async fn delete_note(&self, label: &str) -> AppResult<()> {
        self.send_authorized(|token| {
            self.http
                .delete(self.url(&format!("/api/secrets/notes/{label}")))
                .bearer_auth(token)
        })
        .await?;
        Ok(())
    }

    /// Store a payment card.
    pub async fn create_card(&self, entry: &CardEntry) -> AppResult<CardEntry> {
        let response = self
            .send_authorized(|token| {
                self.http
                    .post(self.url("/api/secrets/cards"))
                    .bearer_auth(token)
                    .json(entry)
            })
            .await?;
        Self::parse(response).await
    }

    /// Fetch one card by number.
    pub async fn get_card(&self, number: &str) -> AppResult<CardEntry> {
        let response = self
            .send_authorized(|token| {
                self.http
                    .get(self.url(&format!("/api/secrets/cards/{number}")))
                    .bearer_auth(token)
            })
            .await?;
        Self::parse(response).await
    }

    /// List stored cards.
    pub async fn list_cards(&self) -> AppResult<Vec<CardEntry>> {
        let response = self
            .send_authorized(|token| {
                self.http
                    .get(self.url("/api/secrets/cards"))
                    .bearer_auth(token)
            })
            .await?;
        Self::parse(response).await
    }

    /// Delete one card by number.
    pub async fn delete_card(&self, number: &str) -> AppResult<()> {
        self.send_authorized(|token| {
            self.http
                .delete(self.url(&format!("/api/secrets/cards/{number}")))
                .bearer_auth(token)
        })
        .await?;
        Ok(())
    }

    /// List stored objects and usage.
    pub async fn list_objects(&self) -> AppResult<ObjectList> {
        let response = self
            .send_authorized(|token| {
                self.http.get(self.url("/api/objects")).bearer_auth(token)
            })
            .await?;
        Self::parse(response).await
    }

    /// Upload an object as a framed transfer.
    ///
    /// The framed body is built once so a 401 retry resends identical
    /// bytes.
    pub async fn upload_object(&self, name: &str, data: Bytes) -> AppResult<()> {
        let body = build_upload_body(name, &data)?;

        self.send_authorized(|token| {
            self.http
                .post(self.url("/api/objects/upload"))
                .bearer_auth(token)
                .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
                .body(body.clone())
        })
        .await?;
        Ok(())
    }

    /// Download an object, decoding the framed response body.
    pub async fn download_object(&self, name: &str) -> AppResult<Bytes> {
        let response = self
            .send_authorized(|token| {
                self.http
                    .get(self.url(&format!("/api/objects/{name}/download")))
                    .bearer_auth(token)
            })
            .await?;

        let stream = response.bytes_stream().map_err(std::io::Error::other);
        let (_, data) = read_download_body(Box::pin(stream)).await?;
        Ok(data)
    }

    /// Delete one stored object.
    pub async fn delete_object(&self, name: &str) -> AppResult<()> {
        self.send_authorized(|token| {
            self.http
                .delete(self.url(&format!("/api/objects/{name}")))
                .bearer_auth(token)
        })
        .await?;
        Ok(())
    }
}

fn request_error(err: reqwest::Error) -> AppError {
    AppError::with_source(ErrorKind::Internal, format!("Request failed: {err}"), err)
}

/// Map a failed HTTP response back into the domain error taxonomy.
async fn error_from_response(response: reqwest::Response) -> AppError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    };

    let kind = match status {
        StatusCode::BAD_REQUEST => ErrorKind::Validation,
        StatusCode::UNAUTHORIZED => ErrorKind::Authentication,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::CONFLICT => ErrorKind::Conflict,
        StatusCode::PRECONDITION_FAILED => ErrorKind::QuotaExceeded,
        StatusCode::GATEWAY_TIMEOUT => ErrorKind::Timeout,
        _ => ErrorKind::Internal,
    };

    AppError::new(kind, message)
}
