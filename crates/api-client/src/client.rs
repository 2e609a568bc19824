//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{
    AuthApi, BlogsApi, CategoriesApi, ChatApi, ColorsApi, ImagesApi, ProductsApi, SettingsApi,
    SizesApi, UsersApi,
};
use crate::envelope::ApiEnvelope;
use crate::error::{ApiError, ApiResult};
use crate::refresh::RefreshCoordinator;
use crate::session::AuthSession;
use crate::store::{FileTokenStore, TokenPair, TokenStore};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;
use velora_telemetry::Timer;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Velora back-office API client
///
/// This client wraps `reqwest` and adds:
/// - Bearer authentication from the persisted token store
/// - Transparent 401 handling: one token refresh, one replay
/// - Single-flight refresh shared by concurrent requests
/// - Request correlation IDs for tracing
///
/// Failures other than the refresh-and-replay cycle are surfaced to the
/// caller without automatic retries.
#[derive(Clone)]
pub struct AdminClient {
    inner: Client,
    config: Arc<ClientConfig>,
    store: Arc<dyn TokenStore>,
    refresh: Arc<RefreshCoordinator>,
}

impl AdminClient {
    /// Create a new client with configuration from the environment and the
    /// file-backed token store
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        let store = FileTokenStore::new()?;
        Self::with_store(config, Arc::new(store))
    }

    /// Create a new client with specific configuration and the file-backed
    /// token store
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        let store = FileTokenStore::new()?;
        Self::with_store(config, Arc::new(store))
    }

    /// Create a new client with a specific token store
    pub fn with_store(config: ClientConfig, store: Arc<dyn TokenStore>) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static("velora-api-client/0.3"),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            store,
            refresh: Arc::new(RefreshCoordinator::new()),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the token store
    #[must_use]
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Create a session holder bound to this client
    #[must_use]
    pub fn session(&self) -> AuthSession {
        AuthSession::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access authentication endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access category endpoints
    #[must_use]
    pub fn categories(&self) -> CategoriesApi {
        CategoriesApi::new(self.clone())
    }

    /// Access color endpoints
    #[must_use]
    pub fn colors(&self) -> ColorsApi {
        ColorsApi::new(self.clone())
    }

    /// Access size endpoints
    #[must_use]
    pub fn sizes(&self) -> SizesApi {
        SizesApi::new(self.clone())
    }

    /// Access product endpoints
    #[must_use]
    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(self.clone())
    }

    /// Access customer administration endpoints
    #[must_use]
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Access blog endpoints
    #[must_use]
    pub fn blogs(&self) -> BlogsApi {
        BlogsApi::new(self.clone())
    }

    /// Access messaging endpoints
    #[must_use]
    pub fn chat(&self) -> ChatApi {
        ChatApi::new(self.clone())
    }

    /// Access image upload endpoints
    #[must_use]
    pub fn images(&self) -> ImagesApi {
        ImagesApi::new(self.clone())
    }

    /// Access system settings endpoints
    #[must_use]
    pub fn settings(&self) -> SettingsApi {
        SettingsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Perform a GET request
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self
            .send_with_refresh(Method::GET, path, Option::<&()>::None)
            .await?;
        Self::handle_envelope(response).await
    }

    /// Perform a POST request
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .send_with_refresh(Method::POST, path, Some(body))
            .await?;
        Self::handle_envelope(response).await
    }

    /// Perform a PUT request
    #[instrument(skip(self, body))]
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .send_with_refresh(Method::PUT, path, Some(body))
            .await?;
        Self::handle_envelope(response).await
    }

    /// Perform a PUT request whose envelope carries no payload
    #[instrument(skip(self, body))]
    pub async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        let response = self
            .send_with_refresh(Method::PUT, path, Some(body))
            .await?;
        Self::handle_unit(response).await
    }

    /// Perform a DELETE request
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self
            .send_with_refresh(Method::DELETE, path, Option::<&()>::None)
            .await?;
        Self::handle_unit(response).await
    }

    /// Perform a multipart POST request
    ///
    /// `make_form` is invoked once per attempt because a multipart body
    /// cannot be reused after it has been sent.
    pub async fn post_multipart<T, F>(&self, path: &str, make_form: F) -> ApiResult<T>
    where
        T: DeserializeOwned,
        F: Fn() -> reqwest::multipart::Form,
    {
        let url = self.endpoint_url(path);
        let access = self.access_token()?;

        let response = self
            .send_multipart_once(&url, access.as_deref(), make_form())
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::handle_envelope(response).await;
        }

        let pair = self.refresh_session().await?;
        let retry = self
            .send_multipart_once(&url, Some(&pair.access_token), make_form())
            .await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized(
                "Request rejected again after token refresh".to_string(),
            ));
        }
        Self::handle_envelope(retry).await
    }

    // -------------------------------------------------------------------------
    // Request execution
    // -------------------------------------------------------------------------

    /// Build an absolute endpoint URL
    fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Read the current access token, if any
    fn access_token(&self) -> ApiResult<Option<String>> {
        Ok(self.store.load()?.map(|pair| pair.access_token))
    }

    /// Send a request; on the first 401 refresh the session once and replay.
    ///
    /// A second 401 on the replayed request is final. All other statuses are
    /// handed back for envelope handling.
    async fn send_with_refresh<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<Response> {
        let url = self.endpoint_url(path);
        let access = self.access_token()?;

        let response = self
            .send_once(method.clone(), &url, body, access.as_deref())
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!(%url, "Received 401, attempting token refresh");
        let pair = self.refresh_session().await?;

        let retry = self
            .send_once(method, &url, body, Some(&pair.access_token))
            .await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            warn!(%url, "Replayed request was rejected again");
            return Err(ApiError::Unauthorized(
                "Request rejected again after token refresh".to_string(),
            ));
        }
        Ok(retry)
    }

    /// Issue a single request without any recovery
    async fn send_once<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        access_token: Option<&str>,
    ) -> ApiResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let mut request = self.inner.request(method, url).header(X_REQUEST_ID, &request_id);

        if let Some(token) = access_token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(b) = body {
            request = request.json(b);
        }

        debug!(request_id = %request_id, %url, "Sending request");
        velora_telemetry::metrics().increment("api.requests");
        let timer = Timer::start("api.request_ms");
        let result = request.send().await.map_err(ApiError::Request);
        timer.stop();
        result
    }

    /// Issue a single multipart request without any recovery
    async fn send_multipart_once(
        &self,
        url: &str,
        access_token: Option<&str>,
        form: reqwest::multipart::Form,
    ) -> ApiResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let mut request = self
            .inner
            .post(url)
            .header(X_REQUEST_ID, &request_id)
            .multipart(form);

        if let Some(token) = access_token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        debug!(request_id = %request_id, %url, "Sending multipart request");
        velora_telemetry::metrics().increment("api.requests");
        let timer = Timer::start("api.request_ms");
        let result = request.send().await.map_err(ApiError::Request);
        timer.stop();
        result
    }

    /// Parse a response into the envelope payload
    async fn handle_envelope<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if status.is_success() {
            let envelope: ApiEnvelope<T> = response.json().await.map_err(ApiError::Request)?;
            envelope.into_data()
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Self::error_from_failure(status, &body))
        }
    }

    /// Parse a response expected to carry no payload
    async fn handle_unit(response: Response) -> ApiResult<()> {
        let status = response.status();
        if status.is_success() {
            let envelope: ApiEnvelope<serde_json::Value> =
                response.json().await.map_err(ApiError::Request)?;
            envelope.into_unit()
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Self::error_from_failure(status, &body))
        }
    }

    /// Map a non-success HTTP response to an error
    ///
    /// The backend usually reports failures inside the envelope; fall back to
    /// the raw body when it does not.
    fn error_from_failure(status: StatusCode, body: &str) -> ApiError {
        if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body) {
            ApiError::backend(envelope.message, envelope.sub_errors)
        } else {
            let message = if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            };
            ApiError::api(status.as_u16(), message)
        }
    }

    // -------------------------------------------------------------------------
    // Token refresh
    // -------------------------------------------------------------------------

    /// Renew the session, single-flighted across concurrent callers
    ///
    /// On success the new pair is persisted before any queued request
    /// resumes. On failure both tokens are cleared before the queue is
    /// rejected; the failure is terminal for the session.
    pub(crate) async fn refresh_session(&self) -> ApiResult<TokenPair> {
        let client = self.clone();
        self.refresh_with(move |refresh_token| async move {
            client.call_refresh_endpoint(&refresh_token).await
        })
        .await
    }

    /// Single-flight refresh with an injectable transport, for testability
    async fn refresh_with<F, Fut>(&self, transport: F) -> ApiResult<TokenPair>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = ApiResult<TokenPair>>,
    {
        let store = Arc::clone(&self.store);
        self.refresh
            .run(|| async move {
                let Some(stored) = store.load()? else {
                    return Err(ApiError::MissingRefreshToken);
                };
                match transport(stored.refresh_token).await {
                    Ok(pair) => {
                        store.save(&pair)?;
                        Ok(pair)
                    }
                    Err(e) => {
                        warn!(error = %e, "Token refresh failed, clearing session");
                        store.clear()?;
                        Err(ApiError::SessionExpired(e.to_string()))
                    }
                }
            })
            .await
    }

    /// Exchange the refresh token for a new pair
    ///
    /// Deliberately bypasses `send_with_refresh`: a 401 here means the
    /// refresh token itself is no longer valid.
    async fn call_refresh_endpoint(&self, refresh_token: &str) -> ApiResult<TokenPair> {
        let url = self.endpoint_url("auth/refresh-token");
        let request_id = Uuid::new_v4().to_string();

        velora_telemetry::metrics().increment("auth.refresh");
        let response = self
            .inner
            .post(&url)
            .header(X_REQUEST_ID, &request_id)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .map_err(ApiError::Request)?;

        Self::handle_envelope(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTokenStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;
    use tokio::time::{sleep, Duration};

    fn test_client(store: Arc<dyn TokenStore>) -> AdminClient {
        AdminClient::with_store(ClientConfig::development(), store).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let store = Arc::new(MemoryTokenStore::new());
        let client = AdminClient::with_store(ClientConfig::development(), store);
        assert!(client.is_ok());
    }

    #[test]
    fn test_endpoint_url() {
        let client = test_client(Arc::new(MemoryTokenStore::new()));
        assert_eq!(
            client.endpoint_url("products"),
            "http://localhost:8080/api/v1/products"
        );
        assert_eq!(
            client.endpoint_url("/products/7"),
            "http://localhost:8080/api/v1/products/7"
        );
    }

    #[test]
    fn test_error_from_failure_with_envelope() {
        let body = r#"{
            "timestamp": "2026-08-06T10:15:00Z",
            "httpStatus": 409,
            "isSuccess": false,
            "message": "Color already exists",
            "subErrors": [{"field": "name", "message": "duplicate"}]
        }"#;

        let err = AdminClient::error_from_failure(StatusCode::CONFLICT, body);
        match err {
            ApiError::Backend { message, sub_errors } => {
                assert_eq!(message, "Color already exists");
                assert_eq!(sub_errors.len(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_from_failure_with_plain_body() {
        let err = AdminClient::error_from_failure(StatusCode::BAD_GATEWAY, "upstream down");
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_refresh_without_stored_tokens() {
        let client = test_client(Arc::new(MemoryTokenStore::new()));
        let err = client
            .refresh_with(|_| async { Ok(TokenPair::new("a", "r")) })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingRefreshToken));
    }

    #[tokio::test]
    async fn test_refresh_persists_new_pair_on_success() {
        let store = Arc::new(MemoryTokenStore::with_tokens(TokenPair::new(
            "stale-access",
            "refresh-1",
        )));
        let client = test_client(store.clone());

        let pair = client
            .refresh_with(|refresh_token| async move {
                assert_eq!(refresh_token, "refresh-1");
                Ok(TokenPair::new("fresh-access", "refresh-2"))
            })
            .await
            .unwrap();

        assert_eq!(pair.access_token, "fresh-access");
        let stored = store.load().unwrap().unwrap();
        assert_eq!(stored.access_token, "fresh-access");
        assert_eq!(stored.refresh_token, "refresh-2");
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_store() {
        let store = Arc::new(MemoryTokenStore::with_tokens(TokenPair::new(
            "stale-access",
            "refresh-1",
        )));
        let client = test_client(store.clone());

        let err = client
            .refresh_with(|_| async {
                Err(ApiError::api(401, "refresh token revoked"))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::SessionExpired(_)));
        assert!(store.load().unwrap().is_none());
    }

    /// Three concurrent refreshes share one transport call and all observe
    /// the new pair.
    #[tokio::test]
    async fn test_concurrent_refreshes_share_one_call() {
        let store = Arc::new(MemoryTokenStore::with_tokens(TokenPair::new(
            "stale-access",
            "refresh-1",
        )));
        let client = test_client(store.clone());
        let calls = Arc::new(AtomicUsize::new(0));
        let release = Arc::new(Notify::new());

        let mut tasks = Vec::new();
        for _ in 0..3 {
            let client = client.clone();
            let calls = Arc::clone(&calls);
            let release = Arc::clone(&release);
            tasks.push(tokio::spawn(async move {
                client
                    .refresh_with(move |_| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        release.notified().await;
                        Ok(TokenPair::new("fresh-access", "refresh-2"))
                    })
                    .await
            }));
        }

        sleep(Duration::from_millis(50)).await;
        release.notify_waiters();

        for task in tasks {
            let pair = task.await.unwrap().unwrap();
            assert_eq!(pair.access_token, "fresh-access");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            store.load().unwrap().unwrap().refresh_token,
            "refresh-2"
        );
    }
}
