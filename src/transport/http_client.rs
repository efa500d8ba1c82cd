use crate::config::Config;
use crate::constants::{CONTENT_TYPE_JSON, REFRESH_PATH};
use crate::error::ApiError;
use crate::transport::redirect::{LoginRedirect, NoopRedirect};
use async_trait::async_trait;
use reqwest::{header, Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Single entry point for all backend calls.
///
/// Implemented by [`ApiClient`]; services stay generic over this trait so
/// they can be exercised against any transport.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issues `method path` relative to the configured base URL, carrying
    /// the ambient session cookies, and deserializes the JSON response.
    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.request_with_headers(method, path, body, &[]).await
    }

    /// Like [`HttpClient::request`], with per-call header overrides. An
    /// override shadows the client-wide default of the same name (so a call
    /// can swap out `Content-Type`) and is sent unchanged on the replay after
    /// a session refresh.
    async fn request_with_headers<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: &[(String, String)],
    ) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned;
}

/// HTTP client for the MES backend with automatic session renewal.
///
/// Session credentials live in the client's cookie store and are written
/// exclusively by backend `Set-Cookie` headers; this code never reads or
/// parses a token. The only recovery performed locally is the single
/// refresh-and-replay cycle on a 401:
///
/// - at most two physical attempts per logical request,
/// - at most one call to the refresh endpoint per logical request,
/// - a 401 from the refresh endpoint itself is never retried,
/// - transport failures and non-401 statuses are propagated untouched.
///
/// Concurrent requests that hit a 401 at the same time each run their own
/// refresh cycle; there is no cross-request coalescing.
pub struct ApiClient {
    client: Client,
    config: Arc<Config>,
    redirect: Arc<dyn LoginRedirect>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.rest_api.base_url)
            .finish()
    }
}

impl ApiClient {
    /// Creates a client with the default no-op login redirect.
    pub fn new(config: Arc<Config>) -> Result<Self, ApiError> {
        Self::with_redirect(config, Arc::new(NoopRedirect))
    }

    /// Creates a client that invokes `redirect` when session renewal fails.
    pub fn with_redirect(
        config: Arc<Config>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static(CONTENT_TYPE_JSON),
        );

        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_secs(config.rest_api.timeout))
            .build()?;

        Ok(Self {
            client,
            config,
            redirect,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.rest_api.base_url
    }

    /// One physical attempt. No retry logic lives here.
    ///
    /// Overrides are applied before the body so a caller-supplied
    /// `Content-Type` wins over the one `json()` would set.
    async fn dispatch<B>(
        &self,
        method: &Method,
        path: &str,
        body: Option<&B>,
        headers: &[(String, String)],
    ) -> Result<Response, ApiError>
    where
        B: Serialize + Sync,
    {
        let url = format!("{}{}", self.config.rest_api.base_url, path);
        debug!("Sending {} request to {}", method, url);

        let mut request = self.client.request(method.clone(), &url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// `POST` to the refresh endpoint, no body. The backend identifies the
    /// session from the ambient refresh cookie and answers with a fresh
    /// session cookie on success.
    #[instrument(skip(self))]
    async fn refresh_session(&self) -> Result<(), ApiError> {
        let response = self
            .dispatch::<()>(&Method::POST, REFRESH_PATH, None, &[])
            .await?;
        let status = response.status();

        if status.is_success() {
            debug!("Session refreshed");
            Ok(())
        } else {
            let body = response.text().await?;
            error!("Session refresh failed. Status: {}, Body: {}", status, body);
            Err(ApiError::Status { status, body })
        }
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            // Some mutation endpoints answer with an empty body.
            let payload = if body.is_empty() { "null" } else { body.as_str() };
            Ok(serde_json::from_str(payload)?)
        } else {
            error!("API request failed. Status: {}, Body: {}", status, body);
            Err(ApiError::Status { status, body })
        }
    }
}

#[async_trait]
impl HttpClient for ApiClient {
    #[instrument(skip(self, body))]
    async fn request_with_headers<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: &[(String, String)],
    ) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut retried = false;

        loop {
            let response = self.dispatch(&method, path, body, headers).await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED && !retried && path != REFRESH_PATH {
                retried = true;
                debug!("Got 401 on {} {}, attempting session refresh", method, path);

                match self.refresh_session().await {
                    Ok(()) => continue,
                    Err(refresh_err) => {
                        warn!("Session renewal failed, requesting login redirect");
                        self.redirect.redirect_to_login();
                        return Err(ApiError::SessionInvalid(Box::new(refresh_err)));
                    }
                }
            }

            return Self::handle_response(response).await;
        }
    }
}

#[cfg(test)]
mod tests_api_client {
    use super::*;
    use crate::utils::logger::setup_logger;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRedirect {
        calls: AtomicUsize,
    }

    impl CountingRedirect {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }

        fn count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl LoginRedirect for CountingRedirect {
        fn redirect_to_login(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn test_config(base_url: &str) -> Arc<Config> {
        Arc::new(Config {
            rest_api: crate::config::RestApiConfig {
                base_url: base_url.to_string(),
                timeout: 5,
            },
        })
    }

    fn create_client(server: &Server) -> ApiClient {
        ApiClient::new(test_config(&server.url())).unwrap()
    }

    #[tokio::test]
    async fn test_get_request_success() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/articles")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"name": "sheet"}]"#)
            .create_async()
            .await;

        let client = create_client(&server);
        let result: Value = client
            .request::<(), Value>(Method::GET, "/articles", None)
            .await
            .unwrap();

        assert_eq!(result[0]["name"], "sheet");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_401_then_refresh_then_replay() {
        // Scenario A: the first attempt carries no session cookie and gets a
        // 401; the refresh response sets one; the replay carries it.
        setup_logger();
        let mut server = Server::new_async().await;

        let first = server
            .mock("GET", "/inventory")
            .match_header("cookie", Matcher::Missing)
            .with_status(401)
            .with_body(r#"{"message": "Access token missing"}"#)
            .create_async()
            .await;

        let refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_header("set-cookie", "accessToken=renewed; Path=/")
            .with_body("{}")
            .create_async()
            .await;

        let replay = server
            .mock("GET", "/inventory")
            .match_header("cookie", "accessToken=renewed")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"inventory": [{"reference": "REF-1", "uuid": "u1", "step_name": "Washing"}]}"#)
            .create_async()
            .await;

        let client = create_client(&server);
        let result: Value = client
            .request::<(), Value>(Method::GET, "/inventory", None)
            .await
            .unwrap();

        assert_eq!(result["inventory"][0]["reference"], "REF-1");
        first.assert_async().await;
        refresh.assert_async().await;
        replay.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_401_error_is_not_retried() {
        // Scenario B: a 500 rejects immediately, no refresh call.
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/stats")
            .with_status(500)
            .with_body("Internal Server Error")
            .expect(1)
            .create_async()
            .await;

        let refresh = server
            .mock("POST", "/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let client = create_client(&server);
        let result = client
            .request::<(), Value>(Method::GET, "/stats", None)
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!err.is_session_invalid());
        mock.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_refresh_redirects_to_login() {
        // Scenario C: refresh answers 403, the caller gets the refresh error
        // and the redirect hook fires exactly once.
        setup_logger();
        let mut server = Server::new_async().await;

        let original = server
            .mock("GET", "/steps")
            .with_status(401)
            .with_body("Unauthorized")
            .expect(1)
            .create_async()
            .await;

        let refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(403)
            .with_body(r#"{"message": "Session expired, please log in again"}"#)
            .expect(1)
            .create_async()
            .await;

        let redirect = CountingRedirect::new();
        let client =
            ApiClient::with_redirect(test_config(&server.url()), redirect.clone()).unwrap();

        let result = client
            .request::<(), Value>(Method::GET, "/steps", None)
            .await;

        let err = result.unwrap_err();
        assert!(err.is_session_invalid());
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(redirect.count(), 1);
        original.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_single_retry_law() {
        // Two consecutive 401s on the same logical request: one refresh, two
        // physical attempts, then the second 401 is surfaced as-is.
        setup_logger();
        let mut server = Server::new_async().await;

        let original = server
            .mock("GET", "/portals")
            .with_status(401)
            .with_body("Unauthorized")
            .expect(2)
            .create_async()
            .await;

        let refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;

        let redirect = CountingRedirect::new();
        let client =
            ApiClient::with_redirect(test_config(&server.url()), redirect.clone()).unwrap();

        let result = client
            .request::<(), Value>(Method::GET, "/portals", None)
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(!err.is_session_invalid());
        assert_eq!(redirect.count(), 0);
        original.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_401_on_refresh_path_is_not_retried() {
        // An explicit call to the refresh endpoint never triggers a second
        // refresh chain.
        setup_logger();
        let mut server = Server::new_async().await;

        let refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(401)
            .with_body("Unauthorized")
            .expect(1)
            .create_async()
            .await;

        let client = create_client(&server);
        let result = client
            .request::<(), Value>(Method::POST, "/auth/refresh", None)
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(!err.is_session_invalid());
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_concurrent_401s_refresh_independently() {
        // Scenario D: no cross-request coalescing is guaranteed; each chain
        // refreshes on its own and both replays succeed.
        setup_logger();
        let mut server = Server::new_async().await;

        let users_401 = server
            .mock("GET", "/users")
            .match_header("cookie", Matcher::Missing)
            .with_status(401)
            .create_async()
            .await;
        let users_ok = server
            .mock("GET", "/users")
            .match_header("cookie", "accessToken=renewed")
            .with_status(200)
            .with_body(r#"[{"uuid": "u1"}]"#)
            .create_async()
            .await;

        let portals_401 = server
            .mock("GET", "/portals")
            .match_header("cookie", Matcher::Missing)
            .with_status(401)
            .create_async()
            .await;
        let portals_ok = server
            .mock("GET", "/portals")
            .match_header("cookie", "accessToken=renewed")
            .with_status(200)
            .with_body(r#"[{"portal_id": "P-1"}]"#)
            .create_async()
            .await;

        let refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_header("set-cookie", "accessToken=renewed; Path=/")
            .with_body("{}")
            .expect_at_least(1)
            .create_async()
            .await;

        let client = create_client(&server);
        let (users, portals) = tokio::join!(
            client.request::<(), Value>(Method::GET, "/users", None),
            client.request::<(), Value>(Method::GET, "/portals", None),
        );

        assert_eq!(users.unwrap()[0]["uuid"], "u1");
        assert_eq!(portals.unwrap()[0]["portal_id"], "P-1");
        users_401.assert_async().await;
        users_ok.assert_async().await;
        portals_401.assert_async().await;
        portals_ok.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_transport_error_is_not_retried() {
        setup_logger();

        // Nothing listens on the discard port.
        let client = ApiClient::new(test_config("http://127.0.0.1:9")).unwrap();
        let result = client
            .request::<(), Value>(Method::GET, "/articles", None)
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn test_post_request_sends_json_body() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/steps")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"step_name": "Drying", "reader_type": "portal"})))
            .with_status(200)
            .with_body(r#"{"step_id": 4, "step_name": "Drying"}"#)
            .create_async()
            .await;

        let client = create_client(&server);
        let body = json!({"step_name": "Drying", "reader_type": "portal"});
        let result: Value = client
            .request(Method::POST, "/steps", Some(&body))
            .await
            .unwrap();

        assert_eq!(result["step_id"], 4);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_per_call_content_type_override_reaches_wire() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("PATCH", "/portals/P-01")
            .match_header("content-type", "application/merge-patch+json")
            .match_body(Matcher::Json(json!({"status": "maintenance"})))
            .with_status(200)
            .with_body(r#"{"portal_id": "P-01", "status": "maintenance"}"#)
            .create_async()
            .await;

        let client = create_client(&server);
        let body = json!({"status": "maintenance"});
        let overrides = [(
            "Content-Type".to_string(),
            "application/merge-patch+json".to_string(),
        )];
        let result: Value = client
            .request_with_headers(Method::PATCH, "/portals/P-01", Some(&body), &overrides)
            .await
            .unwrap();

        assert_eq!(result["status"], "maintenance");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_header_override_is_replayed_after_refresh() {
        // The refresh call itself carries no override; the replay repeats
        // the original headers unchanged.
        setup_logger();
        let mut server = Server::new_async().await;

        let first = server
            .mock("GET", "/historic")
            .match_header("x-request-source", "dashboard")
            .match_header("cookie", Matcher::Missing)
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let refresh = server
            .mock("POST", "/auth/refresh")
            .match_header("x-request-source", Matcher::Missing)
            .with_status(200)
            .with_header("set-cookie", "accessToken=renewed; Path=/")
            .with_body("{}")
            .create_async()
            .await;

        let replay = server
            .mock("GET", "/historic")
            .match_header("x-request-source", "dashboard")
            .match_header("cookie", "accessToken=renewed")
            .with_status(200)
            .with_body(r#"[{"reference": "REF-1"}]"#)
            .create_async()
            .await;

        let client = create_client(&server);
        let overrides = [("x-request-source".to_string(), "dashboard".to_string())];
        let result: Value = client
            .request_with_headers::<(), Value>(Method::GET, "/historic", None, &overrides)
            .await
            .unwrap();

        assert_eq!(result[0]["reference"], "REF-1");
        first.assert_async().await;
        refresh.assert_async().await;
        replay.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_success_body_deserializes_to_unit() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("DELETE", "/steps/4")
            .with_status(204)
            .create_async()
            .await;

        let client = create_client(&server);
        let result: Result<(), ApiError> =
            client.request::<(), ()>(Method::DELETE, "/steps/4", None).await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_a_json_error() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/historic")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = create_client(&server);
        let result = client
            .request::<(), Value>(Method::GET, "/historic", None)
            .await;

        assert!(matches!(result.unwrap_err(), ApiError::Json(_)));
        mock.assert_async().await;
    }
}
