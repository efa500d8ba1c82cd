//! Hook for the one navigation side effect the client can trigger.
//!
//! When a 401 is followed by a failed refresh the session is gone for good
//! and the embedding application should send the user back to the login
//! route. In a browser shell that means navigating to
//! [`crate::constants::LOGIN_ROUTE`]; headless callers usually keep the
//! default no-op. The trait is object-safe on purpose so the client can hold
//! it as `Arc<dyn LoginRedirect>` without propagating a generic parameter.

/// Invoked exactly once per failed refresh chain, before the error reaches
/// the caller.
///
/// A browser shell implements it by navigating to the login route:
///
/// ```
/// use mes_rfid_client::constants::LOGIN_ROUTE;
/// use mes_rfid_client::transport::redirect::LoginRedirect;
///
/// struct BrowserRedirect;
///
/// impl LoginRedirect for BrowserRedirect {
///     fn redirect_to_login(&self) {
///         // A real shell hands this to the host's navigation API.
///         println!("navigating to {LOGIN_ROUTE}");
///     }
/// }
/// ```
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self);
}

/// Default hook: does nothing. The rejection returned by the client is
/// enough for non-interactive callers.
#[derive(Debug, Default)]
pub struct NoopRedirect;

impl LoginRedirect for NoopRedirect {
    fn redirect_to_login(&self) {}
}
