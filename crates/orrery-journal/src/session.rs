//! Guest / signed-in identity and the login flow.
//!
//! The current identity lives in a [`watch`] channel so journal queries
//! running on other tasks can read it without locking. Sign-in runs as a
//! spawned task whose result is applied by [`Session::pump`] on the render
//! loop, like every other asynchronous result in the viewer.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::AuthError;
use crate::model::{Identity, UserId};
use crate::panel::LoginPanel;

/// Resolves who is currently using the viewer.
pub trait SessionGate {
    fn current_identity(&self) -> impl Future<Output = Identity> + Send;
}

/// Verifies credentials against the identity provider.
pub trait Authenticator {
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<UserId, AuthError>> + Send;
}

/// Observable identity backed by a [`watch`] channel. Starts as
/// [`Identity::Guest`] so picks made before the login choice never see
/// owned entries.
pub struct IdentityWatch {
    tx: watch::Sender<Identity>,
    rx: watch::Receiver<Identity>,
}

impl Default for IdentityWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityWatch {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(Identity::Guest);
        Self { tx, rx }
    }

    /// Set the identity, notifying all subscribers.
    pub fn set(&self, identity: Identity) {
        let _ = self.tx.send(identity);
    }

    pub fn subscribe(&self) -> watch::Receiver<Identity> {
        self.rx.clone()
    }

    pub fn current(&self) -> Identity {
        self.rx.borrow().clone()
    }
}

impl SessionGate for IdentityWatch {
    async fn current_identity(&self) -> Identity {
        self.current()
    }
}

struct SignInResult {
    attempt: u64,
    result: Result<UserId, AuthError>,
}

/// The login flow: shows the login panel once, then switches identity on
/// "continue as guest", sign-in, or sign-out.
pub struct Session<A> {
    identity: Arc<IdentityWatch>,
    authenticator: Arc<A>,
    attempt: u64,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<SignInResult>,
    rx: mpsc::UnboundedReceiver<SignInResult>,
}

impl<A> Session<A>
where
    A: Authenticator + Send + Sync + 'static,
{
    pub fn new(authenticator: Arc<A>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            identity: Arc::new(IdentityWatch::new()),
            authenticator,
            attempt: 0,
            pending: None,
            tx,
            rx,
        }
    }

    /// Shared read-only view of the identity, for the selection coordinator.
    pub fn gate(&self) -> Arc<IdentityWatch> {
        Arc::clone(&self.identity)
    }

    pub fn identity(&self) -> Identity {
        self.identity.current()
    }

    /// True while a sign-in attempt is in flight.
    pub fn signing_in(&self) -> bool {
        self.pending.is_some()
    }

    /// Show the login prompt at session start.
    pub fn start(&self, panel: &mut impl LoginPanel) {
        panel.show();
    }

    pub fn continue_as_guest(&mut self, panel: &mut impl LoginPanel) {
        self.cancel_sign_in();
        self.identity.set(Identity::Guest);
        panel.hide();
        info!("Continuing as guest");
    }

    /// Start a sign-in attempt. Must be called inside a tokio runtime.
    /// A newer attempt supersedes an older one still in flight.
    pub fn sign_in(&mut self, email: String, password: String) {
        self.cancel_sign_in();
        self.attempt += 1;
        let attempt = self.attempt;
        let authenticator = Arc::clone(&self.authenticator);
        let tx = self.tx.clone();
        info!(%email, "Signing in");
        self.pending = Some(tokio::spawn(async move {
            let result = authenticator.sign_in(&email, &password).await;
            let _ = tx.send(SignInResult { attempt, result });
        }));
    }

    pub fn sign_out(&mut self, panel: &mut impl LoginPanel) {
        self.cancel_sign_in();
        self.identity.set(Identity::Guest);
        panel.show();
        info!("Signed out");
    }

    /// Apply a finished sign-in, if any. On success the identity switches
    /// and the panel hides; on failure the panel stays up with the error.
    pub fn pump(&mut self, panel: &mut impl LoginPanel) -> Option<Result<UserId, AuthError>> {
        let mut applied = None;
        while let Ok(SignInResult { attempt, result }) = self.rx.try_recv() {
            if attempt != self.attempt || self.pending.is_none() {
                continue;
            }
            self.pending = None;
            match &result {
                Ok(id) => {
                    self.identity.set(Identity::AuthenticatedUser { id: id.clone() });
                    panel.hide();
                    info!(user = %id, "Signed in");
                }
                Err(err) => {
                    warn!(%err, "Sign-in failed");
                    panel.show_error(&err.to_string());
                }
            }
            applied = Some(result);
        }
        applied
    }

    fn cancel_sign_in(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingLogin {
        visible: bool,
        errors: Vec<String>,
    }

    impl LoginPanel for RecordingLogin {
        fn show(&mut self) {
            self.visible = true;
        }
        fn hide(&mut self) {
            self.visible = false;
        }
        fn show_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    struct FixedAuth {
        delay: Duration,
    }

    impl Authenticator for FixedAuth {
        async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
            tokio::time::sleep(self.delay).await;
            if email == "ada@example.com" && password == "orbit" {
                Ok(UserId("user-ada".into()))
            } else {
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    fn session(delay_ms: u64) -> Session<FixedAuth> {
        Session::new(Arc::new(FixedAuth {
            delay: Duration::from_millis(delay_ms),
        }))
    }

    #[tokio::test]
    async fn test_identity_starts_as_guest() {
        let watch = IdentityWatch::new();
        assert_eq!(watch.current_identity().await, Identity::Guest);
    }

    #[tokio::test]
    async fn test_guest_choice_hides_panel() {
        let mut session = session(0);
        let mut panel = RecordingLogin::default();
        session.start(&mut panel);
        assert!(panel.visible);
        session.continue_as_guest(&mut panel);
        assert!(!panel.visible);
        assert_eq!(session.identity(), Identity::Guest);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_sign_in_switches_identity() {
        let mut session = session(50);
        let mut panel = RecordingLogin::default();
        session.start(&mut panel);
        session.sign_in("ada@example.com".into(), "orbit".into());
        assert!(session.signing_in());
        assert!(session.pump(&mut panel).is_none());

        tokio::time::sleep(Duration::from_millis(100)).await;
        let result = session.pump(&mut panel).unwrap();
        assert_eq!(result, Ok(UserId("user-ada".into())));
        assert!(!panel.visible);
        assert!(!session.signing_in());
        assert_eq!(
            session.gate().current_identity().await,
            Identity::AuthenticatedUser {
                id: UserId("user-ada".into())
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_sign_in_keeps_panel_visible() {
        let mut session = session(10);
        let mut panel = RecordingLogin::default();
        session.start(&mut panel);
        session.sign_in("ada@example.com".into(), "wrong".into());
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(session.pump(&mut panel), Some(Err(AuthError::InvalidCredentials)));
        assert!(panel.visible);
        assert_eq!(panel.errors.len(), 1);
        assert_eq!(session.identity(), Identity::Guest);
    }

    #[tokio::test(start_paused = true)]
    async fn test_guest_choice_cancels_pending_sign_in() {
        let mut session = session(50);
        let mut panel = RecordingLogin::default();
        session.sign_in("ada@example.com".into(), "orbit".into());
        session.continue_as_guest(&mut panel);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(session.pump(&mut panel).is_none());
        assert_eq!(session.identity(), Identity::Guest);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sign_out_returns_to_guest_and_prompts() {
        let mut session = session(0);
        let mut panel = RecordingLogin::default();
        session.sign_in("ada@example.com".into(), "orbit".into());
        tokio::time::sleep(Duration::from_millis(1)).await;
        session.pump(&mut panel);
        assert!(!session.identity().is_guest());

        session.sign_out(&mut panel);
        assert!(session.identity().is_guest());
        assert!(panel.visible);
    }

    #[tokio::test]
    async fn test_watch_subscriber_sees_changes() {
        let watch = IdentityWatch::new();
        let mut rx = watch.subscribe();
        watch.set(Identity::AuthenticatedUser {
            id: UserId("u1".into()),
        });
        rx.changed().await.unwrap();
        assert!(!rx.borrow().is_guest());
    }
}
