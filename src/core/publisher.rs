//! Credential-gated publish pipeline
//!
//! `GistPublisher` turns documents into a gist: it validates the input,
//! builds the file map, looks up credentials and talks to the remote API.
//! When credentials are missing the publish is not lost - it comes back as
//! a `PendingPublish` value the caller can resume once the login dialog
//! has stored a credential pair. Only one publish can wait on a login at a
//! time; resuming or abandoning the pending value frees the slot.

use std::collections::BTreeMap;

use crate::core::credentials::{CredentialStore, Credentials};
use crate::core::documents::{DocumentRef, Visibility};
use crate::core::notify::ResultNotifier;
use crate::error::{GistlyError, Result};
use crate::github::gist::{CreateGistParams, CreatedGist};

/// Remote API capable of creating gists
#[allow(async_fn_in_trait)]
pub trait GistRemote {
    /// Create a gist on behalf of the given credentials
    async fn create_gist(
        &self,
        credentials: &Credentials,
        params: &CreateGistParams,
    ) -> Result<CreatedGist>;
}

/// A publish captured while waiting for the login dialog
///
/// Carries the exact visibility/documents pair of the original request so
/// resuming publishes what was asked for, not a re-read of the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPublish {
    pub visibility: Visibility,
    pub documents: Vec<DocumentRef>,
}

/// What a publish attempt produced
#[derive(Debug)]
pub enum PublishOutcome {
    /// The gist was created
    Published(CreatedGist),
    /// No credentials are stored; log in, then resume with this value
    CredentialsRequired(PendingPublish),
}

/// Publishes documents as gists, prompting for credentials when needed
pub struct GistPublisher<R, N> {
    credentials: CredentialStore,
    remote: R,
    notifier: N,
    description: String,
    login_pending: bool,
}

impl<R: GistRemote, N: ResultNotifier> GistPublisher<R, N> {
    /// Create a publisher over the given collaborators
    pub fn new(credentials: CredentialStore, remote: R, notifier: N) -> Self {
        Self {
            credentials,
            remote,
            notifier,
            description: String::new(),
            login_pending: false,
        }
    }

    /// Set the description for gists created by this publisher
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn credentials_mut(&mut self) -> &mut CredentialStore {
        &mut self.credentials
    }

    /// Publish the given documents as one gist
    ///
    /// Input problems (no documents, nothing but empty documents) fail
    /// before the credential store or the network is ever touched. Missing
    /// credentials are not an error here: the publish comes back as
    /// `CredentialsRequired` and can be resumed after a login.
    pub async fn publish(
        &mut self,
        visibility: Visibility,
        documents: Vec<DocumentRef>,
    ) -> Result<PublishOutcome> {
        if self.login_pending {
            return Err(GistlyError::PublishInProgress);
        }

        if documents.is_empty() {
            return Err(GistlyError::NoDocuments);
        }

        let files = build_files(&documents);
        if files.is_empty() {
            return Err(GistlyError::NoContent);
        }

        let Some(credentials) = self.credentials.lookup()? else {
            self.login_pending = true;
            return Ok(PublishOutcome::CredentialsRequired(PendingPublish {
                visibility,
                documents,
            }));
        };

        let gist = self.submit(&credentials, visibility, files).await?;
        Ok(PublishOutcome::Published(gist))
    }

    /// Resume a publish captured before the login dialog
    ///
    /// Retries the credential lookup exactly once: if credentials are still
    /// missing the publish fails instead of opening another dialog.
    pub async fn resume(&mut self, pending: PendingPublish) -> Result<CreatedGist> {
        self.login_pending = false;

        let files = build_files(&pending.documents);
        if files.is_empty() {
            return Err(GistlyError::NoContent);
        }

        let credentials = self
            .credentials
            .lookup()?
            .ok_or(GistlyError::NotAuthenticated)?;

        self.submit(&credentials, pending.visibility, files).await
    }

    /// Drop a captured publish without sending anything
    pub fn abandon(&mut self, _pending: PendingPublish) {
        self.login_pending = false;
    }

    async fn submit(
        &self,
        credentials: &Credentials,
        visibility: Visibility,
        files: BTreeMap<String, String>,
    ) -> Result<CreatedGist> {
        let params = CreateGistParams {
            visibility,
            description: self.description.clone(),
            files,
        };

        let gist = self.remote.create_gist(credentials, &params).await?;

        // Only a usable URL is worth announcing
        if let Some(url) = gist.html_url.as_deref().filter(|u| !u.is_empty()) {
            self.notifier.notify(url, visibility);
        }

        Ok(gist)
    }
}

/// Build the gist file map from documents
///
/// Unnamed documents fall back to "untitled", empty documents are dropped,
/// and when two documents share a name the later one wins.
pub fn build_files(documents: &[DocumentRef]) -> BTreeMap<String, String> {
    let mut files = BTreeMap::new();

    for doc in documents {
        if doc.content.is_empty() {
            continue;
        }
        files.insert(doc.resolved_name().to_string(), doc.content.clone());
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Settings;
    use crate::core::credentials::{MemoryKeychain, SecretStore};
    use mockall::mock;
    use mockall::predicate::*;
    use secrecy::SecretString;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    mock! {
        pub Notifier {}
        impl ResultNotifier for Notifier {
            fn notify(&self, url: &str, visibility: Visibility);
        }
    }

    /// Keychain that fails the test when anything touches it
    struct PanicKeychain;

    impl SecretStore for PanicKeychain {
        fn get_secret(&self, _account: &str) -> Result<Option<SecretString>> {
            panic!("the credential store must not be touched");
        }

        fn set_secret(&self, _account: &str, _secret: &str) -> Result<()> {
            panic!("the credential store must not be touched");
        }

        fn delete_secret(&self, _account: &str) -> Result<()> {
            panic!("the credential store must not be touched");
        }
    }

    /// Remote that records every request and replies from a script
    struct FakeRemote {
        log: Rc<RefCell<Vec<CreateGistParams>>>,
        response: FakeResponse,
    }

    enum FakeResponse {
        Created(CreatedGist),
        Fail(String),
    }

    impl FakeRemote {
        fn returning(log: Rc<RefCell<Vec<CreateGistParams>>>, gist: CreatedGist) -> Self {
            Self {
                log,
                response: FakeResponse::Created(gist),
            }
        }

        fn failing(log: Rc<RefCell<Vec<CreateGistParams>>>, message: &str) -> Self {
            Self {
                log,
                response: FakeResponse::Fail(message.to_string()),
            }
        }
    }

    impl GistRemote for FakeRemote {
        async fn create_gist(
            &self,
            _credentials: &Credentials,
            params: &CreateGistParams,
        ) -> Result<CreatedGist> {
            self.log.borrow_mut().push(params.clone());
            match &self.response {
                FakeResponse::Created(gist) => Ok(gist.clone()),
                FakeResponse::Fail(message) => Err(GistlyError::GitHubApi(message.clone())),
            }
        }
    }

    /// Remote that must never be reached
    struct UnreachableRemote;

    impl GistRemote for UnreachableRemote {
        async fn create_gist(
            &self,
            _credentials: &Credentials,
            _params: &CreateGistParams,
        ) -> Result<CreatedGist> {
            panic!("the remote API must not be called");
        }
    }

    fn settings(dir: &TempDir) -> Settings {
        Settings::load_from(dir.path().join("config.toml")).unwrap()
    }

    /// Store with a remembered username but a keychain that must stay idle
    fn untouchable_store(dir: &TempDir) -> CredentialStore {
        let mut settings = settings(dir);
        settings.github_username = Some("octocat".into());
        CredentialStore::new(settings, Box::new(PanicKeychain)).with_env_overrides(false)
    }

    fn empty_store(dir: &TempDir) -> CredentialStore {
        CredentialStore::new(settings(dir), Box::new(MemoryKeychain::new()))
            .with_env_overrides(false)
    }

    fn logged_in_store(dir: &TempDir) -> CredentialStore {
        let mut store = empty_store(dir);
        store.save("octocat", "hunter2").unwrap();
        store
    }

    fn request_log() -> Rc<RefCell<Vec<CreateGistParams>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn sample_gist() -> CreatedGist {
        CreatedGist {
            id: "abc123".into(),
            html_url: Some("https://gist.github.com/abc123".into()),
        }
    }

    fn notes_documents() -> Vec<DocumentRef> {
        vec![
            DocumentRef::named("notes.md", "hi"),
            DocumentRef::unnamed(""),
        ]
    }

    #[test]
    fn test_build_files_drops_empty_documents() {
        let files = build_files(&notes_documents());
        assert_eq!(files.len(), 1);
        assert_eq!(files.get("notes.md").map(String::as_str), Some("hi"));
    }

    #[test]
    fn test_build_files_untitled_fallback_and_collisions() {
        let docs = vec![
            DocumentRef::unnamed("first"),
            DocumentRef::named("", "second"),
        ];
        let files = build_files(&docs);
        assert_eq!(files.len(), 1);
        assert_eq!(files.get("untitled").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_build_files_last_write_wins_for_duplicate_names() {
        let docs = vec![
            DocumentRef::named("a.txt", "old"),
            DocumentRef::named("a.txt", "new"),
        ];
        let files = build_files(&docs);
        assert_eq!(files.get("a.txt").map(String::as_str), Some("new"));
    }

    #[tokio::test]
    async fn test_publish_nothing_fails_before_any_lookup() {
        let dir = TempDir::new().unwrap();
        let mut publisher = GistPublisher::new(
            untouchable_store(&dir),
            UnreachableRemote,
            MockNotifier::new(),
        );

        let result = publisher.publish(Visibility::Public, Vec::new()).await;
        assert!(matches!(result, Err(GistlyError::NoDocuments)));
    }

    #[tokio::test]
    async fn test_publish_only_empty_documents_fails_before_any_lookup() {
        let dir = TempDir::new().unwrap();
        let mut publisher = GistPublisher::new(
            untouchable_store(&dir),
            UnreachableRemote,
            MockNotifier::new(),
        );

        let docs = vec![DocumentRef::unnamed(""), DocumentRef::named("a.txt", "")];
        let result = publisher.publish(Visibility::Public, docs).await;
        assert!(matches!(result, Err(GistlyError::NoContent)));
    }

    #[tokio::test]
    async fn test_publish_succeeds_and_notifies() {
        let dir = TempDir::new().unwrap();
        let log = request_log();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .with(eq("https://gist.github.com/abc123"), eq(Visibility::Public))
            .times(1)
            .return_const(());

        let mut publisher = GistPublisher::new(
            logged_in_store(&dir),
            FakeRemote::returning(log.clone(), sample_gist()),
            notifier,
        );

        let outcome = publisher
            .publish(Visibility::Public, notes_documents())
            .await
            .unwrap();

        let gist = match outcome {
            PublishOutcome::Published(gist) => gist,
            other => panic!("expected a published gist, got {:?}", other),
        };
        assert_eq!(gist.id, "abc123");

        let requests = log.borrow();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].visibility.is_public());
        assert_eq!(requests[0].description, "");
        assert_eq!(requests[0].files.len(), 1);
        assert_eq!(
            requests[0].files.get("notes.md").map(String::as_str),
            Some("hi")
        );
    }

    #[tokio::test]
    async fn test_missing_credentials_capture_the_exact_publish() {
        let dir = TempDir::new().unwrap();
        let documents = notes_documents();
        let mut publisher =
            GistPublisher::new(empty_store(&dir), UnreachableRemote, MockNotifier::new());

        let outcome = publisher
            .publish(Visibility::Private, documents.clone())
            .await
            .unwrap();

        match outcome {
            PublishOutcome::CredentialsRequired(pending) => {
                assert_eq!(pending.visibility, Visibility::Private);
                assert_eq!(pending.documents, documents);
            }
            other => panic!("expected a captured publish, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_second_publish_while_login_pending_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut publisher =
            GistPublisher::new(empty_store(&dir), UnreachableRemote, MockNotifier::new());

        let outcome = publisher
            .publish(Visibility::Public, notes_documents())
            .await
            .unwrap();
        assert!(matches!(outcome, PublishOutcome::CredentialsRequired(_)));

        let second = publisher.publish(Visibility::Public, notes_documents()).await;
        assert!(matches!(second, Err(GistlyError::PublishInProgress)));
    }

    #[tokio::test]
    async fn test_resume_after_login_sends_the_captured_publish() {
        let dir = TempDir::new().unwrap();
        let log = request_log();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .with(eq("https://gist.github.com/abc123"), eq(Visibility::Public))
            .times(1)
            .return_const(());

        let mut publisher = GistPublisher::new(
            empty_store(&dir),
            FakeRemote::returning(log.clone(), sample_gist()),
            notifier,
        );

        let outcome = publisher
            .publish(Visibility::Public, notes_documents())
            .await
            .unwrap();
        let pending = match outcome {
            PublishOutcome::CredentialsRequired(pending) => pending,
            other => panic!("expected a captured publish, got {:?}", other),
        };
        assert!(log.borrow().is_empty());

        // The login dialog stored credentials in the meantime
        publisher.credentials_mut().save("octocat", "hunter2").unwrap();

        let gist = publisher.resume(pending).await.unwrap();
        assert_eq!(gist.html_url.as_deref(), Some("https://gist.github.com/abc123"));

        let requests = log.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].files.get("notes.md").map(String::as_str),
            Some("hi")
        );
    }

    #[tokio::test]
    async fn test_resume_without_credentials_fails_and_frees_the_slot() {
        let dir = TempDir::new().unwrap();
        let mut publisher =
            GistPublisher::new(empty_store(&dir), UnreachableRemote, MockNotifier::new());

        let outcome = publisher
            .publish(Visibility::Public, notes_documents())
            .await
            .unwrap();
        let pending = match outcome {
            PublishOutcome::CredentialsRequired(pending) => pending,
            other => panic!("expected a captured publish, got {:?}", other),
        };

        // Still no credentials: one retry, then a hard failure
        let result = publisher.resume(pending).await;
        assert!(matches!(result, Err(GistlyError::NotAuthenticated)));

        // The slot is free again
        let outcome = publisher
            .publish(Visibility::Public, notes_documents())
            .await
            .unwrap();
        assert!(matches!(outcome, PublishOutcome::CredentialsRequired(_)));
    }

    #[tokio::test]
    async fn test_abandon_frees_the_slot_without_network_traffic() {
        let dir = TempDir::new().unwrap();
        let mut publisher =
            GistPublisher::new(empty_store(&dir), UnreachableRemote, MockNotifier::new());

        let outcome = publisher
            .publish(Visibility::Public, notes_documents())
            .await
            .unwrap();
        let pending = match outcome {
            PublishOutcome::CredentialsRequired(pending) => pending,
            other => panic!("expected a captured publish, got {:?}", other),
        };

        publisher.abandon(pending);

        let outcome = publisher
            .publish(Visibility::Public, notes_documents())
            .await
            .unwrap();
        assert!(matches!(outcome, PublishOutcome::CredentialsRequired(_)));
    }

    #[tokio::test]
    async fn test_remote_failure_is_surfaced_and_not_notified() {
        let dir = TempDir::new().unwrap();
        let log = request_log();
        let mut publisher = GistPublisher::new(
            logged_in_store(&dir),
            FakeRemote::failing(log.clone(), "boom"),
            MockNotifier::new(),
        );

        let result = publisher.publish(Visibility::Public, notes_documents()).await;
        assert!(matches!(result, Err(GistlyError::GitHubApi(_))));
        assert_eq!(log.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_url_skips_the_notification() {
        let dir = TempDir::new().unwrap();
        let log = request_log();
        let gist = CreatedGist {
            id: "abc123".into(),
            html_url: None,
        };

        let mut publisher = GistPublisher::new(
            logged_in_store(&dir),
            FakeRemote::returning(log, gist),
            MockNotifier::new(),
        );

        let outcome = publisher
            .publish(Visibility::Public, notes_documents())
            .await
            .unwrap();
        assert!(matches!(outcome, PublishOutcome::Published(_)));
    }

    #[tokio::test]
    async fn test_empty_url_skips_the_notification() {
        let dir = TempDir::new().unwrap();
        let log = request_log();
        let gist = CreatedGist {
            id: "abc123".into(),
            html_url: Some(String::new()),
        };

        let mut publisher = GistPublisher::new(
            logged_in_store(&dir),
            FakeRemote::returning(log, gist),
            MockNotifier::new(),
        );

        let outcome = publisher
            .publish(Visibility::Public, notes_documents())
            .await
            .unwrap();
        assert!(matches!(outcome, PublishOutcome::Published(_)));
    }

    #[tokio::test]
    async fn test_description_travels_with_the_request() {
        let dir = TempDir::new().unwrap();
        let log = request_log();
        let gist = CreatedGist {
            id: "abc123".into(),
            html_url: None,
        };

        let mut publisher = GistPublisher::new(
            logged_in_store(&dir),
            FakeRemote::returning(log.clone(), gist),
            MockNotifier::new(),
        )
        .with_description("scratch notes");

        let result = publisher.publish(Visibility::Public, notes_documents()).await;
        assert!(result.is_ok());
        assert_eq!(log.borrow()[0].description, "scratch notes");
    }
}
