//! `SessionRegistry` - one bootstrapped [`Session`] per API key.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::instrument;
use url::Url;

use super::Session;
use crate::endpoints::{API_KEY_ENV, BASE_URL};
use crate::error::{Error, Result};
use crate::transport::{HttpTransport, Transport};

/// Cache cell for one key. Its lock is held across bootstrap, so a
/// half-built session is never visible. `None` means "not bootstrapped";
/// a slot stays in the map after a failed bootstrap.
type Slot = Mutex<Option<Arc<Session>>>;

/// Process-scoped cache of sessions keyed by API key.
///
/// Entries are created on first use and never evicted.
#[allow(clippy::module_name_repetitions)]
pub struct SessionRegistry {
    /// Transport handed to every session.
    transport: Arc<dyn Transport>,
    /// Service root.
    base_url: Url,
    /// Environment variable consulted when no key is given.
    credential_var: String,
    /// Per-key slots. The map lock is never held while waiting on a slot.
    slots: Mutex<HashMap<String, Arc<Slot>>>,
    /// Number of filled slots.
    bootstrapped: AtomicUsize,
}

impl fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("base_url", &self.base_url.as_str())
            .field("credential_var", &self.credential_var)
            .field("sessions", &self.len())
            .finish_non_exhaustive()
    }
}

/// Builder for `SessionRegistry`.
#[derive(Default)]
#[allow(clippy::module_name_repetitions)]
pub struct SessionRegistryBuilder {
    transport: Option<Arc<dyn Transport>>,
    base_url: Option<Url>,
    credential_var: Option<String>,
}

impl fmt::Debug for SessionRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRegistryBuilder")
            .field("base_url", &self.base_url)
            .field("credential_var", &self.credential_var)
            .finish_non_exhaustive()
    }
}

impl SessionRegistryBuilder {
    /// Sets the transport (default: [`HttpTransport`] with default settings).
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Overrides the service root (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the credential environment variable (default: `TMDB_API_KEY`).
    #[must_use]
    pub fn credential_var(mut self, name: impl Into<String>) -> Self {
        self.credential_var = Some(name.into());
        self
    }

    /// Builds the registry.
    ///
    /// # Errors
    ///
    /// - The base URL cannot carry path segments.
    /// - The default HTTP transport fails to build.
    pub fn build(self) -> Result<SessionRegistry> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(BASE_URL)?,
        };
        if base_url.cannot_be_a_base() {
            return Err(Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::builder().build()?),
        };

        Ok(SessionRegistry {
            transport,
            base_url,
            credential_var: self
                .credential_var
                .unwrap_or_else(|| String::from(API_KEY_ENV)),
            slots: Mutex::new(HashMap::new()),
            bootstrapped: AtomicUsize::new(0),
        })
    }
}

impl SessionRegistry {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> SessionRegistryBuilder {
        SessionRegistryBuilder::default()
    }

    /// Creates a registry over `transport` with default settings.
    ///
    /// # Errors
    ///
    /// Fails only if the default base URL does not parse.
    pub fn new(transport: Arc<dyn Transport>) -> Result<Self> {
        Self::builder().transport(transport).build()
    }

    /// Returns the session for `key`, bootstrapping it on first use.
    ///
    /// An empty `key` is read from the credential environment variable.
    /// Concurrent first calls for one key bootstrap once; the others wait
    /// and receive the same session. A failed bootstrap caches nothing.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingCredential`] if no key is given or found.
    /// - [`Error::BootstrapFailure`] if fetching or parsing the configuration fails.
    #[instrument(skip_all)]
    pub fn instance(&self, key: &str) -> Result<Arc<Session>> {
        let key = self.resolve_key(key)?;

        let slot = Arc::clone(lock(&self.slots).entry(key.clone()).or_default());
        // Map lock released; only this key's slot is held from here on.
        let mut cached = lock(&slot);
        if let Some(session) = cached.as_ref() {
            return Ok(Arc::clone(session));
        }

        tracing::debug!("bootstrapping TMDB session");
        match Session::bootstrap(key, self.base_url.clone(), Arc::clone(&self.transport)) {
            Ok(session) => {
                let session = Arc::new(session);
                *cached = Some(Arc::clone(&session));
                self.bootstrapped.fetch_add(1, Ordering::Release);
                Ok(session)
            }
            Err(err) => {
                tracing::warn!(error = %err, "TMDB session bootstrap failed");
                Err(Error::BootstrapFailure(Box::new(err)))
            }
        }
    }

    /// Number of bootstrapped sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bootstrapped.load(Ordering::Acquire)
    }

    /// Returns `true` if no session has been bootstrapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves an empty key from the environment.
    fn resolve_key(&self, key: &str) -> Result<String> {
        if !key.is_empty() {
            return Ok(String::from(key));
        }
        std::env::var(&self.credential_var)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::MissingCredential(self.credential_var.clone()))
    }
}

/// Locks `mutex`, recovering the data if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
