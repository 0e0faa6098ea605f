//! Session helper backed by local storage.

use std::sync::Arc;

use entities::{CurrentUser, UserType};
use local_storage::{known_keys, LocalStorage};

use crate::{Navigator, SessionError, SessionResult, LOGIN_PATH};

/// Returns the route a user should land on.
///
/// No user goes to the login page; a signed-in user goes to the dashboard
/// of their role with their id as the `id` query parameter.
pub fn dashboard_route(user: Option<&CurrentUser>) -> String {
    match user {
        None => LOGIN_PATH.to_string(),
        Some(user) => format!(
            "{}?id={}",
            user.user_type.dashboard_path(),
            urlencoding::encode(&user.user_id)
        ),
    }
}

/// Reads and writes the signed-in identity.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn LocalStorage>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session over the given storage.
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    fn non_empty(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.storage.get(key)?.filter(|value| !value.is_empty()))
    }

    /// True if both the user id and the user type are set and non-empty.
    pub fn is_authenticated(&self) -> SessionResult<bool> {
        Ok(self.non_empty(known_keys::USER_ID)?.is_some()
            && self.non_empty(known_keys::USER_TYPE)?.is_some())
    }

    /// Returns the signed-in user.
    ///
    /// An unknown role string yields `None`.
    pub fn current_user(&self) -> SessionResult<Option<CurrentUser>> {
        let (Some(user_id), Some(user_type)) = (
            self.non_empty(known_keys::USER_ID)?,
            self.non_empty(known_keys::USER_TYPE)?,
        ) else {
            return Ok(None);
        };

        match UserType::parse(&user_type) {
            Some(user_type) => Ok(Some(CurrentUser::new(user_id, user_type))),
            None => {
                tracing::warn!(%user_type, "Ignoring session with unknown user type");
                Ok(None)
            }
        }
    }

    /// Stores the identity chosen on the login screen.
    pub fn login(&self, user: &CurrentUser) -> SessionResult<()> {
        if user.user_id.is_empty() {
            return Err(SessionError::EmptyUserId);
        }
        self.storage.set(known_keys::USER_ID, &user.user_id)?;
        self.storage
            .set(known_keys::USER_TYPE, user.user_type.as_str())?;
        tracing::info!(user_id = %user.user_id, user_type = %user.user_type, "Signed in");
        Ok(())
    }

    /// Clears the identity.
    pub fn logout(&self) -> SessionResult<()> {
        self.storage.remove(known_keys::USER_ID)?;
        self.storage.remove(known_keys::USER_TYPE)?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Sends the navigator to the login page or to the user's dashboard.
    ///
    /// Returns the route it navigated to.
    pub fn redirect_to_dashboard(
        &self,
        navigator: &mut dyn Navigator,
    ) -> SessionResult<String> {
        let user = self.current_user()?;
        let route = dashboard_route(user.as_ref());
        navigator.push(&route);
        Ok(route)
    }

    /// Starts every browsing session signed out.
    ///
    /// `session_storage` is the per-session scratch storage. On the first
    /// load (no visit marker there) the identity is cleared and the marker
    /// set. Returns true if the identity was cleared.
    pub fn clear_on_initial_load(
        &self,
        session_storage: &dyn LocalStorage,
    ) -> SessionResult<bool> {
        if session_storage.exists(known_keys::HAS_VISITED)? {
            return Ok(false);
        }
        self.logout()?;
        session_storage.set(known_keys::HAS_VISITED, "true")?;
        Ok(true)
    }
}
