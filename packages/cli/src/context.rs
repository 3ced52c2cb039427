//! Settings and session shared by every command.

use std::path::{Path, PathBuf};

use dialoguer::theme::Theme;
use emergency_alert_cli_utils::MultiProgress;
use emergency_alert_client::{ApiClient, ApiConfig, DEFAULT_API_BASE_URL};
use emergency_alert_display::Tone;
use emergency_alert_session::{
    Access, AccessPolicy, AppConfig, JsonFileStore, RolePolicy, Route, Session, SessionError,
    ThemeMode, guard,
};
use thiserror::Error;

/// Command-level failures not covered by a library error.
#[derive(Debug, Error)]
pub enum CliError {
    /// An admin command was run without an admin session.
    #[error("{route} requires an admin session; run `emergency_alert login --role admin` first")]
    AdminRequired { route: Route },

    /// An evidence file could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadEvidence {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Everything a command needs, resolved once at startup.
pub struct Context {
    pub config: AppConfig,
    pub store: JsonFileStore,
    pub theme: ThemeMode,
    pub multi: MultiProgress,
    policy: Box<dyn AccessPolicy>,
}

impl Context {
    /// Loads config, applies command-line overrides, and opens the session
    /// store.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file or session file is unreadable.
    pub fn load(
        config_path: Option<&Path>,
        api_base_url: Option<String>,
        session_file: Option<PathBuf>,
        multi: MultiProgress,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = AppConfig::load(config_path)?;
        if api_base_url.is_some() {
            config.api_base_url = api_base_url;
        }
        if let Some(path) = session_file {
            config.session_file = path;
        }

        let store = JsonFileStore::open(&config.session_file)?;
        let theme = config.effective_theme(&store);
        log::debug!(
            "Using backend {} and session {}",
            config.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL),
            config.session_file.display()
        );

        Ok(Self {
            config,
            store,
            theme,
            multi,
            policy: Box::new(RolePolicy),
        })
    }

    /// The session currently stored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownRole`] for a corrupted role.
    pub fn session(&self) -> Result<Session, SessionError> {
        Session::load(&self.store)
    }

    /// The stored session for commands anyone may run. A corrupted role
    /// is treated as no session at all.
    pub fn public_session(&self) -> Session {
        self.session().unwrap_or_else(|e| {
            log::warn!("Ignoring stored session: {e}");
            Session::default()
        })
    }

    /// A backend client that sends no credentials.
    #[must_use]
    pub fn anonymous_client(&self) -> ApiClient {
        self.client(&Session::default())
    }

    /// A backend client authenticated with `session`'s token, if any.
    #[must_use]
    pub fn client(&self, session: &Session) -> ApiClient {
        let base_url = self
            .config
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL);
        ApiClient::new(ApiConfig::new(base_url).with_bearer_token(session.token.clone()))
    }

    /// Loads the session and checks it may open `route`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::AdminRequired`] when the policy redirects.
    pub fn require(&self, route: Route) -> Result<Session, Box<dyn std::error::Error>> {
        let session = self.session()?;
        match guard(self.policy.as_ref(), &session, route) {
            Access::Granted => Ok(session),
            Access::Redirect(_) => Err(CliError::AdminRequired { route }.into()),
        }
    }

    pub fn prompt_theme(&self) -> Box<dyn Theme> {
        emergency_alert_cli_utils::prompt_theme(self.theme)
    }

    /// A colored table cell `width` columns wide.
    pub fn badge(&self, text: &str, width: usize, tone: Tone) -> String {
        emergency_alert_cli_utils::badge(text, width, tone, self.theme)
    }
}

#[cfg(test)]
mod tests {
    use emergency_alert_session::{AUTH_TOKEN_KEY, SessionStore, USER_ROLE_KEY};

    use super::*;

    fn context_with_session(name: &str, entries: &[(&str, &str)]) -> (Context, PathBuf) {
        let path = std::env::temp_dir().join(format!(
            "emergency_alert_cli_{}_{name}.json",
            std::process::id()
        ));
        let mut store = JsonFileStore::open(&path).unwrap();
        for (key, value) in entries {
            store.set(key, value).unwrap();
        }

        let ctx = Context::load(
            None,
            Some("http://localhost:9".to_string()),
            Some(path.clone()),
            MultiProgress::new(),
        )
        .unwrap();
        (ctx, path)
    }

    #[test]
    fn corrupted_role_does_not_block_public_commands() {
        let (ctx, path) = context_with_session("corrupted_role", &[(USER_ROLE_KEY, "superuser")]);

        assert!(matches!(ctx.session(), Err(SessionError::UnknownRole(_))));
        assert_eq!(ctx.public_session(), Session::default());
        assert_eq!(ctx.anonymous_client().config().bearer_token, None);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn corrupted_role_still_blocks_admin_pages() {
        let (ctx, path) = context_with_session(
            "corrupted_admin",
            &[(AUTH_TOKEN_KEY, "admin-token"), (USER_ROLE_KEY, "superuser")],
        );

        assert!(ctx.require(Route::AdminDashboard).is_err());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn admin_session_opens_admin_pages() {
        let (ctx, path) = context_with_session(
            "admin",
            &[(AUTH_TOKEN_KEY, "admin-token"), (USER_ROLE_KEY, "admin")],
        );

        let session = ctx.require(Route::AdminUsers).unwrap();
        assert!(session.is_admin());
        assert_eq!(ctx.public_session(), session);
        assert_eq!(ctx.anonymous_client().config().bearer_token, None);
        assert_eq!(
            ctx.client(&session).config().bearer_token.as_deref(),
            Some("admin-token")
        );

        std::fs::remove_file(&path).unwrap();
    }
}
