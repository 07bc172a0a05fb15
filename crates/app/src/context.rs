//! Application context: the single owner of session and navigation state.

use anyhow::Context as _;

use hrms_auth::{JsonFileStorage, SessionError, SessionState, SessionStorage, SessionStore};
use hrms_client::{ApiClient, AttendanceService};
use hrms_models::User;
use hrms_router::routes::{HOME, LOGIN};
use hrms_router::{Navigation, NavigationError, Navigator, RouteDescriptor, RouteTable};

use crate::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Owns configuration, the session store and the navigator.
///
/// Consumers borrow the session from here instead of reaching for a global;
/// every state transition goes through `&mut self`.
#[derive(Debug)]
pub struct AppContext<S> {
    config: AppConfig,
    session: SessionStore<S>,
    navigator: Navigator,
}

impl AppContext<JsonFileStorage> {
    /// Open the session file named by the config and rehydrate from it.
    pub fn bootstrap(config: AppConfig) -> anyhow::Result<Self> {
        let storage = JsonFileStorage::open_or_reset(&config.session_path).with_context(|| {
            format!("failed to open session file {}", config.session_path.display())
        })?;
        Ok(Self::new(config, storage))
    }
}

impl<S: SessionStorage> AppContext<S> {
    pub fn new(config: AppConfig, storage: S) -> Self {
        let navigator = Navigator::new(RouteTable::hrms(), config.app_name.clone());
        Self {
            session: SessionStore::rehydrate(storage),
            navigator,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        self.session.state()
    }

    pub fn session_store(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn title(&self) -> &str {
        self.navigator.title()
    }

    pub fn current_route(&self) -> Option<&RouteDescriptor> {
        self.navigator.current()
    }

    pub fn navigate(&mut self, location: &str) -> Result<Navigation, NavigationError> {
        self.navigator.push_path(location, self.session.state())
    }

    pub fn navigate_to(&mut self, name: &str) -> Result<Navigation, NavigationError> {
        self.navigator.push_name(name, self.session.state())
    }

    /// Send the user to their landing page: home when signed in, else login.
    pub fn check_auth(&mut self) -> Result<Navigation, NavigationError> {
        let landing = if self.session.state().is_authenticated() {
            HOME
        } else {
            LOGIN
        };
        self.navigate_to(landing)
    }

    /// Sign in and land on the home page.
    pub fn login(
        &mut self,
        user: User,
        token: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Navigation, AppError> {
        let user_id = user.id;
        self.session.login(user, token, message)?;
        tracing::info!(%user_id, "signed in");
        Ok(self.navigate_to(HOME)?)
    }

    /// Sign out and land on the login page. The session is cleared even if
    /// the storage write fails; that failure is still reported.
    pub fn logout(&mut self) -> Result<Navigation, AppError> {
        let persisted = self.session.logout();
        let navigation = self.navigate_to(LOGIN)?;
        if let Err(err) = &persisted {
            tracing::warn!(error = %err, "signed out, but the session file was not updated");
        } else {
            tracing::info!("signed out");
        }
        persisted?;
        Ok(navigation)
    }

    /// Welcome message from the last login, returned once.
    pub fn take_message(&mut self) -> Option<String> {
        self.session.take_message()
    }

    /// API client authenticated as the current session.
    pub fn api_client(&self) -> ApiClient {
        ApiClient::for_session(self.config.api_url.clone(), self.session.state())
    }

    pub fn attendance(&self) -> AttendanceService {
        AttendanceService::new(self.api_client())
    }
}
