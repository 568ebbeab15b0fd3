//! Router status source using the web management interface.
//!
//! Logs in through the router's login form, then reads the xDSL
//! statistics page and returns the text of its status element.
//!
//! ## Example
//!
//! ```rust,no_run
//! use router_check::{RouterSource, StatusSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = RouterSource::builder()
//!         .host("192.168.1.1")
//!         .credentials("admin", "1234")
//!         .build()?;
//!
//!     let text = source.fetch().await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use tracing::{debug, info, warn};

use super::html::{self, FormMethod, LoginForm};
use super::StatusSource;
use crate::config::RouterSettings;
use crate::FetchError;

/// Status source that scrapes the router's statistics page.
#[derive(Debug, Clone)]
pub struct RouterSource {
    client: Client,
    base: Url,
    username: String,
    password: String,
    login_path: String,
    status_path: String,
    login_form_id: String,
    username_field: String,
    password_field: String,
    status_element_id: String,
    description: String,
}

impl RouterSource {
    /// Create a new builder for configuring the source.
    pub fn builder() -> RouterSourceBuilder {
        RouterSourceBuilder::default()
    }

    /// Build a source from loaded settings.
    pub fn from_settings(settings: &RouterSettings) -> Result<Self, FetchError> {
        Self::builder()
            .host(&settings.host)
            .credentials(&settings.username, &settings.password)
            .login_path(&settings.login_path)
            .status_path(&settings.status_path)
            .login_form_id(&settings.login_form_id)
            .fields(&settings.username_field, &settings.password_field)
            .status_element_id(&settings.status_element_id)
            .timeout(settings.timeout)
            .build()
    }

    /// URL of the login page.
    pub fn login_url(&self) -> Result<Url, FetchError> {
        join(&self.base, &self.login_path)
    }

    /// URL of the xDSL statistics page.
    pub fn status_url(&self) -> Result<Url, FetchError> {
        join(&self.base, &self.status_path)
    }

    /// Submit the login form. The session cookie stays in the client.
    async fn login(&self) -> Result<(), FetchError> {
        let login_url = self.login_url()?;
        debug!(url = %login_url, "Opening login page");
        let page = read_page(self.client.get(login_url.clone()).send().await?).await?;

        let mut form = LoginForm::find(&page, &self.login_form_id)
            .ok_or_else(|| FetchError::LoginFormNotFound(self.login_form_id.clone()))?;
        form.set(&self.username_field, &self.username);
        form.set(&self.password_field, &self.password);

        let action = match &form.action {
            Some(action) => join(&login_url, action)?,
            None => login_url,
        };
        debug!(url = %action, method = ?form.method, fields = form.fields.len(), "Submitting login form");

        let request = match form.method {
            FormMethod::Post => self.client.post(action).form(&form.fields),
            FormMethod::Get => self.client.get(action).query(&form.fields),
        };
        let reply = read_page(request.send().await?).await?;

        // The password label is only rendered when the login was rejected.
        if let Some(message) = html::auth_error(&reply, &self.password_field) {
            warn!(user = %self.username, "Router rejected credentials");
            return Err(FetchError::AuthenticationFailed(message));
        }

        Ok(())
    }
}

#[async_trait]
impl StatusSource for RouterSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        info!(router = %self.base, "Logging in");
        self.login().await?;

        let status_url = self.status_url()?;
        info!(url = %status_url, "Fetching xDSL statistics");
        let page = read_page(self.client.get(status_url).send().await?).await?;

        html::element_text(&page, &self.status_element_id)
            .ok_or_else(|| FetchError::StatusElementNotFound(self.status_element_id.clone()))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for RouterSource.
#[derive(Debug, Default)]
pub struct RouterSourceBuilder {
    host: Option<String>,
    username: Option<String>,
    password: Option<String>,
    login_path: Option<String>,
    status_path: Option<String>,
    login_form_id: Option<String>,
    username_field: Option<String>,
    password_field: Option<String>,
    status_element_id: Option<String>,
    timeout: Option<Duration>,
}

impl RouterSourceBuilder {
    /// Set the router address (e.g., "192.168.1.1" or "http://router.lan").
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the username and password for the login form.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the login page path (default: "/login/login.html").
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Set the statistics page path.
    pub fn status_path(mut self, path: impl Into<String>) -> Self {
        self.status_path = Some(path.into());
        self
    }

    /// Set the id of the login form (default: "login").
    pub fn login_form_id(mut self, id: impl Into<String>) -> Self {
        self.login_form_id = Some(id.into());
        self
    }

    /// Set the names of the username and password inputs.
    pub fn fields(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username_field = Some(username.into());
        self.password_field = Some(password.into());
        self
    }

    /// Set the id of the element holding the status text.
    pub fn status_element_id(mut self, id: impl Into<String>) -> Self {
        self.status_element_id = Some(id.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the source.
    pub fn build(self) -> Result<RouterSource, FetchError> {
        let defaults = RouterSettings::default();
        let timeout = self.timeout.unwrap_or(defaults.timeout);

        // The router sits on the local network, never behind a proxy
        let client = Client::builder()
            .cookie_store(true)
            .no_proxy()
            .timeout(timeout)
            .build()?;

        let host = self.host.unwrap_or(defaults.host);
        let base = base_url(&host)?;
        let description = format!("router: {}", base);

        Ok(RouterSource {
            client,
            base,
            username: self.username.unwrap_or(defaults.username),
            password: self.password.unwrap_or(defaults.password),
            login_path: self.login_path.unwrap_or(defaults.login_path),
            status_path: self.status_path.unwrap_or(defaults.status_path),
            login_form_id: self.login_form_id.unwrap_or(defaults.login_form_id),
            username_field: self.username_field.unwrap_or(defaults.username_field),
            password_field: self.password_field.unwrap_or(defaults.password_field),
            status_element_id: self.status_element_id.unwrap_or(defaults.status_element_id),
            description,
        })
    }
}

/// Turn a bare host into an `http://` base URL.
fn base_url(host: &str) -> Result<Url, FetchError> {
    let with_scheme = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    };
    Url::parse(&with_scheme).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", host, e)))
}

fn join(base: &Url, path: &str) -> Result<Url, FetchError> {
    base.join(path)
        .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", path, e)))
}

/// Check the status and read the body.
async fn read_page(response: Response) -> Result<String, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http(format!(
            "{} returned status {}",
            response.url(),
            status
        )));
    }
    Ok(response.text().await?)
}
