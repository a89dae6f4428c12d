//! Cookie-carrying HTTP session source.
//!
//! Posts the gradebook login form, keeps the session cookie, loads the
//! report view, and waits a fixed settle delay before handing the document
//! over. There is no JavaScript execution, so the report must be rendered
//! server-side for comments to be present.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{SourceError, SourceResult};
use crate::security::LoginCredentials;
use crate::traits::source::{DocumentSession, DocumentSource, LoadedPage};

const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for [`HttpSource`].
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Where the login form posts to
    pub login_url: Url,

    /// The report view to load after login
    pub report_url: Url,

    /// Required; there is no default account
    pub credentials: LoginCredentials,

    /// Fixed wait after requesting the report. Default: 3s.
    pub settle_delay: Duration,

    /// Per-request timeout. Default: 30s.
    pub timeout: Duration,
}

impl HttpSourceConfig {
    pub fn new(
        login_url: &str,
        report_url: &str,
        credentials: LoginCredentials,
    ) -> SourceResult<Self> {
        Ok(Self {
            login_url: parse_url(login_url)?,
            report_url: parse_url(report_url)?,
            credentials,
            settle_delay: Duration::from_secs(3),
            timeout: Duration::from_secs(30),
        })
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_url(raw: &str) -> SourceResult<Url> {
    Url::parse(raw).map_err(|e| SourceError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Logs in over HTTP and loads the report view.
pub struct HttpSource {
    config: HttpSourceConfig,
}

impl HttpSource {
    pub fn new(config: HttpSourceConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn open(&self) -> SourceResult<Box<dyn DocumentSession>> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .timeout(self.config.timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        info!(
            login_url = %self.config.login_url,
            email = %self.config.credentials.email,
            "Logging in"
        );

        let response = client
            .post(self.config.login_url.clone())
            .form(&[
                ("email", self.config.credentials.email.as_str()),
                ("password", self.config.credentials.password.expose()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Login rejected");
            return Err(SourceError::Login(format!("login returned HTTP {}", status)));
        }

        // A successful login either redirects away from the form or sets a cookie
        let still_on_login = response.url().path() == self.config.login_url.path();
        let issued_cookie = response.headers().contains_key(reqwest::header::SET_COOKIE);
        if still_on_login && !issued_cookie {
            return Err(SourceError::Login(
                "no session cookie issued and still on the login page".to_string(),
            ));
        }

        debug!("Login accepted");

        Ok(Box::new(HttpSession {
            client: Some(client),
            report_url: self.config.report_url.clone(),
            settle_delay: self.config.settle_delay,
        }))
    }

    fn name(&self) -> &str {
        "http"
    }
}

struct HttpSession {
    client: Option<reqwest::Client>,
    report_url: Url,
    settle_delay: Duration,
}

#[async_trait]
impl DocumentSession for HttpSession {
    async fn load_report(&mut self) -> SourceResult<LoadedPage> {
        let client = self.client.as_ref().ok_or(SourceError::Closed)?;

        debug!(url = %self.report_url, "Loading report view");
        let response = client.get(self.report_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.report_url, status = %status, "Report view failed to load");
            return Err(SourceError::Load {
                url: self.report_url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let html = response.text().await?;

        if !self.settle_delay.is_zero() {
            debug!(delay_ms = self.settle_delay.as_millis() as u64, "Waiting for report to settle");
            tokio::time::sleep(self.settle_delay).await;
        }

        info!(url = %final_url, bytes = html.len(), "Report view loaded");
        Ok(LoadedPage::new(final_url, html))
    }

    async fn close(&mut self) -> SourceResult<()> {
        if self.client.take().is_some() {
            debug!("HTTP session closed");
        }
        Ok(())
    }
}
