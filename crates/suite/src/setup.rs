//! The shared per-test fixture: where to send requests and with which headers.

use std::path::Path;
use std::sync::Arc;

use postprobe_application::{
    ApplicationError, ApplicationResult, ExecuteRequestError, FixtureSource, RunCase,
};
use postprobe_domain::request::Header;
use postprobe_domain::{ApiCase, CaseReport, FixturePayload};
use postprobe_infrastructure::config::DEFAULT_FIXTURE_PATH;
use postprobe_infrastructure::{FileFixtureSource, ReqwestHttpClient, SuiteConfig, TestRunner};

/// Base URL, default header and fixture location for one test.
#[derive(Debug, Clone)]
pub struct ApiSetup {
    config: SuiteConfig,
    header: Header,
}

/// Builds the fixture from the environment.
///
/// The default fixture path resolves against this crate's directory, so it
/// finds `test_data.json` next to `Cargo.toml`. A path given through
/// `POSTPROBE_FIXTURE_PATH` is used as is.
///
/// # Errors
///
/// Returns `ApplicationError::Config` if an environment override is invalid.
pub fn api_setup() -> ApplicationResult<ApiSetup> {
    let config = SuiteConfig::from_env().map_err(|e| ApplicationError::Config(e.to_string()))?;
    Ok(ApiSetup::from_config(anchor_default_fixture(config)))
}

fn anchor_default_fixture(mut config: SuiteConfig) -> SuiteConfig {
    if config.fixture_path == Path::new(DEFAULT_FIXTURE_PATH) {
        config.fixture_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_FIXTURE_PATH);
    }
    config
}

impl ApiSetup {
    /// Builds the fixture from an explicit configuration.
    #[must_use]
    pub fn from_config(config: SuiteConfig) -> Self {
        Self {
            config,
            header: Header::json_content_type(),
        }
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The header attached to requests carrying a body.
    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// The configuration this fixture was built from.
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Joins the base URL and `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    /// Reads the fixture file afresh.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Fixture` if the file is missing or malformed.
    pub async fn load_fixture(&self) -> ApplicationResult<FixturePayload> {
        Ok(FileFixtureSource::new()
            .load(&self.config.fixture_path)
            .await?)
    }

    /// Sends the case with a client of its own and verifies its assertions.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built or the call fails.
    pub async fn run(&self, case: ApiCase) -> ApplicationResult<CaseReport> {
        let mut case = case;
        if case.request.timeout_ms.is_none() {
            case.request.timeout_ms = self.config.timeout_ms;
        }

        let client = ReqwestHttpClient::new().map_err(ExecuteRequestError::from)?;
        let report = RunCase::new(Arc::new(client), TestRunner::new())
            .run(&case)
            .await?;
        Ok(report)
    }
}
