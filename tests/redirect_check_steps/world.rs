//! Shared world state for redirect rule check BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use relaycheck::redirect_check::{
    adapters::{
        ContainerValueTransformer,
        memory::{InMemoryPayloadParameters, ScriptedRedirectRulesClient},
    },
    services::{CheckRedirectRulesResponse, RedirectRulesCheckService},
};
use rstest::fixture;

/// Payload identifier used by scenarios.
pub const PAYLOAD_UUID: &str = "9c1d2e3f-4a5b-4c6d-8e7f-0a1b2c3d4e5f";

/// Service type used by the BDD world.
pub type TestCheckService = RedirectRulesCheckService<
    InMemoryPayloadParameters,
    ContainerValueTransformer,
    ScriptedRedirectRulesClient,
    DefaultClock,
>;

/// Scenario world for redirect rule check behaviour tests.
pub struct RedirectCheckWorld {
    /// Parameter store backing the service.
    pub repository: Arc<InMemoryPayloadParameters>,
    /// Scripted profile backends.
    pub client: Arc<ScriptedRedirectRulesClient>,
    /// The check service under test.
    pub service: TestCheckService,
    /// Response from the last check.
    pub last_response: Option<CheckRedirectRulesResponse>,
}

impl RedirectCheckWorld {
    /// Creates a world with empty stores and no scripted backends.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryPayloadParameters::new());
        let client = Arc::new(ScriptedRedirectRulesClient::new());
        let service = RedirectRulesCheckService::new(
            Arc::clone(&repository),
            Arc::new(ContainerValueTransformer::new()),
            Arc::clone(&client),
            Arc::new(DefaultClock),
        );
        Self {
            repository,
            client,
            service,
            last_response: None,
        }
    }

    /// Returns the last response or an error when no check has run.
    ///
    /// # Errors
    ///
    /// Returns an error when no check has run yet.
    pub fn response(&self) -> Result<&CheckRedirectRulesResponse, eyre::Report> {
        self.last_response
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no check has run in scenario world"))
    }
}

impl Default for RedirectCheckWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RedirectCheckWorld {
    RedirectCheckWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
