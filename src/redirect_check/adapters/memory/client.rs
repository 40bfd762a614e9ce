//! Scripted in-memory redirect rules client.

use crate::redirect_check::{
    domain::ProfileName,
    ports::{RedirectRulesClient, RedirectRulesReply, RedirectRulesRequest, RpcError, RpcResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Redirect rules client that answers from per-profile scripts.
///
/// Profiles without a script fail with [`RpcError::NoResponder`], mirroring
/// a channel with nothing bound to the profile's routing key. Every request
/// is recorded for later inspection.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRedirectRulesClient {
    state: Arc<RwLock<ScriptedClientState>>,
}

#[derive(Debug, Default)]
struct ScriptedClientState {
    scripts: HashMap<ProfileName, RpcResult<RedirectRulesReply>>,
    requests: Vec<RedirectRulesRequest>,
}

impl ScriptedRedirectRulesClient {
    /// Creates a client with no scripts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the reply returned for a profile.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn reply_with(&self, profile: ProfileName, reply: RedirectRulesReply) -> RpcResult<()> {
        self.script(profile, Ok(reply))
    }

    /// Scripts a transport failure for a profile.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_with(&self, profile: ProfileName, error: RpcError) -> RpcResult<()> {
        self.script(profile, Err(error))
    }

    /// Returns every request received so far, in arrival order.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn requests(&self) -> RpcResult<Vec<RedirectRulesRequest>> {
        let state = self
            .state
            .read()
            .map_err(|err| RpcError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state.requests.clone())
    }

    fn script(&self, profile: ProfileName, result: RpcResult<RedirectRulesReply>) -> RpcResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| RpcError::transport(std::io::Error::other(err.to_string())))?;
        state.scripts.insert(profile, result);
        Ok(())
    }
}

#[async_trait]
impl RedirectRulesClient for ScriptedRedirectRulesClient {
    async fn get_redirect_rules(
        &self,
        request: &RedirectRulesRequest,
    ) -> RpcResult<RedirectRulesReply> {
        let mut state = self
            .state
            .write()
            .map_err(|err| RpcError::transport(std::io::Error::other(err.to_string())))?;
        state.requests.push(request.clone());
        state
            .scripts
            .get(request.name())
            .cloned()
            .unwrap_or_else(|| Err(RpcError::NoResponder(request.name().to_string())))
    }
}
