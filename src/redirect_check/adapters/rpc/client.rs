//! Redirect rules client over the shared RPC channel.

use super::RpcChannel;
use crate::redirect_check::{
    domain::ProfileName,
    ports::{RedirectRulesClient, RedirectRulesReply, RedirectRulesRequest, RpcError, RpcResult},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Suffix appended to a profile name to form its responder routing key.
const ROUTING_KEY_SUFFIX: &str = "redirect_rules";

/// Returns the routing key addressing a profile's redirect rules responder.
#[must_use]
pub fn routing_key(profile: &ProfileName) -> String {
    format!("{profile}_{ROUTING_KEY_SUFFIX}")
}

/// Request as decoded on the responder side of the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectRulesCall {
    /// Profile name the request was addressed to.
    pub name: String,
    /// Parameters in their wire encoding.
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

/// [`RedirectRulesClient`] that sends JSON requests over an [`RpcChannel`].
#[derive(Debug, Clone)]
pub struct ChannelRedirectRulesClient {
    channel: RpcChannel,
}

impl ChannelRedirectRulesClient {
    /// Creates a client sharing the given channel.
    #[must_use]
    pub const fn new(channel: RpcChannel) -> Self {
        Self { channel }
    }

    /// Returns the underlying channel.
    #[must_use]
    pub const fn channel(&self) -> &RpcChannel {
        &self.channel
    }
}

#[async_trait]
impl RedirectRulesClient for ChannelRedirectRulesClient {
    async fn get_redirect_rules(
        &self,
        request: &RedirectRulesRequest,
    ) -> RpcResult<RedirectRulesReply> {
        let body = serde_json::to_vec(request).map_err(RpcError::codec)?;
        let reply = self.channel.call(&routing_key(request.name()), body).await?;
        serde_json::from_slice(&reply).map_err(RpcError::codec)
    }
}

/// Binds a redirect rules responder for `profile` and serves it on a
/// background task.
///
/// Each request is handled on its own task, so replies may complete out of
/// order. Requests that fail to decode are answered with a failure reply.
///
/// # Errors
///
/// Returns [`RpcError::AlreadyBound`] when the profile already has a live
/// responder.
pub fn serve_redirect_rules<F, Fut>(
    channel: &RpcChannel,
    profile: &ProfileName,
    handler: F,
) -> RpcResult<JoinHandle<()>>
where
    F: Fn(RedirectRulesCall) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RedirectRulesReply> + Send + 'static,
{
    let mut queue = channel.bind(routing_key(profile))?;
    let handler = Arc::new(handler);

    Ok(tokio::spawn(async move {
        while let Some(delivery) = queue.next().await {
            let handler = Arc::clone(&handler);
            tokio::spawn(async move {
                let reply = match serde_json::from_slice::<RedirectRulesCall>(delivery.body()) {
                    Ok(call) => handler(call).await,
                    Err(err) => RedirectRulesReply::failure(format!("malformed request: {err}")),
                };
                let correlation_id = delivery.correlation_id();
                match serde_json::to_vec(&reply) {
                    Ok(body) => {
                        if !delivery.reply(body) {
                            tracing::debug!(
                                %correlation_id,
                                "reply arrived after the caller stopped waiting"
                            );
                        }
                    }
                    Err(err) => {
                        tracing::warn!(
                            %correlation_id,
                            routing_key = delivery.routing_key(),
                            error = %err,
                            "failed to encode redirect rules reply"
                        );
                    }
                }
            });
        }
    }))
}
