//! Process-wide request/response channel with correlation-id matching.
//!
//! Requests are routed by key to a bound responder queue. Each call gets a
//! fresh correlation id and a pending reply slot; a reply completes only the
//! slot with its id, so any number of calls may be outstanding at once.

use crate::config::RpcSettings;
use crate::redirect_check::ports::{RpcError, RpcResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// Cloneable handle to the shared RPC channel.
#[derive(Debug, Clone)]
pub struct RpcChannel {
    shared: Arc<ChannelShared>,
}

#[derive(Debug)]
struct ChannelShared {
    routes: RwLock<HashMap<String, mpsc::Sender<RpcDelivery>>>,
    pending: Mutex<HashMap<Uuid, oneshot::Sender<Vec<u8>>>>,
    timeout: Duration,
    queue_capacity: usize,
}

impl RpcChannel {
    /// Creates a channel with the given reply bound and per-route queue
    /// capacity.
    #[must_use]
    pub fn new(timeout: Duration, queue_capacity: usize) -> Self {
        Self {
            shared: Arc::new(ChannelShared {
                routes: RwLock::new(HashMap::new()),
                pending: Mutex::new(HashMap::new()),
                timeout,
                queue_capacity: queue_capacity.max(1),
            }),
        }
    }

    /// Creates a channel from RPC settings.
    #[must_use]
    pub fn from_settings(settings: &RpcSettings) -> Self {
        Self::new(settings.timeout(), settings.queue_capacity())
    }

    /// Returns the reply bound applied to every call.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.shared.timeout
    }

    /// Returns the number of calls currently awaiting a reply.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Transport`] when lock acquisition fails.
    pub fn pending_calls(&self) -> RpcResult<usize> {
        let pending = self
            .shared
            .pending
            .lock()
            .map_err(|err| RpcError::transport(std::io::Error::other(err.to_string())))?;
        Ok(pending.len())
    }

    /// Binds a responder queue to a routing key.
    ///
    /// A key whose previous queue was dropped may be bound again.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::AlreadyBound`] when a live queue already holds the
    /// key, or [`RpcError::Transport`] when lock acquisition fails.
    pub fn bind(&self, routing_key: impl Into<String>) -> RpcResult<RpcQueue> {
        let key = routing_key.into();
        let mut routes = self
            .shared
            .routes
            .write()
            .map_err(|err| RpcError::transport(std::io::Error::other(err.to_string())))?;

        if routes.get(&key).is_some_and(|sender| !sender.is_closed()) {
            return Err(RpcError::AlreadyBound(key));
        }

        let (sender, receiver) = mpsc::channel(self.shared.queue_capacity);
        routes.insert(key.clone(), sender);
        tracing::debug!(routing_key = %key, "rpc responder bound");
        Ok(RpcQueue {
            routing_key: key,
            receiver,
        })
    }

    /// Sends a request body to the responder bound to `routing_key` and
    /// awaits the correlated reply.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::NoResponder`] when nothing live is bound to the
    /// key, [`RpcError::Timeout`] when no reply arrives in time, or
    /// [`RpcError::Closed`] when the responder drops the request.
    pub async fn call(&self, routing_key: &str, body: Vec<u8>) -> RpcResult<Vec<u8>> {
        let queue = self.route(routing_key)?;
        let correlation_id = Uuid::new_v4();
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.shared.register(correlation_id, reply_sender)?;

        let delivery = RpcDelivery {
            correlation_id,
            routing_key: routing_key.to_owned(),
            body,
            shared: Arc::clone(&self.shared),
            answered: false,
        };

        let exchange = async {
            queue
                .send(delivery)
                .await
                .map_err(|_| RpcError::NoResponder(routing_key.to_owned()))?;
            reply_receiver
                .await
                .map_err(|_| RpcError::Closed(routing_key.to_owned()))
        };
        let outcome = tokio::time::timeout(self.shared.timeout, exchange).await;
        self.shared.forget(correlation_id);

        match outcome {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout {
                routing_key: routing_key.to_owned(),
                timeout: self.shared.timeout,
            }),
        }
    }

    fn route(&self, routing_key: &str) -> RpcResult<mpsc::Sender<RpcDelivery>> {
        let routes = self
            .shared
            .routes
            .read()
            .map_err(|err| RpcError::transport(std::io::Error::other(err.to_string())))?;
        routes
            .get(routing_key)
            .filter(|sender| !sender.is_closed())
            .cloned()
            .ok_or_else(|| RpcError::NoResponder(routing_key.to_owned()))
    }
}

impl ChannelShared {
    fn register(&self, correlation_id: Uuid, sender: oneshot::Sender<Vec<u8>>) -> RpcResult<()> {
        let mut pending = self
            .pending
            .lock()
            .map_err(|err| RpcError::transport(std::io::Error::other(err.to_string())))?;
        pending.insert(correlation_id, sender);
        Ok(())
    }

    fn take(&self, correlation_id: Uuid) -> Option<oneshot::Sender<Vec<u8>>> {
        match self.pending.lock() {
            Ok(mut pending) => pending.remove(&correlation_id),
            Err(err) => {
                tracing::error!(%correlation_id, error = %err, "rpc pending table poisoned");
                None
            }
        }
    }

    fn complete(&self, correlation_id: Uuid, body: Vec<u8>) -> bool {
        let Some(sender) = self.take(correlation_id) else {
            tracing::debug!(%correlation_id, "discarding reply with no pending call");
            return false;
        };
        sender.send(body).is_ok()
    }

    fn forget(&self, correlation_id: Uuid) {
        drop(self.take(correlation_id));
    }
}

/// Receiving end of a bound routing key.
#[derive(Debug)]
pub struct RpcQueue {
    routing_key: String,
    receiver: mpsc::Receiver<RpcDelivery>,
}

impl RpcQueue {
    /// Returns the bound routing key.
    #[must_use]
    pub fn routing_key(&self) -> &str {
        &self.routing_key
    }

    /// Waits for the next request. Returns `None` once the channel is gone.
    pub async fn next(&mut self) -> Option<RpcDelivery> {
        self.receiver.recv().await
    }
}

/// A request delivered to a responder, carrying its correlation id.
///
/// Dropping a delivery without replying fails the waiting call with
/// [`RpcError::Closed`].
#[derive(Debug)]
pub struct RpcDelivery {
    correlation_id: Uuid,
    routing_key: String,
    body: Vec<u8>,
    shared: Arc<ChannelShared>,
    answered: bool,
}

impl RpcDelivery {
    /// Returns the correlation id assigned by the caller.
    #[must_use]
    pub const fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Returns the routing key the request was sent to.
    #[must_use]
    pub fn routing_key(&self) -> &str {
        &self.routing_key
    }

    /// Returns the request body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Sends the reply to the waiting call.
    ///
    /// Returns `false` when the call already gave up (for example after a
    /// timeout); the reply is discarded.
    #[must_use = "a false result means the reply was discarded"]
    pub fn reply(mut self, body: Vec<u8>) -> bool {
        self.answered = true;
        self.shared.complete(self.correlation_id, body)
    }
}

impl Drop for RpcDelivery {
    fn drop(&mut self) {
        if !self.answered {
            self.shared.forget(self.correlation_id);
        }
    }
}
