//! Shared asynchronous RPC channel and the redirect rules client built on
//! it.

mod channel;
mod client;

pub use channel::{RpcChannel, RpcDelivery, RpcQueue};
pub use client::{
    ChannelRedirectRulesClient, RedirectRulesCall, routing_key, serve_redirect_rules,
};
