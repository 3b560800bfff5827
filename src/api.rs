//! Endpoint operations, one async method per remote endpoint.
//!
//! Every operation builds an [`ApiRequest`](crate::request::ApiRequest) and submits it through
//! the client's dispatcher, so all of them share the same queue and delay. Optional caller
//! parameters are passed as `Option<Form>`; `None` sends no extra parameters.

pub mod direct_messages;
pub mod timelines;
pub mod types;
pub mod webhooks;

pub use types::*;
pub use webhooks::ApiTier;
