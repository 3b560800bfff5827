//! OAuth 1.0a credentials, signing, and the three-legged handshake.

pub mod credentials;
pub mod handshake;
pub mod oauth1;
pub mod secret;

pub use credentials::*;
pub use handshake::*;
pub use oauth1::*;
pub use secret::*;
