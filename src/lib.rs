//! Authenticated forwarding gateway for the Flutterwave transfers API.
//!
//! Callers POST a transfer payload with `Authorization: Bearer <proxy token>`;
//! the gateway swaps in the Flutterwave secret key, relays the body verbatim
//! and hands the upstream status and body back untouched.

pub mod error;
pub mod modules;
pub mod proxy; // Proxy service module
pub mod utils;
