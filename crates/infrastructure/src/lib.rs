//! Ferrous ACME DNS Infrastructure Layer
//!
//! Network side of the validation resolver: message codec glue over
//! `hickory-proto`, UDP/TCP transports and the [`Resolver`](dns::Resolver).
pub mod dns;

pub use dns::Resolver;
