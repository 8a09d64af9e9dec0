//! Riot API proxy.
//!
//! Resolves Riot IDs into PUUIDs, forwards summoner profiles and computes
//! recent win rates, behind bearer-token auth and per-client rate limiting.

pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod logging;
pub mod riot;
pub mod winrate;
