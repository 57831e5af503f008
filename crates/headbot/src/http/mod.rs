//! HTTP transport for the Headbot API.
//!
//! This module provides the shared `reqwest` client and the endpoint
//! paths and wire bodies used by the authenticator and executor.

mod client;
pub(crate) mod endpoints;

pub(crate) use client::HttpClient;
