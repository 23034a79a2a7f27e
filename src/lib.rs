//! Health check for a fleet of HTTP proxies.
//!
//! Every configured target is requested through every configured proxy, all
//! at once, under one shared deadline. The run passes when at least one probe
//! succeeds; each failing pair is logged.

pub mod cli;
pub mod config;
pub mod probe;
pub mod proxy_client;
pub mod report;
