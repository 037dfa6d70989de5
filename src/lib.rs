//! Teralink relay
//!
//! A Telegram bot that relays Terabox share links through the teradl
//! resolution API and replies with direct-download links, with a
//! concurrent keepalive HTTP server for uptime monitoring.

/// Telegram bot implementation
pub mod bot;
/// Configuration management
pub mod config;
/// Keepalive HTTP server
pub mod keepalive;
/// Link relay pipeline
pub mod relay;
/// Shared liveness state
pub mod state;
