//! API module for HTTP and WebSocket endpoints
//!
//! This module provides the REST surface and the WebSocket feeds for the
//! dashboard client: a bulk-fetch snapshot, a live event push, and an inbound
//! push channel for remote producers.

pub mod http;
pub mod rest;
pub mod websocket;

pub use http::create_router;
pub use websocket::AppState;
