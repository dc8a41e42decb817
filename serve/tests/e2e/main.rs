//! Server e2e tests: REST and WebSocket against a server on 127.0.0.1:0 with a stub model.

#[path = "../init_logging.rs"]
mod init_logging;

mod common;
mod cors;
mod invalid_json;
mod rest;
mod ws;
