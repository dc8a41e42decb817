//! StateGraph integration tests: compile, invoke, conditional routing.

#[path = "../init_logging.rs"]
mod init_logging;

mod common;
mod conditional;
mod invoke;
