// Library target for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree so
// that harnesses can import types via `katadrill::session::*` / `katadrill::catalog::*`.
#![allow(dead_code)]

pub mod catalog;
pub mod config;
pub mod session;

// Private: presentation layer, only reachable through the binary
mod app;
mod event;
mod ui;
