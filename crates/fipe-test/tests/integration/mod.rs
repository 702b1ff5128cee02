#![allow(clippy::unused_async)]
//! Integration tests for the history HTTP API and the lookup flow.
//!
//! These tests run the Salvo app in-process over a per-test temporary
//! history file and issue real HTTP requests; the upstream catalog is
//! stubbed with mockito where a flow needs it.


mod history;
mod lookup_flow;
