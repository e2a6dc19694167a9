//! Asynchronous progress monitoring.
//!
//! Decouples an engine's iteration speed from a caller-supplied, possibly
//! slow, state-change handler. Events are queued by the producing engine
//! thread(s) and consumed by one dedicated worker thread in FIFO order;
//! posting never blocks, and joining the listener guarantees every queued
//! event was handled before the engine's public call returns.

mod listener;

pub use listener::{StateChangeHandler, StateChangeListener};
