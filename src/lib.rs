//! Trigger/action dispatch engine for visual-builder components.
//!
//! Components declare [`ActionDescriptor`](action::ActionDescriptor)s; the
//! [`ActionDispatcher`](dispatch::ActionDispatcher) turns them into event
//! handlers, one-shot lifecycle firings, and named polls kept in a
//! [`PollRegistry`](poll::PollRegistry). Everything ends up as a
//! [`DispatchMessage`](action::DispatchMessage) handed to a
//! [`DispatchSink`](dispatch::DispatchSink).

pub mod action;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod manifest;
pub mod mvi;
pub mod poll;
pub mod script;
pub mod trigger;
pub mod ui;
