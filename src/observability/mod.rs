// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging.
//!
//! Every diagnostic event the crate emits is described by a message type in
//! [`messages`]. Each type implements `Display` for the human-readable line
//! and [`messages::StructuredLog`] to emit it through `tracing` at a fixed
//! level with structured fields.
//!
//! # Usage
//!
//! ```rust
//! use flawless::observability::messages::callback::AbortDispatched;
//! use flawless::observability::messages::StructuredLog;
//!
//! let msg = AbortDispatched {
//!     callback: "read_config",
//!     error_type: "std::io::Error",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
