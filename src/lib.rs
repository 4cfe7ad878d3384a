// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;         // guard config + loader
pub mod errors;         // error handling
pub mod guard;          // callback guards
pub mod observability;
pub mod traits;         // completion seam

pub use guard::{then, then_with, AbortHandler, Callback, Guard, Link};
