// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Call capture and recording for test assertions.
//!
//! This crate records the arguments intercepted HTTP calls were made with,
//! so tests driving an API client through a netless transport can inspect
//! them afterwards.

mod duration_serde;
mod interaction;
mod log;

pub use interaction::{CallArgs, CallOutcome, Headers, InterceptedCall};
pub use log::CaptureLog;
