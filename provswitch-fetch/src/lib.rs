// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Provswitch Fetch
//!
//! The usage-script executor for Provswitch.
//!
//! A usage script is a user-authored descriptor with a `request` member and
//! an `extractor` function (see `provswitch_core::UsageScript`). Executing
//! one crosses a trust boundary, so the flow is fixed:
//!
//! 1. Substitute the `{{apiKey}}`/`{{baseUrl}}` placeholders
//! 2. Extract the request config through the [`ScriptEngine`] sandbox
//! 3. Perform the HTTP request under the script's declared timeout
//! 4. Run the extractor on the raw response, again inside the sandbox
//! 5. Validate the result shape and normalize it into plan entries
//!
//! Every failure along the way degrades to `UsageResult {success: false}`;
//! nothing escapes the executor.
//!
//! The sandbox itself is not implemented here: [`ScriptEngine`] is the
//! boundary, and hosts plug in their own engine.

pub mod descriptor;
pub mod engine;
pub mod error;
pub mod executor;

pub use descriptor::{
    substitute_placeholders, UsageRequest, API_KEY_PLACEHOLDER, BASE_URL_PLACEHOLDER,
};
pub use engine::ScriptEngine;
pub use error::FetchError;
pub use executor::UsageExecutor;
