//! Helpers for relaying form parameters to embedded third-party tools.
//!
//! The crate offers a handful of independent, stateless operations:
//!
//! - [`submit_form_post`] sends a parameter set as a form-encoded POST and
//!   returns the response body,
//! - [`serialize_to_query_string`] and [`parse_query_string`] convert between
//!   parameter sets and query strings,
//! - [`flatten_parameter_map`] keeps the first value of each key of a
//!   multi-valued parameter map,
//! - [`render_auto_submit_form`] builds an HTML fragment that makes the
//!   browser POST the parameters to a tool (an LTI launch).

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod launch;
pub mod params;
pub mod query;
pub mod submitter;

pub use client::{
    submit_form_post, submit_form_post_blocking, submit_form_post_with_config, FormPostClient,
};
pub use config::PostConfig;
pub use error::RelayError;
pub use launch::{render_auto_submit_form, LaunchForm, BASICLTI_SUBMIT};
pub use params::{flatten_parameter_map, MultiValuedParams, ParameterSet};
pub use query::{parse_query_string, serialize_to_query_string};
pub use submitter::FormSubmitter;

#[cfg(feature = "mock")]
pub use submitter::MockFormSubmitter;

pub type Result<T> = std::result::Result<T, RelayError>;
