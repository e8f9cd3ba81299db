//! Core lookup flow
//!
//! - `query`: blank-input check and the artist/title split
//! - `api`: the remote lyrics service and its HTTP client
//! - `result`: mapping responses and failures to lookup outcomes
//! - `state`: display state and the sink the screen reads it from
//! - `controller`: one request cycle from trigger to rendered result

pub mod api;
pub mod controller;
pub mod query;
pub mod result;
pub mod state;

