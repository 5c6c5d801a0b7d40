//! Types used throughout the SQS integration.
//!
//! This module defines the attribute enum, message and permission data,
//! request options and the decoded response shapes.

mod common;
mod requests;
mod responses;

pub use common::*;
pub use requests::*;
pub use responses::*;
