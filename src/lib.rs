//! silencecut - cut recordings at their silences and pack the pieces into
//! duration-bounded merges.

pub mod config;
pub mod error;
pub mod materializer;
pub mod packer;
pub mod pipeline;
pub mod segmenter;
pub mod timestamp;
pub mod tools;
pub mod types;

pub use error::{ParseError, Result, SplitError};
pub use types::{AudioSegment, SplitSettings};
