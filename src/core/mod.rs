//! Core types: jobs, completion tracking, and errors

pub mod countdown;
pub mod error;
pub mod job;

pub use countdown::Countdown;
pub use error::{Result, StressError};
pub use job::{Job, JobAction, JobKind};
