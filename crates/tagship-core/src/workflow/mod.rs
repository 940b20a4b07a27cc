//! Workflow orchestration for tagship

mod branch;
#[cfg(test)]
pub(crate) mod fakes;
pub mod pipeline;
mod preflight;
mod publish;

pub use branch::*;
pub use pipeline::{plan, Step};
pub use preflight::*;
pub use publish::*;
