//! Proposal execution — the dependency-injection boundary.
//!
//! The engine never calls privileged components directly. The host hands
//! `finish_proposal` a [`Dispatcher`] that routes a target name plus the
//! proposal's opaque payload to the right component (usually a staking
//! engine's `execute_instruction`). The engine treats the call as an
//! untyped remote invocation whose failure must be absorbable.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Names a proposal-execution target within the host's component registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TargetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Why a dispatched proposal call did not go through.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no such dispatch target: {0}")]
    UnknownTarget(TargetId),

    #[error("target call failed: {0}")]
    Failed(String),
}

/// Routes a passed proposal's payload to its privileged target.
pub trait Dispatcher {
    fn dispatch(&mut self, target: &TargetId, payload: &[u8]) -> Result<(), DispatchError>;
}
