//! Error taxonomy for lookups and registry construction.
//!
//! Runtime commands never surface these to the player; they degrade to
//! "do nothing" and log instead.

use thiserror::Error;

use crate::faction::FactionId;
use crate::types::{RenderHandle, UnitId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("faction '{0}' not found")]
    FactionNotFound(FactionId),
    #[error("duplicate faction id '{0}'")]
    DuplicateFaction(FactionId),
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),
    #[error("no unit owns render handle {0:?}")]
    RenderHandleNotFound(RenderHandle),
    #[error("invalid operation on unit {unit}: {reason}")]
    InvalidOperation { unit: UnitId, reason: &'static str },
}
