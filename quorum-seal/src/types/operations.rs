//! Request and response types of the room service operations.

pub mod reissue_room;
pub mod secret_room;
pub mod signing_room;
pub mod verify;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::sharing::{AccessFormula, SharingError};

/// Access formula as submitted by clients: either a flat threshold over a
/// list of names or formula text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaRequest {
    Threshold { threshold: usize, names: Vec<String> },
    Formula { formula: String },
}

impl FormulaRequest {
    pub fn to_formula(&self) -> Result<AccessFormula, SharingError> {
        match self {
            FormulaRequest::Threshold { threshold, names } => {
                AccessFormula::threshold(*threshold, names.as_slice())
            }
            FormulaRequest::Formula { formula } => AccessFormula::parse(formula),
        }
    }
}

/// Download path per participant, `None` once the share was delivered.
pub type ShareLinks = BTreeMap<String, Option<String>>;
