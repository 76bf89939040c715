//! Persisted widget state.
//!
//! Only the selection and the domain survive; touch sessions and running
//! animations are transient.

use crate::range::{Domain, RangeModel};

/// Snapshot produced by [`SeekBarRanged::save_state`](crate::SeekBarRanged::save_state).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedState {
    /// Lower normalized bound.
    pub normalized_min: f32,
    /// Upper normalized bound.
    pub normalized_max: f32,
    /// Lower domain bound.
    pub domain_min: f32,
    /// Upper domain bound.
    pub domain_max: f32,
    /// Opaque state of the host container, handed back untouched on restore.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub parent: Option<Vec<u8>>,
}

impl SavedState {
    pub(crate) fn capture(model: &RangeModel, parent: Option<Vec<u8>>) -> Self {
        let domain = model.domain();
        Self {
            normalized_min: model.normalized_min(),
            normalized_max: model.normalized_max(),
            domain_min: domain.min,
            domain_max: domain.max,
            parent,
        }
    }

    /// The persisted domain.
    pub fn domain(&self) -> Domain {
        Domain::new(self.domain_min, self.domain_max)
    }

    /// Encodes the snapshot as JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a snapshot produced by [`SavedState::to_json`].
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
