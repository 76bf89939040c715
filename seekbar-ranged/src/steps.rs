//! Discrete step positions and nearest-step snapping.

use smallvec::SmallVec;

use crate::{
    range::{DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE, Domain},
    value_space::ValueSpace,
};

/// Absolute value of the first step, always prepended.
pub const DEFAULT_MIN_PROGRESS: f32 = DEFAULT_MIN_VALUE;
/// Absolute value of the last step, always appended.
pub const DEFAULT_MAX_PROGRESS: f32 = DEFAULT_MAX_VALUE;

/// Ordered normalized step fractions.
///
/// Fractions are computed once, against the domain in effect when the steps
/// are assigned. Changing the domain afterwards leaves them untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepSet {
    fractions: SmallVec<[f32; 8]>,
}

impl StepSet {
    /// Builds a step set from absolute values in `domain`.
    ///
    /// The result starts at the fraction of [`DEFAULT_MIN_PROGRESS`] and ends
    /// at the fraction of [`DEFAULT_MAX_PROGRESS`], with `values` in between in
    /// the order given.
    pub fn from_values(values: &[f32], domain: Domain) -> Self {
        let space = ValueSpace::new(domain, 0.0, 0.0);
        let fractions = std::iter::once(DEFAULT_MIN_PROGRESS)
            .chain(values.iter().copied())
            .chain(std::iter::once(DEFAULT_MAX_PROGRESS))
            .map(|value| space.to_normalized(value))
            .collect();
        Self { fractions }
    }

    /// Builds a step set straight from normalized fractions.
    pub fn from_fractions(fractions: impl IntoIterator<Item = f32>) -> Self {
        Self {
            fractions: fractions.into_iter().collect(),
        }
    }

    /// Whether there are no steps.
    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    /// The normalized fractions in order.
    pub fn fractions(&self) -> &[f32] {
        &self.fractions
    }

    /// Converts every fraction back to an absolute value in `domain`.
    pub fn to_absolute(&self, domain: Domain) -> Vec<f32> {
        let space = ValueSpace::new(domain, 0.0, 0.0);
        self.fractions
            .iter()
            .map(|&fraction| space.to_absolute(fraction))
            .collect()
    }

    /// The step closest to `fraction`; `0.0` when the set is empty.
    ///
    /// On equal distance the earlier step wins.
    pub fn closest(&self, fraction: f32) -> f32 {
        let Some((&first, rest)) = self.fractions.split_first() else {
            return 0.0;
        };
        let mut best = first;
        let mut best_distance = (first - fraction).abs();
        for &step in rest {
            let distance = (step - fraction).abs();
            if distance < best_distance {
                best = step;
                best_distance = distance;
            }
        }
        best
    }
}
