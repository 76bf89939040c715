//! The range model: domain bounds and the normalized selection.
//!
//! The normalized selection is the single source of truth for the selected
//! range; absolute values are always derived through the [`Domain`]. Every
//! write goes through [`RangeModel::set_normalized_min`] or
//! [`RangeModel::set_normalized_max`], which re-clamp against the opposite
//! bound, so touch handling, animation ticks and restores cannot break
//! `0 <= normalized_min <= normalized_max <= 1`.

/// Lower domain bound used by default and forced while step mode is on.
pub const DEFAULT_MIN_VALUE: f32 = 0.0;
/// Upper domain bound used by default and forced while step mode is on.
pub const DEFAULT_MAX_VALUE: f32 = 100.0;

/// The absolute value space the widget represents.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl Domain {
    /// Creates a domain; `max >= min` is expected but not enforced.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `max - min`.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Whether the domain has collapsed to a single value.
    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_VALUE, DEFAULT_MAX_VALUE)
    }
}

/// Which end of the selection an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// The lower selected value.
    Min,
    /// The upper selected value.
    Max,
}

/// Domain plus normalized selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeModel {
    domain: Domain,
    normalized_min: f32,
    normalized_max: f32,
}

impl Default for RangeModel {
    fn default() -> Self {
        Self {
            domain: Domain::default(),
            normalized_min: 0.0,
            normalized_max: 1.0,
        }
    }
}

impl RangeModel {
    /// A full selection over `domain`.
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            ..Self::default()
        }
    }

    /// Current domain.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Lower normalized bound.
    pub fn normalized_min(&self) -> f32 {
        self.normalized_min
    }

    /// Upper normalized bound.
    pub fn normalized_max(&self) -> f32 {
        self.normalized_max
    }

    /// Normalized value of `bound`.
    pub fn normalized(&self, bound: Bound) -> f32 {
        match bound {
            Bound::Min => self.normalized_min,
            Bound::Max => self.normalized_max,
        }
    }

    /// Absolute lower selected value.
    pub fn selected_min(&self) -> f32 {
        self.to_absolute(self.normalized_min)
    }

    /// Absolute upper selected value.
    pub fn selected_max(&self) -> f32 {
        self.to_absolute(self.normalized_max)
    }

    /// Absolute value of `bound`.
    pub fn selected(&self, bound: Bound) -> f32 {
        self.to_absolute(self.normalized(bound))
    }

    /// Replaces the lower domain bound; the normalized selection is kept.
    pub fn set_domain_min(&mut self, min: f32) {
        self.domain.min = min;
    }

    /// Replaces the upper domain bound; the normalized selection is kept.
    pub fn set_domain_max(&mut self, max: f32) {
        self.domain.max = max;
    }

    /// Stores `value` so that `0 <= value <= normalized_max`.
    pub fn set_normalized_min(&mut self, value: f32) {
        self.normalized_min = value.min(self.normalized_max).clamp(0.0, 1.0);
    }

    /// Stores `value` so that `normalized_min <= value <= 1`.
    pub fn set_normalized_max(&mut self, value: f32) {
        self.normalized_max = value.max(self.normalized_min).clamp(0.0, 1.0);
    }

    /// Normalized write to either bound.
    pub fn set_normalized(&mut self, bound: Bound, value: f32) {
        match bound {
            Bound::Min => self.set_normalized_min(value),
            Bound::Max => self.set_normalized_max(value),
        }
    }

    /// Sets the lower bound from an absolute value.
    ///
    /// In a collapsed domain the lower thumb parks at `0`.
    pub fn set_selected_min(&mut self, value: f32) {
        let normalized = if self.domain.is_degenerate() {
            0.0
        } else {
            self.to_normalized(value)
        };
        self.set_normalized_min(normalized);
    }

    /// Sets the upper bound from an absolute value.
    ///
    /// In a collapsed domain the upper thumb parks at `1`.
    pub fn set_selected_max(&mut self, value: f32) {
        let normalized = if self.domain.is_degenerate() {
            1.0
        } else {
            self.to_normalized(value)
        };
        self.set_normalized_max(normalized);
    }

    /// Absolute write to either bound.
    pub fn set_selected(&mut self, bound: Bound, value: f32) {
        match bound {
            Bound::Min => self.set_selected_min(value),
            Bound::Max => self.set_selected_max(value),
        }
    }

    /// Reinstates persisted values.
    ///
    /// Out-of-range or inverted selections are repaired the same way the
    /// setters would, so a corrupt snapshot cannot break the ordering.
    pub fn restore(&mut self, domain: Domain, normalized_min: f32, normalized_max: f32) {
        self.domain = domain;
        let min = sanitize(normalized_min, 0.0);
        let max = sanitize(normalized_max, 1.0);
        self.normalized_min = min;
        self.normalized_max = max.max(min);
    }

    fn to_normalized(&self, value: f32) -> f32 {
        if self.domain.is_degenerate() {
            0.0
        } else {
            (value - self.domain.min) / self.domain.span()
        }
    }

    fn to_absolute(&self, normalized: f32) -> f32 {
        self.domain.min + normalized * self.domain.span()
    }
}

fn sanitize(value: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_min_clamps_to_max() {
        let mut model = RangeModel::default();
        model.set_selected_max(80.0);
        model.set_selected_min(90.0);
        assert_abs_diff_eq!(model.selected_min(), 80.0, epsilon = 1e-4);
        assert_abs_diff_eq!(model.selected_max(), 80.0, epsilon = 1e-4);
    }

    #[test]
    fn test_max_clamps_to_min() {
        let mut model = RangeModel::default();
        model.set_selected_min(30.0);
        model.set_selected_max(10.0);
        assert_abs_diff_eq!(model.selected_max(), 30.0, epsilon = 1e-4);
    }

    #[test]
    fn test_values_outside_domain_are_clamped() {
        let mut model = RangeModel::default();
        model.set_selected_min(-20.0);
        model.set_selected_max(250.0);
        assert_eq!(model.normalized_min(), 0.0);
        assert_eq!(model.normalized_max(), 1.0);
    }

    #[test]
    fn test_collapsed_domain_reads_back_min() {
        let mut model = RangeModel::new(Domain::new(5.0, 5.0));
        model.set_selected_min(5.0);
        model.set_selected_max(5.0);
        assert_eq!(model.normalized_min(), 0.0);
        assert_eq!(model.normalized_max(), 1.0);
        assert_eq!(model.selected_min(), 5.0);
        assert_eq!(model.selected_max(), 5.0);
    }

    #[test]
    fn test_domain_change_keeps_fractions() {
        let mut model = RangeModel::default();
        model.set_selected_min(20.0);
        model.set_domain_max(200.0);
        assert_abs_diff_eq!(model.normalized_min(), 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(model.selected_min(), 40.0, epsilon = 1e-4);
    }

    #[test]
    fn test_restore_repairs_inverted_snapshot() {
        let mut model = RangeModel::default();
        model.restore(Domain::new(0.0, 10.0), 0.9, 0.3);
        assert_eq!(model.normalized_min(), 0.9);
        assert_eq!(model.normalized_max(), 0.9);

        model.restore(Domain::new(0.0, 10.0), f32::NAN, 4.0);
        assert_eq!(model.normalized_min(), 0.0);
        assert_eq!(model.normalized_max(), 1.0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Min(f32),
        Max(f32),
        NormalizedMin(f32),
        NormalizedMax(f32),
        DomainMin(f32),
        DomainMax(f32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-500.0f32..500.0).prop_map(Op::Min),
            (-500.0f32..500.0).prop_map(Op::Max),
            (-2.0f32..3.0).prop_map(Op::NormalizedMin),
            (-2.0f32..3.0).prop_map(Op::NormalizedMax),
            (-500.0f32..500.0).prop_map(Op::DomainMin),
            (-500.0f32..500.0).prop_map(Op::DomainMax),
        ]
    }

    proptest! {
        #[test]
        fn ordering_survives_any_sequence(ops in prop::collection::vec(op(), 0..64)) {
            let mut model = RangeModel::default();
            for op in ops {
                match op {
                    Op::Min(v) => model.set_selected_min(v),
                    Op::Max(v) => model.set_selected_max(v),
                    Op::NormalizedMin(v) => model.set_normalized_min(v),
                    Op::NormalizedMax(v) => model.set_normalized_max(v),
                    Op::DomainMin(v) => model.set_domain_min(v),
                    Op::DomainMax(v) => model.set_domain_max(v),
                }
                prop_assert!(model.normalized_min() <= model.normalized_max());
                prop_assert!((0.0..=1.0).contains(&model.normalized_min()));
                prop_assert!((0.0..=1.0).contains(&model.normalized_max()));
            }
        }
    }
}
