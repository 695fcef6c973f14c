use alloc::vec::Vec;

/// Rejection reasons for a caller-supplied threshold table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ThresholdError {
    #[error("threshold table is empty")]
    Empty,
    #[error("threshold at index {index} is not finite")]
    NonFinite { index: usize },
    #[error("threshold at index {index} is outside [0, 1]")]
    OutOfRange { index: usize },
    #[error("threshold at index {index} is not strictly greater than its predecessor")]
    NotAscending { index: usize },
}

/// An ordered table of progress cutoffs.
///
/// Entry `i` is the inclusive upper bound of progress for item `i`: progress `p` resolves to
/// the first index whose cutoff is `>= p`. Cutoffs are strictly ascending and lie in `[0, 1]`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
pub struct ThresholdTable {
    cutoffs: Vec<f64>,
}

impl ThresholdTable {
    /// Evenly spaced cutoffs for `count` items: `(i + 1) / count`.
    ///
    /// `count == 0` yields an empty table, which resolves every progress to index 0.
    pub fn uniform(count: usize) -> Self {
        let n = count as f64;
        let cutoffs = (0..count).map(|i| (i + 1) as f64 / n).collect();
        Self { cutoffs }
    }

    /// Validates and wraps explicit cutoffs.
    pub fn from_cutoffs(cutoffs: impl Into<Vec<f64>>) -> Result<Self, ThresholdError> {
        let cutoffs = cutoffs.into();
        if cutoffs.is_empty() {
            return Err(ThresholdError::Empty);
        }
        for (index, &c) in cutoffs.iter().enumerate() {
            if !c.is_finite() {
                return Err(ThresholdError::NonFinite { index });
            }
            if !(0.0..=1.0).contains(&c) {
                return Err(ThresholdError::OutOfRange { index });
            }
            if index > 0 && c <= cutoffs[index - 1] {
                return Err(ThresholdError::NotAscending { index });
            }
        }
        Ok(Self { cutoffs })
    }

    pub fn len(&self) -> usize {
        self.cutoffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cutoffs.is_empty()
    }

    pub fn cutoffs(&self) -> &[f64] {
        &self.cutoffs
    }

    /// Maps `progress` to an item index.
    ///
    /// Equality at a cutoff resolves to that cutoff's index, not the next one. Progress beyond
    /// the last cutoff clamps to the last index; NaN resolves to 0.
    pub fn resolve(&self, progress: f64) -> usize {
        if progress.is_nan() {
            return 0;
        }
        // Cutoffs are ascending, so `c < progress` is a prefix of the table.
        let index = self.cutoffs.partition_point(|&c| c < progress);
        index.min(self.cutoffs.len().saturating_sub(1))
    }
}

impl TryFrom<Vec<f64>> for ThresholdTable {
    type Error = ThresholdError;

    fn try_from(cutoffs: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_cutoffs(cutoffs)
    }
}

impl From<ThresholdTable> for Vec<f64> {
    fn from(table: ThresholdTable) -> Self {
        table.cutoffs
    }
}
