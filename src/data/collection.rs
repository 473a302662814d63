use std::cmp::Ordering;
use std::fmt;

use log::debug;

use super::model::{NumberFormat, Sample, Scalar, Series};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// SeriesCollection – ordered set of series with (key, date) uniqueness
// ---------------------------------------------------------------------------

/// An ordered collection of series.
///
/// Membership is append-only: `add` is the sole uniqueness gate and no
/// removal operation exists. The backing sequence is never exposed
/// mutably, so the (key, date) invariant cannot be violated from
/// outside.
#[derive(Clone, Debug, Default)]
pub struct SeriesCollection<N: Scalar> {
    members: Vec<Series<N>>,
}

impl<N: Scalar> SeriesCollection<N> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Series<N>> {
        self.members.iter()
    }

    /// Append `series` unless an existing member shares both its key and
    /// its date. Returns whether the series was inserted; rejection is a
    /// normal outcome, not an error.
    pub fn add(&mut self, series: impl Into<Series<N>>) -> bool {
        let series = series.into();
        if self
            .members
            .iter()
            .any(|m| m.key() == series.key() && m.date() == series.date())
        {
            debug!(
                "rejected duplicate series: key = {}, date = {}",
                series.key(),
                series.date()
            );
            return false;
        }
        self.members.push(series);
        true
    }

    /// First member (insertion order) whose key matches.
    pub fn get(&self, key: &str) -> Result<&Series<N>, DataError> {
        self.members
            .iter()
            .find(|m| m.key() == key)
            .ok_or_else(|| DataError::KeyNotFound(key.to_string()))
    }

    /// Every sample of every member, in collection order then per-series
    /// order. Restartable: each call rescans from the start.
    pub fn samples(&self) -> impl Iterator<Item = Sample<N>> + '_ {
        self.members.iter().flat_map(Series::samples)
    }

    /// Maximum of `|Y1|` over the flattened enumeration, or `-1` when it
    /// is empty. The sentinel is safe only because real magnitudes are
    /// non-negative.
    pub fn max_y1_magnitude(&self) -> f64 {
        self.samples()
            .map(|s| s.y1.magnitude())
            .fold(-1.0, f64::max)
    }

    /// The distinct X coordinates that occur in two or more *distinct*
    /// member series, sorted ascending. An X repeating within a single
    /// series does not qualify on its own.
    pub fn repeating_x_coordinates(&self) -> Vec<f64> {
        // (x, member index) for every sample, grouped by runs after a
        // total_cmp sort.
        let mut hits: Vec<(f64, usize)> = Vec::new();
        for (index, series) in self.members.iter().enumerate() {
            for sample in series.samples() {
                hits.push((sample.x, index));
            }
        }
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut repeating = Vec::new();
        let mut run = 0;
        while run < hits.len() {
            let x = hits[run].0;
            let mut end = run;
            let mut distinct_members = 0;
            let mut last_member = usize::MAX;
            while end < hits.len() && hits[end].0.total_cmp(&x) == Ordering::Equal {
                if hits[end].1 != last_member {
                    distinct_members += 1;
                    last_member = hits[end].1;
                }
                end += 1;
            }
            if distinct_members > 1 {
                repeating.push(x);
            }
            run = end;
        }
        repeating
    }

    /// Collection header followed by each member's long-form rendering.
    pub fn to_long_string(&self, fmt: NumberFormat) -> String {
        let mut out = format!("SeriesCollection (detailed): {} elements", self.members.len());
        for member in &self.members {
            out.push('\n');
            out.push_str(&member.to_long_string(fmt));
        }
        out
    }
}

impl<N: Scalar> fmt::Display for SeriesCollection<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeriesCollection: {} elements", self.members.len())?;
        for member in &self.members {
            write!(f, "\n{member}")?;
        }
        Ok(())
    }
}

impl<'a, N: Scalar> IntoIterator for &'a SeriesCollection<N> {
    type Item = &'a Series<N>;
    type IntoIter = std::slice::Iter<'a, Series<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
