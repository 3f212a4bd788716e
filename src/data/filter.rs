use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dimension, DimensionValue, SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Selection: which values are allowed per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection state: dimension → set of allowed values.
/// A dimension that is absent, or whose set is empty, matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    sets: BTreeMap<Dimension, BTreeSet<DimensionValue>>,
}

impl Selection {
    /// Everything the dataset contains is selected (i.e., show everything).
    pub fn all(dataset: &SalaryDataset) -> Self {
        Selection {
            sets: dataset.unique_values.clone(),
        }
    }

    /// Build a selection from explicit sets, one per dimension.
    pub fn from_sets<I>(sets: I) -> Self
    where
        I: IntoIterator<Item = (Dimension, BTreeSet<DimensionValue>)>,
    {
        Selection {
            sets: sets.into_iter().collect(),
        }
    }

    /// Replace the allowed set for one dimension.
    pub fn set(&mut self, dim: Dimension, values: BTreeSet<DimensionValue>) {
        self.sets.insert(dim, values);
    }

    pub fn is_selected(&self, dim: Dimension, value: &DimensionValue) -> bool {
        self.sets.get(&dim).is_some_and(|s| s.contains(value))
    }

    /// Number of selected values for `dim`.
    pub fn count(&self, dim: Dimension) -> usize {
        self.sets.get(&dim).map_or(0, BTreeSet::len)
    }

    /// Flip a single value in a dimension's set.
    pub fn toggle(&mut self, dim: Dimension, value: &DimensionValue) {
        let selected = self.sets.entry(dim).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
    }

    /// Select every observed value in a dimension.
    pub fn select_all(&mut self, dataset: &SalaryDataset, dim: Dimension) {
        let all = dataset.values(dim).cloned().unwrap_or_default();
        self.sets.insert(dim, all);
    }

    /// Deselect every value in a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.sets.insert(dim, BTreeSet::new());
    }

    /// Whether `record` satisfies every dimension.
    pub fn matches(&self, record: &SalaryRecord) -> bool {
        Dimension::ALL
            .iter()
            .all(|&dim| self.is_selected(dim, &record.value(dim)))
    }
}

/// Return indices of records that pass all dimension filters, in dataset order.
///
/// A record passes when, for every dimension, its value is in the selected
/// set. An empty or missing set rejects every record.
pub fn filtered_indices(dataset: &SalaryDataset, selection: &Selection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// The filtered view: the ordered subsequence of records passing `selection`.
pub fn filter<'a>(dataset: &'a SalaryDataset, selection: &Selection) -> Vec<&'a SalaryRecord> {
    dataset
        .records
        .iter()
        .filter(|rec| selection.matches(rec))
        .collect()
}
