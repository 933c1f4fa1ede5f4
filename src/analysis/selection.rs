//! Caller-owned island selections.

use std::collections::BTreeSet;

use super::UvAnalysis;
use crate::mesh::IslandId;

/// A set of selected island indices.
///
/// A selection is owned by the caller and may outlive the analysis it was made
/// against. It is re-validated on every use: ids that are out of range for the
/// current [`UvAnalysis`] are skipped, never reported as errors.
///
/// # Example
///
/// ```
/// use uvmask::analysis::IslandSelection;
/// use uvmask::mesh::IslandId;
///
/// let mut selection = IslandSelection::from_indices([0, 2]);
/// selection.toggle(IslandId::new(2));
/// selection.insert(IslandId::new(5));
///
/// assert!(selection.contains(IslandId::new(0)));
/// assert!(!selection.contains(IslandId::new(2)));
/// assert_eq!(selection.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IslandSelection {
    islands: BTreeSet<IslandId>,
}

impl IslandSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection from raw island indices.
    pub fn from_indices<T: IntoIterator<Item = usize>>(indices: T) -> Self {
        indices.into_iter().map(IslandId::new).collect()
    }

    /// Select every island of an analysis.
    pub fn all(analysis: &UvAnalysis) -> Self {
        analysis.island_ids().collect()
    }

    /// Add an island. Returns `true` if it was not already selected.
    pub fn insert(&mut self, id: IslandId) -> bool {
        self.islands.insert(id)
    }

    /// Remove an island. Returns `true` if it was selected.
    pub fn remove(&mut self, id: IslandId) -> bool {
        self.islands.remove(&id)
    }

    /// Flip the selection state of an island.
    pub fn toggle(&mut self, id: IslandId) {
        if !self.islands.remove(&id) {
            self.islands.insert(id);
        }
    }

    /// Whether an island is selected.
    pub fn contains(&self, id: IslandId) -> bool {
        self.islands.contains(&id)
    }

    /// Number of selected ids, including any that are out of range.
    pub fn len(&self) -> usize {
        self.islands.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.islands.clear();
    }

    /// Iterate over selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = IslandId> + '_ {
        self.islands.iter().copied()
    }

    /// Iterate over the selected ids that exist in `analysis`.
    pub fn valid_islands<'a>(
        &'a self,
        analysis: &'a UvAnalysis,
    ) -> impl Iterator<Item = IslandId> + 'a {
        let count = analysis.num_islands();
        self.islands.iter().copied().filter(move |id| id.index() < count)
    }

    /// Drop ids that are out of range for `analysis`. Returns how many were dropped.
    pub fn retain_valid(&mut self, analysis: &UvAnalysis) -> usize {
        let before = self.islands.len();
        let count = analysis.num_islands();
        self.islands.retain(|id| id.index() < count);
        before - self.islands.len()
    }

    /// Replace the selection with its complement within `analysis`.
    pub fn invert(&mut self, analysis: &UvAnalysis) {
        self.islands = analysis.island_ids().filter(|id| !self.islands.contains(id)).collect();
    }
}

impl FromIterator<IslandId> for IslandSelection {
    fn from_iter<T: IntoIterator<Item = IslandId>>(iter: T) -> Self {
        Self {
            islands: iter.into_iter().collect(),
        }
    }
}

impl Extend<IslandId> for IslandSelection {
    fn extend<T: IntoIterator<Item = IslandId>>(&mut self, iter: T) {
        self.islands.extend(iter);
    }
}
