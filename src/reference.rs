// Copyright (c) 2019-present Dmitry Stepanov and Fyrox Engine contributors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.


//! Baseline scale bookkeeping. Keeps a snapshot of the scale every selected entity had at the
//! moment it entered the selection and re-captures it whenever selection membership changes.

use crate::{
    entity::{EntityId, KindFilter},
    host::{scalable_ids, scalable_scales, SceneHost},
    info,
};
use fxhash::{FxHashMap, FxHashSet};
use nalgebra::Vector3;

/// Baseline scale of every tracked entity, keyed by entity identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceSnapshot {
    scales: FxHashMap<EntityId, Vector3<f32>>,
}

impl ReferenceSnapshot {
    /// Copies current scales of all selected entities that pass `filter`.
    pub fn capture(host: &dyn SceneHost, filter: KindFilter) -> Self {
        Self {
            scales: scalable_scales(host, filter).into_iter().collect(),
        }
    }

    #[inline]
    pub fn get(&self, id: &EntityId) -> Option<&Vector3<f32>> {
        self.scales.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.scales.contains_key(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.scales.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &EntityId> {
        self.scales.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &Vector3<f32>)> {
        self.scales.iter()
    }

    /// Set equality between the snapshot keys and `ids`. Order is irrelevant.
    pub fn same_members(&self, ids: &FxHashSet<EntityId>) -> bool {
        self.scales.len() == ids.len() && ids.iter().all(|id| self.scales.contains_key(id))
    }
}

/// Result of a selection-change notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    /// Membership is the same, snapshot is untouched.
    Unchanged,
    /// Membership changed and the snapshot was replaced.
    Rebaselined {
        /// Amount of identifiers that entered the selection.
        added: usize,
        /// Amount of identifiers that left the selection.
        removed: usize,
    },
}

impl SelectionChange {
    pub fn is_rebaselined(&self) -> bool {
        matches!(self, SelectionChange::Rebaselined { .. })
    }
}

#[derive(Debug, Default)]
pub struct ReferenceStore {
    snapshot: ReferenceSnapshot,
}

impl ReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &ReferenceSnapshot {
        &self.snapshot
    }

    /// Compares the identifiers of the current scalable selection with the snapshot and replaces
    /// the snapshot wholesale if they differ. Notifications without a membership change are no-ops.
    pub fn on_selection_changed(
        &mut self,
        host: &dyn SceneHost,
        filter: KindFilter,
    ) -> SelectionChange {
        let current = scalable_ids(host, filter);

        if self.snapshot.same_members(&current) {
            return SelectionChange::Unchanged;
        }

        let added = current
            .iter()
            .filter(|id| !self.snapshot.contains(id))
            .count();
        let removed = self
            .snapshot
            .ids()
            .filter(|id| !current.contains(*id))
            .count();

        self.snapshot = ReferenceSnapshot::capture(host, filter);

        info!(
            "Selection changed (+{added}/-{removed}), captured baseline scale of {} object(s).",
            self.snapshot.len()
        );

        SelectionChange::Rebaselined { added, removed }
    }

    /// Drops every baseline.
    pub fn clear(&mut self) {
        self.snapshot = ReferenceSnapshot::default();
    }
}
