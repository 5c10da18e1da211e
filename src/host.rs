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


//! Capabilities the core consumes from its hosting environment.

use crate::entity::{EntityId, KindFilter, ScalableEntity};
use fxhash::FxHashSet;
use nalgebra::Vector3;

/// A scene as seen by the scaling tool: a selection that can be enumerated and mutated, and a way
/// to request a batched recompute once all mutations are done.
pub trait SceneHost {
    /// Calls `func` for every currently selected entity, regardless of its kind.
    fn for_each_selected(&self, func: &mut dyn FnMut(&dyn ScalableEntity));

    /// Mutable counterpart of [`Self::for_each_selected`].
    fn for_each_selected_mut(&mut self, func: &mut dyn FnMut(&mut dyn ScalableEntity));

    /// Requests a scene/viewport recompute. Called once per batch of scale writes.
    fn request_update(&mut self);
}

/// Identifiers of the selected entities that pass `filter`.
pub fn scalable_ids(host: &dyn SceneHost, filter: KindFilter) -> FxHashSet<EntityId> {
    let mut ids = FxHashSet::default();
    host.for_each_selected(&mut |entity| {
        if filter.allows(entity.kind()) {
            ids.insert(entity.id());
        }
    });
    ids
}

/// Identifiers and current scales of the selected entities that pass `filter`.
pub fn scalable_scales(host: &dyn SceneHost, filter: KindFilter) -> Vec<(EntityId, Vector3<f32>)> {
    let mut scales = Vec::new();
    host.for_each_selected(&mut |entity| {
        if filter.allows(entity.kind()) {
            scales.push((entity.id(), entity.scale()));
        }
    });
    scales
}
