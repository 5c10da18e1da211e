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


//! In-memory scene that implements [`SceneHost`]. Useful for embedders without a scene of their own
//! and for driving the tool in tests.

use crate::{
    entity::{EntityId, EntityKind, ScalableEntity},
    host::SceneHost,
};
use nalgebra::Vector3;
use std::ops::{Index, IndexMut};

/// Index of an object inside a [`Scene`]. Handles of removed objects are never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(usize);

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    name: EntityId,
    kind: EntityKind,
    scale: Vector3<f32>,
}

impl SceneObject {
    pub fn new<N: Into<EntityId>>(name: N, kind: EntityKind) -> Self {
        Self {
            name: name.into(),
            kind,
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_scale(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    pub fn name(&self) -> &EntityId {
        &self.name
    }
}

impl ScalableEntity for SceneObject {
    fn id(&self) -> EntityId {
        self.name.clone()
    }

    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
    }
}

/// Ordered set of selected objects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    objects: Vec<ObjectHandle>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn objects(&self) -> &[ObjectHandle] {
        &self.objects
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.objects.contains(&handle)
    }

    pub fn insert(&mut self, handle: ObjectHandle) {
        if !self.contains(handle) {
            self.objects.push(handle);
        }
    }

    pub fn remove(&mut self, handle: ObjectHandle) {
        self.objects.retain(|&h| h != handle);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<Option<SceneObject>>,
    selection: Selection,
    update_requests: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object to the scene. Names are expected to be unique, the scene does not check it.
    pub fn add(&mut self, object: SceneObject) -> ObjectHandle {
        self.objects.push(Some(object));
        ObjectHandle(self.objects.len() - 1)
    }

    /// Removes an object from the scene and from the selection.
    pub fn remove(&mut self, handle: ObjectHandle) -> Option<SceneObject> {
        self.selection.remove(handle);
        self.objects.get_mut(handle.0).and_then(|slot| slot.take())
    }

    pub fn try_get(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(handle.0).and_then(|slot| slot.as_ref())
    }

    pub fn try_get_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneObject> {
        self.objects.get_mut(handle.0).and_then(|slot| slot.as_mut())
    }

    pub fn find_by_name(&self, name: &str) -> Option<ObjectHandle> {
        self.objects.iter().enumerate().find_map(|(index, slot)| {
            slot.as_ref()
                .filter(|object| object.name.as_str() == name)
                .map(|_| ObjectHandle(index))
        })
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Gives mutable access to the selection. Handles that do not point to a live object are
    /// ignored during enumeration.
    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Replaces the whole selection.
    pub fn select(&mut self, handles: &[ObjectHandle]) {
        self.selection.clear();
        for &handle in handles {
            self.selection.insert(handle);
        }
    }

    /// Amount of recompute requests received so far.
    pub fn update_requests(&self) -> usize {
        self.update_requests
    }
}

impl Index<ObjectHandle> for Scene {
    type Output = SceneObject;

    fn index(&self, handle: ObjectHandle) -> &Self::Output {
        self.try_get(handle)
            .unwrap_or_else(|| panic!("Invalid object handle {handle:?}!"))
    }
}

impl IndexMut<ObjectHandle> for Scene {
    fn index_mut(&mut self, handle: ObjectHandle) -> &mut Self::Output {
        self.try_get_mut(handle)
            .unwrap_or_else(|| panic!("Invalid object handle {handle:?}!"))
    }
}

impl SceneHost for Scene {
    fn for_each_selected(&self, func: &mut dyn FnMut(&dyn ScalableEntity)) {
        for &handle in self.selection.objects() {
            if let Some(object) = self.try_get(handle) {
                func(object);
            }
        }
    }

    fn for_each_selected_mut(&mut self, func: &mut dyn FnMut(&mut dyn ScalableEntity)) {
        let Self {
            objects, selection, ..
        } = self;
        for handle in selection.objects() {
            if let Some(object) = objects.get_mut(handle.0).and_then(|slot| slot.as_mut()) {
                func(object);
            }
        }
    }

    fn request_update(&mut self) {
        self.update_requests += 1;
    }
}
