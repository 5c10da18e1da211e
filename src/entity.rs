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


//! Entities that can take part in percentage scaling and the typed capability interface the host
//! exposes for each of them.

use bitflags::bitflags;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    sync::Arc,
};

/// Stable identifier of an entity. Unique within a scene at a given time, usually the object name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(Arc<str>);

impl EntityId {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for EntityId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geometric kind of an entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Mesh,
    Curve,
    Surface,
    /// Text objects (fonts).
    Text,
    /// Metaball objects.
    Meta,
    Armature,
    Camera,
    Light,
    Empty,
    Other,
}

impl EntityKind {
    /// Returns a filter with the single bit of this kind set.
    pub fn flag(self) -> KindFilter {
        match self {
            EntityKind::Mesh => KindFilter::MESH,
            EntityKind::Curve => KindFilter::CURVE,
            EntityKind::Surface => KindFilter::SURFACE,
            EntityKind::Text => KindFilter::TEXT,
            EntityKind::Meta => KindFilter::META,
            EntityKind::Armature => KindFilter::ARMATURE,
            EntityKind::Camera => KindFilter::CAMERA,
            EntityKind::Light => KindFilter::LIGHT,
            EntityKind::Empty => KindFilter::EMPTY,
            EntityKind::Other => KindFilter::OTHER,
        }
    }
}

bitflags! {
    /// A set of entity kinds. Only entities whose kind is in the set are tracked and scaled.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct KindFilter: u32 {
        const MESH = 1 << 0;
        const CURVE = 1 << 1;
        const SURFACE = 1 << 2;
        const TEXT = 1 << 3;
        const META = 1 << 4;
        const ARMATURE = 1 << 5;
        const CAMERA = 1 << 6;
        const LIGHT = 1 << 7;
        const EMPTY = 1 << 8;
        const OTHER = 1 << 9;

        /// Geometric kinds that make sense to resize.
        const SCALABLE = Self::MESH.bits()
            | Self::CURVE.bits()
            | Self::SURFACE.bits()
            | Self::TEXT.bits()
            | Self::META.bits()
            | Self::ARMATURE.bits();
    }
}

impl KindFilter {
    #[inline]
    pub fn allows(self, kind: EntityKind) -> bool {
        self.contains(kind.flag())
    }
}

impl Default for KindFilter {
    fn default() -> Self {
        Self::SCALABLE
    }
}

/// Capability interface of a single host entity. Host adapters implement it over their own object
/// type; the core never touches host objects in any other way.
pub trait ScalableEntity {
    fn id(&self) -> EntityId;

    fn kind(&self) -> EntityKind;

    /// Current local scale.
    fn scale(&self) -> Vector3<f32>;

    /// Overwrites local scale. Hosts may emit scene-update notifications in response.
    fn set_scale(&mut self, scale: Vector3<f32>);
}
