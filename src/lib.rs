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


//! Homothetic (uniform, percentage based) scaling of selected scene objects.
//!
//! The tool remembers the scale every selected object had at the moment it was selected and
//! resizes the selection to a percentage of that baseline, so repeated edits never accumulate
//! error. Typical workflow:
//!
//! 1. Select one or more objects.
//! 2. Change the percentage value; objects are resized live, relative to their baseline.
//! 3. Deselect the objects to keep the new scale. Selecting a different set of objects captures
//!    fresh baselines and resets the percentage to 100%.
//!
//! Hosts implement [`host::SceneHost`] (and [`entity::ScalableEntity`] for their objects) and wire
//! their notifications to [`controller::HomotheticScale`]. [`scene::Scene`] is a ready-to-use
//! in-memory host.
//!
//! ```rust
//! use homothetic_scale::prelude::*;
//!
//! let mut scene = Scene::new();
//! let cube = scene.add(
//!     SceneObject::new("Cube", EntityKind::Mesh).with_scale(Vector3::repeat(2.0)),
//! );
//! scene.select(&[cube]);
//!
//! let mut tool = HomotheticScale::default();
//! tool.on_selection_changed(&scene);
//! tool.set_percentage(&mut scene, 50.0);
//!
//! assert_eq!(scene[cube].scale(), Vector3::repeat(1.0));
//! ```

pub mod applier;
pub mod controller;
pub mod entity;
pub mod host;
pub mod log;
pub mod percentage;
pub mod reference;
pub mod scene;
pub mod settings;

pub use nalgebra as algebra;

pub mod prelude {
    pub use crate::{
        applier::{ApplyOutcome, ScaleApplier},
        controller::HomotheticScale,
        entity::{EntityId, EntityKind, KindFilter, ScalableEntity},
        host::SceneHost,
        log::{Log, MessageKind},
        percentage::{PercentageProperty, PropertyDescriptor, PropertySubtype},
        reference::{ReferenceSnapshot, ReferenceStore, SelectionChange},
        scene::{ObjectHandle, Scene, SceneObject},
        settings::{PercentageSettings, ScaleSettings, SettingsError},
    };
    pub use nalgebra::Vector3;
}
