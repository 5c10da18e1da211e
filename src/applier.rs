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


//! Writes percentage-scaled baselines back to the selected entities.

use crate::{entity::KindFilter, host::SceneHost, log::Log, reference::ReferenceSnapshot};
use nalgebra::Vector3;
use std::cell::Cell;

const MISSING_BASELINE_LOG_ID: u64 = 0x5CA1E;

/// What an apply pass did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied {
        /// Entities that received a new scale.
        scaled: usize,
        /// Scalable entities without a baseline, left untouched.
        skipped: usize,
    },
    /// Another apply pass was already running on this applier, nothing was done.
    Reentrant,
}

/// Releases the applier lock when dropped, so the flag is cleared on every exit path including
/// unwinding.
#[must_use = "the lock is released as soon as the guard is dropped"]
struct ApplyGuard<'a>(&'a Cell<bool>);

impl Drop for ApplyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Computes `baseline * (percentage / 100)` component-wise.
#[inline]
pub fn scale_from_baseline(baseline: &Vector3<f32>, percentage: f32) -> Vector3<f32> {
    baseline * (percentage / 100.0)
}

#[derive(Debug, Default)]
pub struct ScaleApplier {
    applying: Cell<bool>,
}

impl ScaleApplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while an apply pass is in progress.
    pub fn is_applying(&self) -> bool {
        self.applying.get()
    }

    fn try_lock(&self) -> Option<ApplyGuard<'_>> {
        if self.applying.replace(true) {
            None
        } else {
            Some(ApplyGuard(&self.applying))
        }
    }

    /// Sets the scale of every selected entity that passes `filter` and has a baseline in
    /// `snapshot` to `baseline * percentage / 100`. Scales are always recomputed from the baseline,
    /// never from the current value. The host is asked for a single recompute after all writes.
    ///
    /// `percentage` is expected to be in the property range already. A nested call made while this
    /// one is running (for example from a host notification fired by `set_scale` or
    /// `request_update`) returns [`ApplyOutcome::Reentrant`] without touching anything.
    pub fn apply_percentage(
        &self,
        snapshot: &ReferenceSnapshot,
        host: &mut dyn SceneHost,
        filter: KindFilter,
        percentage: f32,
    ) -> ApplyOutcome {
        let Some(_guard) = self.try_lock() else {
            return ApplyOutcome::Reentrant;
        };

        let mut scaled = 0;
        let mut skipped = 0;
        host.for_each_selected_mut(&mut |entity| {
            if !filter.allows(entity.kind()) {
                return;
            }

            match snapshot.get(&entity.id()) {
                Some(baseline) => {
                    entity.set_scale(scale_from_baseline(baseline, percentage));
                    scaled += 1;
                }
                None => skipped += 1,
            }
        });

        host.request_update();

        if skipped > 0 {
            // Drags fire many passes in a row, report each distinct situation once.
            Log::warn_once(
                MISSING_BASELINE_LOG_ID,
                format!("{skipped} selected object(s) have no baseline scale, left untouched."),
            );
        }

        ApplyOutcome::Applied { scaled, skipped }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        applier::{scale_from_baseline, ApplyOutcome, ScaleApplier},
        entity::{EntityId, EntityKind, KindFilter, ScalableEntity},
        host::SceneHost,
        reference::{ReferenceSnapshot, ReferenceStore},
        scene::{Scene, SceneObject},
    };
    use nalgebra::Vector3;
    use std::rc::Rc;

    fn selected_scene(objects: &[(&str, EntityKind, Vector3<f32>)]) -> Scene {
        let mut scene = Scene::new();
        let handles = objects
            .iter()
            .map(|&(name, kind, scale)| scene.add(SceneObject::new(name, kind).with_scale(scale)))
            .collect::<Vec<_>>();
        scene.select(&handles);
        scene
    }

    fn scale_of(scene: &Scene, name: &str) -> Vector3<f32> {
        scene[scene.find_by_name(name).unwrap()].scale()
    }

    #[test]
    fn test_scale_law_without_drift() {
        let mut scene = selected_scene(&[("A", EntityKind::Mesh, Vector3::repeat(2.0))]);
        let mut store = ReferenceStore::new();
        store.on_selection_changed(&scene, KindFilter::SCALABLE);

        let applier = ScaleApplier::new();

        applier.apply_percentage(store.snapshot(), &mut scene, KindFilter::SCALABLE, 50.0);
        assert_eq!(scale_of(&scene, "A"), Vector3::repeat(1.0));

        // Computed from the (2, 2, 2) baseline, not from (1, 1, 1).
        applier.apply_percentage(store.snapshot(), &mut scene, KindFilter::SCALABLE, 150.0);
        assert_eq!(scale_of(&scene, "A"), Vector3::repeat(3.0));

        let snapshot = store.snapshot();
        for percentage in [0.1, 33.3, 999.0, 1000.0, 12.5] {
            applier.apply_percentage(snapshot, &mut scene, KindFilter::SCALABLE, percentage);
        }
        applier.apply_percentage(store.snapshot(), &mut scene, KindFilter::SCALABLE, 75.0);
        assert_eq!(
            scale_of(&scene, "A"),
            scale_from_baseline(&Vector3::repeat(2.0), 75.0)
        );
    }

    #[test]
    fn test_non_uniform_baseline_and_bounds() {
        let baseline = Vector3::new(1.0, 2.0, 4.0);
        let mut scene = selected_scene(&[("A", EntityKind::Armature, baseline)]);
        let mut store = ReferenceStore::new();
        store.on_selection_changed(&scene, KindFilter::SCALABLE);
        let applier = ScaleApplier::new();

        applier.apply_percentage(store.snapshot(), &mut scene, KindFilter::SCALABLE, 0.1);
        let min = scale_of(&scene, "A");
        assert_eq!(min, baseline * (0.1 / 100.0));
        assert!(min.iter().all(|c| *c > 0.0 && c.is_finite()));

        applier.apply_percentage(store.snapshot(), &mut scene, KindFilter::SCALABLE, 1000.0);
        assert_eq!(scale_of(&scene, "A"), Vector3::new(10.0, 20.0, 40.0));
    }

    #[test]
    fn test_missing_baseline_is_skipped() {
        let mut scene = selected_scene(&[
            ("A", EntityKind::Mesh, Vector3::repeat(2.0)),
            ("B", EntityKind::Mesh, Vector3::repeat(5.0)),
            ("Cam", EntityKind::Camera, Vector3::repeat(1.0)),
        ]);

        // Baselines only for A, as if B appeared before the selection handler ran.
        let a = scene.find_by_name("A").unwrap();
        let b = scene.find_by_name("B").unwrap();
        let cam = scene.find_by_name("Cam").unwrap();
        scene.select(&[a]);
        let snapshot = ReferenceSnapshot::capture(&scene, KindFilter::SCALABLE);
        scene.select(&[a, b, cam]);

        let applier = ScaleApplier::new();
        let outcome = applier.apply_percentage(&snapshot, &mut scene, KindFilter::SCALABLE, 200.0);

        assert_eq!(
            outcome,
            ApplyOutcome::Applied {
                scaled: 1,
                skipped: 1
            }
        );
        assert_eq!(scale_of(&scene, "A"), Vector3::repeat(4.0));
        assert_eq!(scale_of(&scene, "B"), Vector3::repeat(5.0));
        assert_eq!(scale_of(&scene, "Cam"), Vector3::repeat(1.0));
    }

    #[test]
    fn test_recompute_is_requested_once_per_pass() {
        let mut scene = selected_scene(&[
            ("A", EntityKind::Mesh, Vector3::repeat(1.0)),
            ("B", EntityKind::Surface, Vector3::repeat(1.0)),
            ("C", EntityKind::Meta, Vector3::repeat(1.0)),
        ]);
        let snapshot = ReferenceSnapshot::capture(&scene, KindFilter::SCALABLE);
        let applier = ScaleApplier::new();

        applier.apply_percentage(&snapshot, &mut scene, KindFilter::SCALABLE, 120.0);
        assert_eq!(scene.update_requests(), 1);
        applier.apply_percentage(&snapshot, &mut scene, KindFilter::SCALABLE, 80.0);
        assert_eq!(scene.update_requests(), 2);
        assert!(!applier.is_applying());
    }

    /// Host that re-enters the applier from its recompute callback, like a scene-update
    /// notification firing a property-change handler.
    struct ReentrantHost {
        scene: Scene,
        applier: Rc<ScaleApplier>,
        snapshot: Rc<ReferenceSnapshot>,
        nested: Vec<ApplyOutcome>,
        saw_lock: bool,
    }

    impl SceneHost for ReentrantHost {
        fn for_each_selected(&self, func: &mut dyn FnMut(&dyn ScalableEntity)) {
            self.scene.for_each_selected(func)
        }

        fn for_each_selected_mut(&mut self, func: &mut dyn FnMut(&mut dyn ScalableEntity)) {
            self.scene.for_each_selected_mut(func)
        }

        fn request_update(&mut self) {
            self.scene.request_update();
            self.saw_lock = self.applier.is_applying();
            let applier = self.applier.clone();
            let snapshot = self.snapshot.clone();
            let outcome = applier.apply_percentage(&snapshot, self, KindFilter::SCALABLE, 900.0);
            self.nested.push(outcome);
        }
    }

    #[test]
    fn test_reentrant_call_has_no_effect() {
        let scene = selected_scene(&[("A", EntityKind::Mesh, Vector3::repeat(2.0))]);
        let snapshot = Rc::new(ReferenceSnapshot::capture(&scene, KindFilter::SCALABLE));
        let applier = Rc::new(ScaleApplier::new());
        let mut host = ReentrantHost {
            scene,
            applier: applier.clone(),
            snapshot: snapshot.clone(),
            nested: Vec::new(),
            saw_lock: false,
        };

        let outcome = applier.apply_percentage(&snapshot, &mut host, KindFilter::SCALABLE, 50.0);

        assert_eq!(
            outcome,
            ApplyOutcome::Applied {
                scaled: 1,
                skipped: 0
            }
        );
        assert_eq!(host.nested, vec![ApplyOutcome::Reentrant]);
        assert!(host.saw_lock);
        assert_eq!(scale_of(&host.scene, "A"), Vector3::repeat(1.0));
        assert_eq!(host.scene.update_requests(), 1);

        // The lock is released after the outer call.
        assert!(!applier.is_applying());
        assert_eq!(
            snapshot.get(&EntityId::from("A")),
            Some(&Vector3::repeat(2.0))
        );
    }

    struct PanickingHost(Scene);

    impl SceneHost for PanickingHost {
        fn for_each_selected(&self, func: &mut dyn FnMut(&dyn ScalableEntity)) {
            self.0.for_each_selected(func)
        }

        fn for_each_selected_mut(&mut self, func: &mut dyn FnMut(&mut dyn ScalableEntity)) {
            self.0.for_each_selected_mut(func)
        }

        fn request_update(&mut self) {
            panic!("recompute failed");
        }
    }

    #[test]
    fn test_lock_is_released_on_unwind() {
        let scene = selected_scene(&[("A", EntityKind::Mesh, Vector3::repeat(1.0))]);
        let snapshot = ReferenceSnapshot::capture(&scene, KindFilter::SCALABLE);
        let applier = ScaleApplier::new();
        let mut host = PanickingHost(scene);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            applier.apply_percentage(&snapshot, &mut host, KindFilter::SCALABLE, 10.0)
        }));

        assert!(result.is_err());
        assert!(!applier.is_applying());
    }
}
