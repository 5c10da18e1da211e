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


//! The tool context that owns all scaling state and exposes the entry points a host adapter wires
//! to its notifications.

use crate::{
    applier::{ApplyOutcome, ScaleApplier},
    host::SceneHost,
    percentage::{PercentageProperty, PropertyDescriptor},
    reference::{ReferenceStore, SelectionChange},
    settings::{ScaleSettings, SettingsError},
};

/// Owns baselines, the percentage value and the re-entrancy lock of one scaling tool instance.
///
/// Wiring:
/// - the host's "scene changed" notification calls [`Self::on_selection_changed`],
/// - the percentage control's change callback calls [`Self::set_percentage`] (or
///   [`Self::apply_percentage`] when the host stores the value itself).
#[derive(Debug)]
pub struct HomotheticScale {
    settings: ScaleSettings,
    references: ReferenceStore,
    percentage: PercentageProperty,
    applier: ScaleApplier,
}

impl Default for HomotheticScale {
    fn default() -> Self {
        // Default settings always pass validation.
        Self::with_valid_settings(ScaleSettings::default())
    }
}

impl HomotheticScale {
    /// Creates a tool instance. Fails if `settings` do not pass [`ScaleSettings::validate`].
    ///
    /// Log verbosity from `settings` is not applied here, the log is shared by every instance; see
    /// [`ScaleSettings::apply_log_verbosity`].
    pub fn new(settings: ScaleSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::with_valid_settings(settings))
    }

    fn with_valid_settings(settings: ScaleSettings) -> Self {
        Self {
            percentage: PercentageProperty::new(PropertyDescriptor::from(&settings.percentage)),
            references: ReferenceStore::new(),
            applier: ScaleApplier::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &ScaleSettings {
        &self.settings
    }

    pub fn references(&self) -> &ReferenceStore {
        &self.references
    }

    pub fn percentage(&self) -> &PercentageProperty {
        &self.percentage
    }

    pub fn is_applying(&self) -> bool {
        self.applier.is_applying()
    }

    /// Re-baselines if selection membership changed and resets the percentage to its default in
    /// that case. The reset does not write any scale: at the default value every entity already
    /// sits at its fresh baseline.
    pub fn on_selection_changed(&mut self, host: &dyn SceneHost) -> SelectionChange {
        let change = self
            .references
            .on_selection_changed(host, self.settings.allowed_kinds);

        if change.is_rebaselined() {
            self.percentage.reset();
        }

        change
    }

    /// Scales every tracked entity to `percentage` of its baseline. `percentage` is used as is, it
    /// is expected to come from the percentage control.
    pub fn apply_percentage(&self, host: &mut dyn SceneHost, percentage: f32) -> ApplyOutcome {
        self.applier.apply_percentage(
            self.references.snapshot(),
            host,
            self.settings.allowed_kinds,
            percentage,
        )
    }

    /// Stores a new percentage value (clamped into the control range) and applies it if the stored
    /// value actually changed. Returns `None` when the value stayed the same.
    pub fn set_percentage(&mut self, host: &mut dyn SceneHost, value: f32) -> Option<ApplyOutcome> {
        if self.percentage.set(value) {
            Some(self.apply_percentage(host, self.percentage.value()))
        } else {
            None
        }
    }

    /// Forgets every baseline and resets the percentage. Current scales are left as they are, which
    /// commits them.
    pub fn detach(&mut self) {
        self.references.clear();
        self.percentage.reset();
    }
}

#[cfg(test)]
mod test {
    use crate::{
        applier::ApplyOutcome,
        controller::HomotheticScale,
        entity::{EntityId, EntityKind, KindFilter, ScalableEntity},
        log::{Log, MessageKind},
        reference::SelectionChange,
        scene::{Scene, SceneObject},
        settings::{ScaleSettings, SettingsError},
    };
    use nalgebra::Vector3;

    fn object(name: &str, kind: EntityKind, scale: Vector3<f32>) -> SceneObject {
        SceneObject::new(name, kind).with_scale(scale)
    }

    #[test]
    fn test_example_workflow() {
        let mut scene = Scene::new();
        let a = scene.add(object("A", EntityKind::Mesh, Vector3::repeat(2.0)));
        let b = scene.add(object("B", EntityKind::Mesh, Vector3::repeat(1.0)));

        let mut tool = HomotheticScale::default();

        scene.select(&[a]);
        assert!(tool.on_selection_changed(&scene).is_rebaselined());
        assert_eq!(
            tool.references().snapshot().get(&EntityId::from("A")),
            Some(&Vector3::repeat(2.0))
        );

        tool.set_percentage(&mut scene, 50.0);
        assert_eq!(scene[a].scale(), Vector3::repeat(1.0));

        tool.set_percentage(&mut scene, 150.0);
        assert_eq!(scene[a].scale(), Vector3::repeat(3.0));
        assert_eq!(tool.percentage().value(), 150.0);

        // Depsgraph-like notification after the writes: membership is the same.
        assert_eq!(tool.on_selection_changed(&scene), SelectionChange::Unchanged);
        assert_eq!(tool.percentage().value(), 150.0);

        scene.select(&[b]);
        assert_eq!(
            tool.on_selection_changed(&scene),
            SelectionChange::Rebaselined {
                added: 1,
                removed: 1
            }
        );
        let snapshot = tool.references().snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(&EntityId::from("B")), Some(&Vector3::repeat(1.0)));
        assert_eq!(tool.percentage().value(), 100.0);

        // A keeps its last scale once deselected.
        assert_eq!(scene[a].scale(), Vector3::repeat(3.0));
    }

    #[test]
    fn test_reset_makes_default_a_no_op() {
        let mut scene = Scene::new();
        let a = scene.add(object("A", EntityKind::Curve, Vector3::repeat(2.0)));
        let b = scene.add(object("B", EntityKind::Text, Vector3::new(1.0, 2.0, 3.0)));

        let mut tool = HomotheticScale::default();
        scene.select(&[a]);
        tool.on_selection_changed(&scene);
        tool.set_percentage(&mut scene, 300.0);
        assert_eq!(scene[a].scale(), Vector3::repeat(6.0));

        scene.select(&[a, b]);
        tool.on_selection_changed(&scene);
        assert_eq!(tool.percentage().value(), 100.0);

        tool.apply_percentage(&mut scene, 100.0);
        assert_eq!(scene[a].scale(), Vector3::repeat(6.0));
        assert_eq!(scene[b].scale(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_repeated_notifications_keep_percentage() {
        let mut scene = Scene::new();
        let a = scene.add(SceneObject::new("A", EntityKind::Mesh));
        let mut tool = HomotheticScale::default();
        scene.select(&[a]);
        tool.on_selection_changed(&scene);
        tool.set_percentage(&mut scene, 42.0);

        let snapshot = tool.references().snapshot().clone();
        for _ in 0..5 {
            assert_eq!(tool.on_selection_changed(&scene), SelectionChange::Unchanged);
        }
        assert_eq!(tool.references().snapshot(), &snapshot);
        assert_eq!(tool.percentage().value(), 42.0);
    }

    #[test]
    fn test_set_percentage_clamps_and_skips_unchanged() {
        let mut scene = Scene::new();
        let a = scene.add(object("A", EntityKind::Mesh, Vector3::repeat(10.0)));
        let mut tool = HomotheticScale::default();
        scene.select(&[a]);
        tool.on_selection_changed(&scene);

        assert_eq!(tool.set_percentage(&mut scene, 100.0), None);
        assert_eq!(scene.update_requests(), 0);

        assert_eq!(
            tool.set_percentage(&mut scene, 0.0),
            Some(ApplyOutcome::Applied {
                scaled: 1,
                skipped: 0
            })
        );
        assert_eq!(tool.percentage().value(), 0.1);
        assert_eq!(scene[a].scale(), Vector3::repeat(10.0) * (0.1 / 100.0));

        tool.set_percentage(&mut scene, 1.0e6);
        assert_eq!(tool.percentage().value(), 1000.0);
        assert_eq!(scene[a].scale(), Vector3::repeat(100.0));
        assert!(!tool.is_applying());
    }

    #[test]
    fn test_custom_allowed_kinds() {
        let mut scene = Scene::new();
        let mesh = scene.add(SceneObject::new("Mesh", EntityKind::Mesh));
        let empty = scene.add(SceneObject::new("Empty", EntityKind::Empty));

        let settings = ScaleSettings {
            allowed_kinds: KindFilter::EMPTY,
            ..Default::default()
        };
        let mut tool = HomotheticScale::new(settings).unwrap();
        scene.select(&[mesh, empty]);
        tool.on_selection_changed(&scene);

        tool.set_percentage(&mut scene, 200.0);
        assert_eq!(scene[mesh].scale(), Vector3::repeat(1.0));
        assert_eq!(scene[empty].scale(), Vector3::repeat(2.0));
    }

    #[test]
    fn test_independent_instances() {
        let mut first_scene = Scene::new();
        let a = first_scene.add(object("A", EntityKind::Mesh, Vector3::repeat(4.0)));
        let mut second_scene = Scene::new();
        let b = second_scene.add(object("A", EntityKind::Mesh, Vector3::repeat(8.0)));

        let mut first = HomotheticScale::default();
        let mut second = HomotheticScale::default();

        first_scene.select(&[a]);
        second_scene.select(&[b]);
        first.on_selection_changed(&first_scene);
        second.on_selection_changed(&second_scene);

        first.set_percentage(&mut first_scene, 25.0);
        assert_eq!(first_scene[a].scale(), Vector3::repeat(1.0));
        assert_eq!(second_scene[b].scale(), Vector3::repeat(8.0));
        assert_eq!(second.percentage().value(), 100.0);
    }

    #[test]
    fn test_detach_commits_current_scale() {
        let mut scene = Scene::new();
        let a = scene.add(object("A", EntityKind::Mesh, Vector3::repeat(2.0)));
        let mut tool = HomotheticScale::default();
        scene.select(&[a]);
        tool.on_selection_changed(&scene);
        tool.set_percentage(&mut scene, 50.0);

        tool.detach();
        assert!(tool.references().snapshot().is_empty());
        assert_eq!(tool.percentage().value(), 100.0);
        assert_eq!(scene[a].scale(), Vector3::repeat(1.0));

        // The next notification captures the committed scale as the new baseline.
        tool.on_selection_changed(&scene);
        assert_eq!(
            tool.references().snapshot().get(&EntityId::from("A")),
            Some(&Vector3::repeat(1.0))
        );
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let mut settings = ScaleSettings::default();
        settings.percentage.min = 500.0;
        settings.percentage.max = 10.0;

        assert!(matches!(
            HomotheticScale::new(settings),
            Err(SettingsError::Invalid(_))
        ));

        let mut settings = ScaleSettings::default();
        settings.percentage.min = 0.0;
        assert!(HomotheticScale::new(settings).is_err());

        let mut settings = ScaleSettings::default();
        settings.percentage.default = f32::NAN;
        assert!(HomotheticScale::new(settings).is_err());
    }

    #[test]
    fn test_construction_leaves_log_verbosity_alone() {
        let before = Log::verbosity();
        let settings = ScaleSettings {
            verbosity: MessageKind::Error,
            ..Default::default()
        };

        let _first = HomotheticScale::new(settings.clone()).unwrap();
        let _second = HomotheticScale::new(settings).unwrap();

        assert_eq!(Log::verbosity(), before);
    }
}
