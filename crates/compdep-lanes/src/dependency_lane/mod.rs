// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Evaluation of a single dependency descriptor.

use compdep_core::class::{builtin, ClassId, TypeRegistry};
use compdep_core::construction::ComponentSet;
use compdep_core::dependency::{status, ComponentDependency, DependencyPosition, FulfillmentResult};
use compdep_core::lane::{Lane, LaneKind};

/// The component whose dependency is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceComponent<'a> {
    /// Stable name of the component within its composite type.
    pub name: &'a str,
    /// Concrete class of the component.
    pub class: &'a ClassId,
}

impl<'a> SourceComponent<'a> {
    /// Describes the source component.
    pub fn new(name: &'a str, class: &'a ClassId) -> Self {
        Self { name, class }
    }
}

/// Checks dependency descriptors against a flattened component set.
#[derive(Debug, Default, Clone, Copy)]
pub struct DependencyCheckLane;

impl DependencyCheckLane {
    /// Creates the lane.
    pub fn new() -> Self {
        Self
    }

    /// Evaluates `dependency` for `source`.
    ///
    /// `components` is the flattened set of the composite type being edited,
    /// or `None` when the source is not edited inside one. An unfulfilled
    /// optional dependency keeps `is_fulfilled == false` but reports
    /// [`status::NOT_PRESENT_OPTIONAL`].
    pub fn check<R: TypeRegistry + ?Sized>(
        &self,
        registry: &R,
        source: SourceComponent<'_>,
        dependency: &ComponentDependency,
        components: Option<&ComponentSet<'_>>,
    ) -> FulfillmentResult {
        let mut result = self.evaluate(registry, source, dependency, components);
        if dependency.is_optional() && !result.is_fulfilled {
            result.status = status::NOT_PRESENT_OPTIONAL.to_owned();
        }
        result
    }

    /// Evaluates `dependency` for `source` without the optional relabeling.
    pub fn evaluate<R: TypeRegistry + ?Sized>(
        &self,
        registry: &R,
        source: SourceComponent<'_>,
        dependency: &ComponentDependency,
        components: Option<&ComponentSet<'_>>,
    ) -> FulfillmentResult {
        let Some(target) = dependency.target.as_ref() else {
            return FulfillmentResult::hidden(status::NO_CLASS_GIVEN);
        };
        let Some(components) = components else {
            return FulfillmentResult::hidden(status::NO_OWNER);
        };

        let scene_component = ClassId::from(builtin::SCENE_COMPONENT);
        let is_spatial = registry.is_child_of(source.class, &scene_component);
        if is_spatial && !components.contains(source.name) {
            return FulfillmentResult::unfulfilled(status::SOURCE_NOT_FOUND);
        }
        if dependency.position.needs_tree() && !is_spatial {
            return FulfillmentResult::unfulfilled(status::CHILD_ON_ACTOR_COMPONENT);
        }

        let checker = Checker {
            registry,
            components,
            source: source.name,
            target,
            tag: &dependency.tag,
        };
        match dependency.position {
            DependencyPosition::AnyOnActor => checker.any_on_actor(),
            DependencyPosition::AnyOnActorWithTag => checker.any_on_actor_with_tag(),
            DependencyPosition::Child => checker.child(),
            DependencyPosition::ChildWithTag => checker.child_with_tag(),
        }
    }
}

impl Lane for DependencyCheckLane {
    fn strategy_name(&self) -> &'static str {
        "PositionalTag"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Evaluation
    }
}

/// One evaluation pass over a component set.
struct Checker<'c, 's, R: ?Sized> {
    registry: &'c R,
    components: &'c ComponentSet<'s>,
    source: &'c str,
    target: &'c ClassId,
    tag: &'c str,
}

impl<R: TypeRegistry + ?Sized> Checker<'_, '_, R> {
    fn is_target(&self, class: &ClassId) -> bool {
        self.registry.is_child_of(class, self.target)
    }

    fn is_below_source(&self, name: &str) -> bool {
        self.components.is_descendant_of(name, self.source)
    }

    fn any_on_actor(&self) -> FulfillmentResult {
        if self.components.iter().any(|view| self.is_target(view.class())) {
            FulfillmentResult::fulfilled(status::PRESENT)
        } else {
            FulfillmentResult::unfulfilled(status::NOT_PRESENT)
        }
    }

    fn any_on_actor_with_tag(&self) -> FulfillmentResult {
        let mut any_type = false;
        let mut any_tag = false;
        for view in self.components {
            let is_type = self.is_target(view.class());
            let has_tag = view.template.has_tag(self.tag);
            if is_type && has_tag {
                return FulfillmentResult::fulfilled(status::PRESENT_WITH_TAG);
            }
            any_type |= is_type;
            any_tag |= has_tag;
        }

        if any_type {
            FulfillmentResult::unfulfilled(status::CORRECT_TYPE_WRONG_TAG)
        } else if any_tag {
            FulfillmentResult::unfulfilled(status::WRONG_TYPE_CORRECT_TAG)
        } else {
            FulfillmentResult::unfulfilled(status::NOT_PRESENT)
        }
    }

    fn child(&self) -> FulfillmentResult {
        let mut any_type = false;
        for view in self.components {
            if !self.is_target(view.class()) {
                continue;
            }
            if self.is_below_source(view.name()) {
                return FulfillmentResult::fulfilled(status::PRESENT_AS_CHILD);
            }
            any_type = true;
        }

        if any_type {
            FulfillmentResult::unfulfilled(status::EXISTS_NOT_AS_CHILD)
        } else {
            FulfillmentResult::unfulfilled(status::NOT_PRESENT)
        }
    }

    fn child_with_tag(&self) -> FulfillmentResult {
        let mut tagged_elsewhere = false;
        let mut untagged_child = false;
        for view in self.components {
            if !self.is_target(view.class()) {
                continue;
            }
            let has_tag = view.template.has_tag(self.tag);
            let is_child = self.is_below_source(view.name());
            if has_tag && is_child {
                return FulfillmentResult::fulfilled(status::PRESENT_AS_CHILD);
            }
            tagged_elsewhere |= has_tag;
            untagged_child |= is_child;
        }

        if tagged_elsewhere {
            FulfillmentResult::unfulfilled(status::TAGGED_EXISTS_NOT_AS_CHILD)
        } else if untagged_child {
            FulfillmentResult::unfulfilled(status::CHILD_EXISTS_WRONG_TAG)
        } else {
            FulfillmentResult::unfulfilled(status::NOT_PRESENT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComponentCollectionLane;
    use compdep_core::class::ClassInfo;
    use compdep_core::construction::{ComponentTemplate, ConstructionNode};
    use compdep_data::{BlueprintClass, BlueprintLibrary, ClassRegistry};

    const HOST: &str = "BP_Host_C";

    struct Fixture {
        registry: ClassRegistry,
        store: BlueprintLibrary,
        host: ClassId,
    }

    impl Fixture {
        /// A Character blueprint with a `Socket` scene component under the
        /// mesh and the given extra nodes.
        fn new(nodes: Vec<ConstructionNode>) -> Self {
            let mut registry = ClassRegistry::with_native_classes().unwrap();
            registry
                .register_all(vec![
                    ClassInfo::native("SocketComponent", Some(builtin::SCENE_COMPONENT)),
                    ClassInfo::native("StatsComponent", Some(builtin::ACTOR_COMPONENT)),
                    ClassInfo::blueprint(HOST, "Character"),
                ])
                .unwrap();

            let mut blueprint = BlueprintClass::new(HOST, "Character").with_node(
                ConstructionNode::new(ComponentTemplate::new("Socket", "SocketComponent"))
                    .attached_to("CharacterMesh0"),
            );
            for node in nodes {
                blueprint = blueprint.with_node(node);
            }
            let mut store = BlueprintLibrary::new();
            store.insert(blueprint);

            Self {
                registry,
                store,
                host: ClassId::from(HOST),
            }
        }

        fn check(
            &self,
            source: &str,
            source_class: &str,
            dependency: &ComponentDependency,
        ) -> FulfillmentResult {
            let set = ComponentCollectionLane.collect(&self.registry, &self.store, &self.host);
            let class = ClassId::from(source_class);
            DependencyCheckLane.check(
                &self.registry,
                SourceComponent::new(source, &class),
                dependency,
                Some(&set),
            )
        }
    }

    fn mesh(name: &str, parent: &str, tag: Option<&str>) -> ConstructionNode {
        let mut template = ComponentTemplate::new(name, "StaticMeshComponent");
        if let Some(tag) = tag {
            template = template.with_tag(tag);
        }
        ConstructionNode::new(template).attached_to(parent)
    }

    #[test]
    fn test_null_target_is_hidden() {
        let fixture = Fixture::new(Vec::new());
        let mut dependency = ComponentDependency::any_on_actor("Object");
        dependency.target = None;

        let result = fixture.check("Socket", "SocketComponent", &dependency);

        assert_eq!(result, FulfillmentResult::hidden(status::NO_CLASS_GIVEN));
    }

    #[test]
    fn test_missing_owner_is_hidden() {
        let fixture = Fixture::new(Vec::new());
        let class = ClassId::from("SocketComponent");

        let result = DependencyCheckLane.check(
            &fixture.registry,
            SourceComponent::new("Socket", &class),
            &ComponentDependency::any_on_actor("ArrowComponent"),
            None,
        );

        assert!(!result.is_displayable);
        assert_eq!(result.status, status::NO_OWNER);
    }

    #[test]
    fn test_any_on_actor_matches_subtypes() {
        let fixture = Fixture::new(Vec::new());

        // CollisionCylinder is a CapsuleComponent, a PrimitiveComponent subtype.
        let present = fixture.check(
            "Socket",
            "SocketComponent",
            &ComponentDependency::any_on_actor("PrimitiveComponent"),
        );
        assert_eq!(present, FulfillmentResult::fulfilled(status::PRESENT));

        let missing = fixture.check(
            "Socket",
            "SocketComponent",
            &ComponentDependency::any_on_actor("StaticMeshComponent"),
        );
        assert_eq!(missing, FulfillmentResult::unfulfilled(status::NOT_PRESENT));
    }

    #[test]
    fn test_any_on_actor_with_tag_has_four_outcomes() {
        let dependency = ComponentDependency::any_on_actor_with_tag("StaticMeshComponent", "Gold");

        let both = Fixture::new(vec![mesh("Coin", "Socket", Some("gold"))]);
        assert_eq!(
            both.check("Socket", "SocketComponent", &dependency).status,
            status::PRESENT_WITH_TAG
        );

        let type_only = Fixture::new(vec![mesh("Coin", "Socket", Some("silver"))]);
        assert_eq!(
            type_only.check("Socket", "SocketComponent", &dependency).status,
            status::CORRECT_TYPE_WRONG_TAG
        );

        let tag_only = Fixture::new(vec![ConstructionNode::new(
            ComponentTemplate::new("Marker", "ArrowComponent").with_tag("GOLD"),
        )]);
        assert_eq!(
            tag_only.check("Socket", "SocketComponent", &dependency).status,
            status::WRONG_TYPE_CORRECT_TAG
        );

        let neither = Fixture::new(Vec::new());
        let result = neither.check("Socket", "SocketComponent", &dependency);
        assert_eq!(result.status, status::NOT_PRESENT);
        assert!(!result.is_fulfilled);
    }

    #[test]
    fn test_empty_tag_never_matches() {
        let fixture = Fixture::new(vec![mesh("Coin", "Socket", Some("gold"))]);
        let dependency = ComponentDependency::any_on_actor_with_tag("StaticMeshComponent", "");

        let result = fixture.check("Socket", "SocketComponent", &dependency);

        assert_eq!(result.status, status::CORRECT_TYPE_WRONG_TAG);
    }

    #[test]
    fn test_child_means_any_descendant() {
        // Gem sits two levels below Socket, not directly under it.
        let fixture = Fixture::new(vec![
            ConstructionNode::new(ComponentTemplate::new("Mount", "SocketComponent"))
                .attached_to("Socket"),
            mesh("Gem", "Mount", None),
        ]);

        let result = fixture.check(
            "Socket",
            "SocketComponent",
            &ComponentDependency::child("StaticMeshComponent"),
        );

        assert_eq!(result, FulfillmentResult::fulfilled(status::PRESENT_AS_CHILD));
    }

    #[test]
    fn test_child_distinguishes_elsewhere_from_absent() {
        let elsewhere = Fixture::new(vec![mesh("Gem", "CollisionCylinder", None)]);
        let dependency = ComponentDependency::child("StaticMeshComponent");
        assert_eq!(
            elsewhere.check("Socket", "SocketComponent", &dependency).status,
            status::EXISTS_NOT_AS_CHILD
        );

        let absent = Fixture::new(Vec::new());
        assert_eq!(
            absent.check("Socket", "SocketComponent", &dependency).status,
            status::NOT_PRESENT
        );
    }

    #[test]
    fn test_component_is_not_its_own_child() {
        let fixture = Fixture::new(Vec::new());

        let result = fixture.check(
            "Socket",
            "SocketComponent",
            &ComponentDependency::child("SocketComponent"),
        );

        assert_eq!(result.status, status::EXISTS_NOT_AS_CHILD);
    }

    #[test]
    fn test_child_may_be_below_native_component() {
        let fixture = Fixture::new(Vec::new());

        // Socket hangs below the native CharacterMesh0.
        let result = fixture.check(
            "CharacterMesh0",
            "SkeletalMeshComponent",
            &ComponentDependency::child("SocketComponent"),
        );

        assert!(result.is_fulfilled);
    }

    #[test]
    fn test_child_with_tag_outcomes() {
        let dependency = ComponentDependency::child_with_tag("StaticMeshComponent", "gem");

        let present = Fixture::new(vec![mesh("Gem", "Socket", Some("Gem"))]);
        assert_eq!(
            present.check("Socket", "SocketComponent", &dependency).status,
            status::PRESENT_AS_CHILD
        );

        let elsewhere = Fixture::new(vec![mesh("Gem", "CollisionCylinder", Some("gem"))]);
        assert_eq!(
            elsewhere.check("Socket", "SocketComponent", &dependency).status,
            status::TAGGED_EXISTS_NOT_AS_CHILD
        );

        let wrong_tag = Fixture::new(vec![mesh("Gem", "Socket", Some("glass"))]);
        assert_eq!(
            wrong_tag.check("Socket", "SocketComponent", &dependency).status,
            status::CHILD_EXISTS_WRONG_TAG
        );

        let absent = Fixture::new(vec![mesh("Gem", "CollisionCylinder", None)]);
        assert_eq!(
            absent.check("Socket", "SocketComponent", &dependency).status,
            status::NOT_PRESENT
        );
    }

    #[test]
    fn test_child_on_actor_component_is_rejected_regardless_of_contents() {
        let fixture = Fixture::new(vec![
            ConstructionNode::new(ComponentTemplate::new("Stats", "StatsComponent")),
            mesh("Gem", "Socket", Some("gem")),
        ]);

        for dependency in [
            ComponentDependency::child("StaticMeshComponent"),
            ComponentDependency::child_with_tag("StaticMeshComponent", "gem"),
        ] {
            let result = fixture.check("Stats", "StatsComponent", &dependency);
            assert_eq!(
                result,
                FulfillmentResult::unfulfilled(status::CHILD_ON_ACTOR_COMPONENT)
            );
        }
    }

    #[test]
    fn test_spatial_source_outside_set_is_reported() {
        let fixture = Fixture::new(Vec::new());

        let result = fixture.check(
            "Ghost",
            "SocketComponent",
            &ComponentDependency::any_on_actor("ArrowComponent"),
        );

        assert_eq!(result, FulfillmentResult::unfulfilled(status::SOURCE_NOT_FOUND));
    }

    #[test]
    fn test_optional_relabels_status_but_keeps_verdict() {
        let fixture = Fixture::new(Vec::new());
        let required = ComponentDependency::any_on_actor("StaticMeshComponent");
        let optional = required.clone().optional();

        let required_result = fixture.check("Socket", "SocketComponent", &required);
        let optional_result = fixture.check("Socket", "SocketComponent", &optional);

        assert!(!optional_result.is_fulfilled);
        assert!(optional_result.is_displayable);
        assert_eq!(optional_result.status, status::NOT_PRESENT_OPTIONAL);
        assert_ne!(optional_result.status, required_result.status);

        // A fulfilled optional keeps its status.
        let present = fixture.check(
            "Socket",
            "SocketComponent",
            &ComponentDependency::any_on_actor("ArrowComponent").optional(),
        );
        assert_eq!(present.status, status::PRESENT);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let fixture = Fixture::new(vec![mesh("Gem", "Socket", Some("gem"))]);
        let dependency = ComponentDependency::child_with_tag("PrimitiveComponent", "gem");

        let first = fixture.check("Socket", "SocketComponent", &dependency);
        let second = fixture.check("Socket", "SocketComponent", &dependency);

        assert_eq!(first, second);
    }
}
