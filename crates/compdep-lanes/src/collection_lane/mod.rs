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

//! Flattening of a composite type into its component set.

use compdep_core::class::{ClassId, TypeRegistry};
use compdep_core::construction::{
    ComponentOrigin, ComponentSet, ComponentView, ConstructionGraphStore,
};
use compdep_core::lane::{Lane, LaneKind};

/// Collects every component that instances of a composite type will carry.
///
/// The ancestor chain is walked from the most-derived class to the root. For
/// each class, three layers are gathered in order:
///
/// 1. the components of the class's default instance,
/// 2. the nodes of its construction graph, each realized through the nearest
///    override held by the collected class or one of its ancestors,
/// 3. the override templates it holds for nodes of its ancestors.
///
/// A stable name is only taken the first time it is seen, so the
/// most-derived version of a component always wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComponentCollectionLane;

impl ComponentCollectionLane {
    /// Creates the lane.
    pub fn new() -> Self {
        Self
    }

    /// Flattens `class` into its component set. An unknown class yields an
    /// empty set.
    pub fn collect<'a, R, S>(
        &self,
        registry: &'a R,
        store: &'a S,
        class: &'a ClassId,
    ) -> ComponentSet<'a>
    where
        R: TypeRegistry + ?Sized,
        S: ConstructionGraphStore + ?Sized,
    {
        let mut set = ComponentSet::new(class);
        if registry.class(class).is_none() {
            log::warn!("ComponentCollectionLane: '{class}' is not a registered class");
            return set;
        }

        for info in registry.ancestors(class) {
            if let Some(default_object) = registry.default_object(&info.id) {
                for node in default_object.components {
                    set.insert(ComponentView {
                        template: &node.template,
                        attach_parent: node.parent.as_deref(),
                        origin: ComponentOrigin::Native,
                        declared_by: &info.id,
                    });
                }
            }

            if let Some(nodes) = store.construction_nodes(&info.id) {
                for node in nodes {
                    set.insert(ComponentView {
                        template: store.actual_template(class, &info.id, node),
                        attach_parent: node.parent.as_deref(),
                        origin: ComponentOrigin::Construction,
                        declared_by: &info.id,
                    });
                }
            }

            for record in store.inherited_overrides(&info.id) {
                let attach_parent = match store.find_node(&record.owner, &record.template.name) {
                    Some(node) => node.parent.as_deref(),
                    None => {
                        log::warn!(
                            "ComponentCollectionLane: '{}' overrides '{}' which '{}' no longer declares",
                            info.id,
                            record.template.name,
                            record.owner
                        );
                        None
                    }
                };
                set.insert(ComponentView {
                    template: &record.template,
                    attach_parent,
                    origin: ComponentOrigin::InheritedOverride,
                    declared_by: &info.id,
                });
            }
        }

        log::trace!(
            "ComponentCollectionLane: '{class}' flattened into {} components",
            set.len()
        );
        set
    }
}

impl Lane for ComponentCollectionLane {
    fn strategy_name(&self) -> &'static str {
        "MostDerivedFirst"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compdep_core::class::ClassInfo;
    use compdep_core::construction::{ComponentTemplate, ConstructionNode, InheritedOverride};
    use compdep_data::{BlueprintClass, BlueprintLibrary, ClassRegistry};

    fn node(name: &str, class: &str) -> ConstructionNode {
        ConstructionNode::new(ComponentTemplate::new(name, class))
    }

    /// BP_Base_C (Character) declares a hitbox; BP_Mid_C retags it; BP_Leaf_C
    /// retags it again and adds a weapon under the inherited mesh.
    fn fixture() -> (ClassRegistry, BlueprintLibrary) {
        let mut registry = ClassRegistry::with_native_classes().unwrap();
        registry
            .register_all(vec![
                ClassInfo::blueprint("BP_Base_C", "Character"),
                ClassInfo::blueprint("BP_Mid_C", "BP_Base_C"),
                ClassInfo::blueprint("BP_Leaf_C", "BP_Mid_C"),
            ])
            .unwrap();

        let mut store = BlueprintLibrary::new();
        store.insert(
            BlueprintClass::new("BP_Base_C", "Character")
                .with_node(node("Hitbox", "CapsuleComponent").attached_to("CollisionCylinder")),
        );
        store.insert(BlueprintClass::new("BP_Mid_C", "BP_Base_C").with_override(
            InheritedOverride {
                owner: "BP_Base_C".into(),
                template: ComponentTemplate::new("Hitbox", "CapsuleComponent").with_tag("mid"),
            },
        ));
        store.insert(
            BlueprintClass::new("BP_Leaf_C", "BP_Mid_C")
                .with_node(node("Weapon", "StaticMeshComponent").attached_to("CharacterMesh0"))
                .with_override(InheritedOverride {
                    owner: "BP_Base_C".into(),
                    template: ComponentTemplate::new("Hitbox", "CapsuleComponent").with_tag("leaf"),
                }),
        );
        (registry, store)
    }

    #[test]
    fn test_names_are_unique_and_most_derived_wins() {
        let (registry, store) = fixture();
        let lane = ComponentCollectionLane::new();
        let class = ClassId::from("BP_Leaf_C");

        let set = lane.collect(&registry, &store, &class);

        // Four native components, the hitbox and the weapon.
        assert_eq!(set.len(), 6);
        let hitbox = set.get("Hitbox").expect("hitbox is collected");
        assert_eq!(hitbox.template.tags, vec!["leaf".to_string()]);
        assert_eq!(hitbox.origin, ComponentOrigin::InheritedOverride);
        assert_eq!(hitbox.attach_parent, Some("CollisionCylinder"));
        assert_eq!(hitbox.declared_by.as_str(), "BP_Leaf_C");
    }

    #[test]
    fn test_intermediate_override_applies_to_its_subtree() {
        let (registry, store) = fixture();
        let lane = ComponentCollectionLane::new();

        let mid = ClassId::from("BP_Mid_C");
        let set = lane.collect(&registry, &store, &mid);
        assert_eq!(set.get("Hitbox").unwrap().template.tags, vec!["mid".to_string()]);

        let base = ClassId::from("BP_Base_C");
        let set = lane.collect(&registry, &store, &base);
        let hitbox = set.get("Hitbox").unwrap();
        assert!(hitbox.template.tags.is_empty());
        assert_eq!(hitbox.origin, ComponentOrigin::Construction);
        assert!(!set.contains("Weapon"));
    }

    #[test]
    fn test_native_components_are_included_with_their_tree() {
        let (registry, store) = fixture();
        let class = ClassId::from("BP_Leaf_C");

        let set = ComponentCollectionLane.collect(&registry, &store, &class);

        let mesh = set.get("CharacterMesh0").expect("native mesh");
        assert_eq!(mesh.origin, ComponentOrigin::Native);
        assert!(set.is_descendant_of("Weapon", "CollisionCylinder"));
    }

    #[test]
    fn test_empty_and_unknown_types_yield_empty_sets() {
        let (mut registry, store) = fixture();
        registry
            .register(ClassInfo::blueprint("BP_Empty_C", "Actor"))
            .unwrap();
        let empty = ClassId::from("BP_Empty_C");
        let unknown = ClassId::from("BP_Nowhere_C");

        assert!(ComponentCollectionLane.collect(&registry, &store, &empty).is_empty());
        assert!(ComponentCollectionLane.collect(&registry, &store, &unknown).is_empty());
    }

    #[test]
    fn test_stale_override_is_kept_without_parent() {
        let (registry, mut store) = fixture();
        store.insert(BlueprintClass::new("BP_Mid_C", "BP_Base_C").with_override(
            InheritedOverride {
                owner: "BP_Base_C".into(),
                template: ComponentTemplate::new("Removed", "ArrowComponent"),
            },
        ));
        let class = ClassId::from("BP_Mid_C");

        let set = ComponentCollectionLane.collect(&registry, &store, &class);

        let removed = set.get("Removed").expect("override is still collected");
        assert_eq!(removed.attach_parent, None);
    }
}
