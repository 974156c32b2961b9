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

use ahash::AHashMap;
use serde::Serialize;

use super::ComponentTemplate;
use crate::class::ClassId;

/// Which layer of a composite type a component was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComponentOrigin {
    /// A component of the class's default instance.
    Native,
    /// A node of a construction graph.
    Construction,
    /// An override template for a node declared by an ancestor.
    InheritedOverride,
}

/// A read-only view of one component, borrowed from the registry or store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentView<'a> {
    /// The realized template.
    pub template: &'a ComponentTemplate,
    /// Stable name of the scene parent, if any.
    pub attach_parent: Option<&'a str>,
    /// The layer the view came from.
    pub origin: ComponentOrigin,
    /// The class in the chain that contributed the view.
    pub declared_by: &'a ClassId,
}

impl<'a> ComponentView<'a> {
    /// The component's stable name.
    pub fn name(&self) -> &'a str {
        &self.template.name
    }

    /// The component's concrete class.
    pub fn class(&self) -> &'a ClassId {
        &self.template.class
    }
}

/// The flattened, deduplicated components of one composite type.
///
/// Each stable name appears at most once: the first view inserted under a
/// name is kept and later ones are discarded. Views borrow from their
/// sources and live for one resolution pass.
#[derive(Debug, Clone)]
pub struct ComponentSet<'a> {
    owner: &'a ClassId,
    views: Vec<ComponentView<'a>>,
    index: AHashMap<&'a str, usize>,
}

impl<'a> ComponentSet<'a> {
    /// An empty set for `owner`.
    pub fn new(owner: &'a ClassId) -> Self {
        Self {
            owner,
            views: Vec::new(),
            index: AHashMap::new(),
        }
    }

    /// The composite type the set was collected for.
    pub fn owner(&self) -> &'a ClassId {
        self.owner
    }

    /// Adds `view` unless its name is already present. Returns whether it was added.
    pub fn insert(&mut self, view: ComponentView<'a>) -> bool {
        if self.index.contains_key(view.name()) {
            return false;
        }
        self.index.insert(view.name(), self.views.len());
        self.views.push(view);
        true
    }

    /// Looks a component up by stable name.
    pub fn get(&self, name: &str) -> Option<&ComponentView<'a>> {
        self.index.get(name).map(|&slot| &self.views[slot])
    }

    /// Whether a component with that name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Views in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentView<'a>> {
        self.views.iter()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Whether `name` sits anywhere below `ancestor` in the scene graph.
    /// A component is not its own descendant.
    pub fn is_descendant_of(&self, name: &str, ancestor: &str) -> bool {
        let mut current = self.get(name).and_then(|view| view.attach_parent);
        // The parent relation is a forest; the bound only stops malformed input.
        let mut remaining = self.views.len();
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            if remaining == 0 {
                log::warn!("ComponentSet: parent chain of '{name}' does not terminate");
                return false;
            }
            remaining -= 1;
            current = self.get(parent).and_then(|view| view.attach_parent);
        }
        false
    }
}

impl<'s, 'a> IntoIterator for &'s ComponentSet<'a> {
    type Item = &'s ComponentView<'a>;
    type IntoIter = std::slice::Iter<'s, ComponentView<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.views.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(
        template: &'a ComponentTemplate,
        parent: Option<&'a str>,
        owner: &'a ClassId,
    ) -> ComponentView<'a> {
        ComponentView {
            template,
            attach_parent: parent,
            origin: ComponentOrigin::Construction,
            declared_by: owner,
        }
    }

    #[test]
    fn test_first_insert_wins() {
        let owner = ClassId::from("BP_Test_C");
        let derived = ComponentTemplate::new("Mesh", "StaticMesh").with_tag("derived");
        let base = ComponentTemplate::new("Mesh", "StaticMesh");

        let mut set = ComponentSet::new(&owner);
        assert!(set.insert(view(&derived, None, &owner)));
        assert!(!set.insert(view(&base, None, &owner)));

        assert_eq!(set.len(), 1);
        let kept = set.get("Mesh").expect("Mesh was inserted");
        assert_eq!(kept.template.tags, vec!["derived".to_string()]);
    }

    #[test]
    fn test_descendant_walks_whole_subtree() {
        let owner = ClassId::from("BP_Test_C");
        let root = ComponentTemplate::new("Root", "Scene");
        let arm = ComponentTemplate::new("Arm", "Scene");
        let hand = ComponentTemplate::new("Hand", "Scene");
        let other = ComponentTemplate::new("Other", "Scene");

        let mut set = ComponentSet::new(&owner);
        set.insert(view(&root, None, &owner));
        set.insert(view(&arm, Some("Root"), &owner));
        set.insert(view(&hand, Some("Arm"), &owner));
        set.insert(view(&other, None, &owner));

        assert!(set.is_descendant_of("Arm", "Root"));
        assert!(set.is_descendant_of("Hand", "Root"));
        assert!(!set.is_descendant_of("Root", "Root"));
        assert!(!set.is_descendant_of("Root", "Hand"));
        assert!(!set.is_descendant_of("Other", "Root"));
        assert!(!set.is_descendant_of("Missing", "Root"));
    }

    #[test]
    fn test_descendant_stops_on_cycle() {
        let owner = ClassId::from("BP_Test_C");
        let a = ComponentTemplate::new("A", "Scene");
        let b = ComponentTemplate::new("B", "Scene");

        let mut set = ComponentSet::new(&owner);
        set.insert(view(&a, Some("B"), &owner));
        set.insert(view(&b, Some("A"), &owner));

        assert!(!set.is_descendant_of("A", "Root"));
    }
}
