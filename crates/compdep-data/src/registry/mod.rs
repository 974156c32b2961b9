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
use compdep_core::class::{ClassId, ClassInfo, TypeRegistry};
use compdep_core::graph::{topological_sort, CycleError};

mod native;

pub use native::*;

/// An error raised while populating a [`ClassRegistry`].
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A class with the same name is already registered.
    #[error("Class '{0}' is already registered")]
    DuplicateClass(ClassId),
    /// The declared parent is not a registered class.
    #[error("Class '{class}' derives from unknown class '{parent}'")]
    UnknownParent {
        /// The class being registered.
        class: ClassId,
        /// Its missing parent.
        parent: ClassId,
    },
    /// The class is not registered, so it cannot be replaced.
    #[error("Class '{0}' is not registered")]
    UnknownClass(ClassId),
    /// The declared parents form a loop.
    #[error("Class hierarchy contains a cycle: {0}")]
    Cycle(#[from] CycleError),
}

/// The process-wide mapping from class name to class metadata.
///
/// A class can only be registered once its parent is, which keeps every
/// parent chain finite and acyclic. Enumeration follows registration order.
#[derive(Debug, Default, Clone)]
pub struct ClassRegistry {
    classes: AHashMap<ClassId, ClassInfo>,
    order: Vec<ClassId>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every statically registered [`NativeClass`].
    pub fn with_native_classes() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        let natives = native_classes();
        let count = natives.len();
        registry.register_all(natives)?;
        log::info!("ClassRegistry: Registered {count} native classes");
        Ok(registry)
    }

    /// Registers a single class. Its parent must already be registered.
    pub fn register(&mut self, info: ClassInfo) -> Result<(), RegistryError> {
        if self.classes.contains_key(&info.id) {
            return Err(RegistryError::DuplicateClass(info.id));
        }
        if let Some(parent) = &info.parent {
            if !self.classes.contains_key(parent) {
                return Err(RegistryError::UnknownParent {
                    class: info.id.clone(),
                    parent: parent.clone(),
                });
            }
        }
        log::trace!("ClassRegistry: Registered '{}' ({:?})", info.id, info.kind);
        self.order.push(info.id.clone());
        self.classes.insert(info.id.clone(), info);
        Ok(())
    }

    /// Registers a batch of classes declared in any order. Parents may be
    /// part of the batch or already registered.
    pub fn register_all(&mut self, infos: Vec<ClassInfo>) -> Result<(), RegistryError> {
        let mut slots: AHashMap<&ClassId, usize> = AHashMap::with_capacity(infos.len());
        for (slot, info) in infos.iter().enumerate() {
            if slots.insert(&info.id, slot).is_some() || self.classes.contains_key(&info.id) {
                return Err(RegistryError::DuplicateClass(info.id.clone()));
            }
        }

        let edges: Vec<(usize, usize)> = infos
            .iter()
            .enumerate()
            .filter_map(|(slot, info)| {
                let parent = info.parent.as_ref()?;
                slots.get(parent).map(|&parent_slot| (parent_slot, slot))
            })
            .collect();
        let order = topological_sort(0..infos.len(), edges)?;

        let mut pending: Vec<Option<ClassInfo>> = infos.into_iter().map(Some).collect();
        for slot in order {
            if let Some(info) = pending[slot].take() {
                self.register(info)?;
            }
        }
        Ok(())
    }

    /// Replaces the metadata of an already registered class, as happens when a
    /// blueprint is recompiled. Returns the previous metadata.
    pub fn replace(&mut self, info: ClassInfo) -> Result<ClassInfo, RegistryError> {
        if !self.classes.contains_key(&info.id) {
            return Err(RegistryError::UnknownClass(info.id));
        }
        if let Some(parent) = &info.parent {
            if !self.classes.contains_key(parent) {
                return Err(RegistryError::UnknownParent {
                    class: info.id.clone(),
                    parent: parent.clone(),
                });
            }
            // Reparenting below one of its own descendants would close a loop.
            if self.is_child_of(parent, &info.id) {
                return Err(RegistryError::Cycle(CycleError { unresolved: 1 }));
            }
        }
        let id = info.id.clone();
        self.classes
            .insert(id.clone(), info)
            .ok_or(RegistryError::UnknownClass(id))
    }

    /// Whether a class with that name is registered.
    pub fn contains(&self, id: &ClassId) -> bool {
        self.classes.contains_key(id)
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no class is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl TypeRegistry for ClassRegistry {
    fn class(&self, id: &ClassId) -> Option<&ClassInfo> {
        self.classes.get(id)
    }

    fn classes(&self) -> Vec<&ClassInfo> {
        self.order
            .iter()
            .filter_map(|id| self.classes.get(id))
            .collect()
    }
}
