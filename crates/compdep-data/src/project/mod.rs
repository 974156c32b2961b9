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

//! Loading a project's classes and blueprints from a RON file.
//!
//! The file is a [`ProjectDefinition`]: a flat list of project classes
//! (components and native actors with their default components) and a list of
//! blueprints with their construction graphs. Declarations may appear in any
//! order; parents are resolved once the whole file has been read.

use std::fs;
use std::path::{Path, PathBuf};

use compdep_core::class::{
    Capability, ClassId, ClassInfo, ClassKind, DependencyDeclaration, TypeRegistry,
};
use compdep_core::construction::{ConstructionNode, InheritedOverride};
use serde::{Deserialize, Serialize};

use crate::blueprint::{BlueprintClass, BlueprintLibrary};
use crate::registry::{ClassRegistry, RegistryError};

/// An error raised while loading or updating a [`Project`].
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// The project file could not be read.
    #[error("Failed to read project file '{}': {source}", .path.display())]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The project file is not valid RON for a [`ProjectDefinition`].
    #[error("Invalid project file: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// A class could not be registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// An override names a class that is not one of the blueprint's ancestor blueprints.
    #[error("Blueprint '{blueprint}' overrides a node of '{owner}', which is not one of its ancestor blueprints")]
    ForeignOverride {
        /// The blueprint holding the override.
        blueprint: ClassId,
        /// The class named as the node's owner.
        owner: ClassId,
    },
    /// A native override names a component that no ancestor's default
    /// instance carries.
    #[error("Blueprint '{blueprint}' overrides native component '{component}', which none of its ancestors declares")]
    UnknownNativeComponent {
        /// The blueprint holding the override.
        blueprint: ClassId,
        /// The name of the overridden component.
        component: String,
    },
    /// The blueprint is not part of the project.
    #[error("Blueprint '{0}' is not part of the project")]
    UnknownBlueprint(ClassId),
}

/// The serialized form of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDefinition {
    /// Project classes other than blueprints' generated classes.
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
    /// Actor blueprints.
    #[serde(default)]
    pub blueprints: Vec<BlueprintDefinition>,
}

/// The serialized form of one project class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Class name.
    pub name: ClassId,
    /// Parent class name.
    pub parent: ClassId,
    /// Native or blueprint-authored.
    #[serde(default)]
    pub kind: ClassKind,
    /// Declared capabilities.
    #[serde(default)]
    pub implements: Vec<Capability>,
    /// Declared dependencies.
    #[serde(default)]
    pub dependencies: Option<DependencyDeclaration>,
    /// Components of the default instance.
    #[serde(default)]
    pub default_components: Vec<ConstructionNode>,
}

impl From<ClassDefinition> for ClassInfo {
    fn from(definition: ClassDefinition) -> Self {
        let mut info = ClassInfo::native(definition.name, None);
        info.parent = Some(definition.parent);
        info.kind = definition.kind;
        info.default_components = definition.default_components;
        for capability in definition.implements {
            info = info.with_capability(capability);
        }
        match definition.dependencies {
            Some(declaration) => info.with_dependencies(declaration),
            None => info,
        }
    }
}

/// The serialized form of one actor blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintDefinition {
    /// Generated class name, conventionally ending in `_C`.
    pub name: ClassId,
    /// Parent class, native or blueprint.
    pub parent: ClassId,
    /// Re-declarations of inherited native components. A re-declaration
    /// without a parent keeps the inherited attachment.
    #[serde(default)]
    pub native_overrides: Vec<ConstructionNode>,
    /// Nodes of the blueprint's own construction graph.
    #[serde(default)]
    pub construction_script: Vec<ConstructionNode>,
    /// Overrides of nodes declared by ancestor blueprints.
    #[serde(default)]
    pub inherited_overrides: Vec<InheritedOverride>,
}

impl BlueprintDefinition {
    fn to_blueprint(&self) -> BlueprintClass {
        BlueprintClass {
            id: self.name.clone(),
            parent: self.parent.clone(),
            construction_script: self.construction_script.clone(),
            inherited_overrides: self.inherited_overrides.clone(),
        }
    }
}

/// A loaded project: the class registry and the blueprint store.
#[derive(Debug, Clone)]
pub struct Project {
    registry: ClassRegistry,
    blueprints: BlueprintLibrary,
}

impl Project {
    /// A project holding only the native classes.
    pub fn new() -> Result<Self, ProjectError> {
        Ok(Self {
            registry: ClassRegistry::with_native_classes()?,
            blueprints: BlueprintLibrary::new(),
        })
    }

    /// Builds a project from its definition.
    pub fn from_definition(definition: ProjectDefinition) -> Result<Self, ProjectError> {
        let mut project = Self::new()?;

        let mut classes: Vec<ClassInfo> = definition
            .classes
            .into_iter()
            .map(ClassInfo::from)
            .collect();
        classes.extend(
            definition
                .blueprints
                .iter()
                .map(|blueprint| ClassInfo::blueprint(blueprint.name.clone(), blueprint.parent.clone())),
        );
        project.registry.register_all(classes)?;

        // Native overrides resolve against the parent's default instance, so
        // shallower blueprints go first.
        let mut by_depth: Vec<&BlueprintDefinition> = definition.blueprints.iter().collect();
        by_depth.sort_by_cached_key(|blueprint| project.registry.ancestors(&blueprint.name).count());
        for blueprint in by_depth {
            project.check_overrides(blueprint)?;
            let info = project.resolve_native_overrides(blueprint)?;
            project.registry.replace(info)?;
        }

        for blueprint in &definition.blueprints {
            project.blueprints.insert(blueprint.to_blueprint());
        }

        log::info!(
            "Project: Loaded {} classes and {} blueprints",
            project.registry.len(),
            project.blueprints.len()
        );
        Ok(project)
    }

    /// Parses a project from RON source.
    pub fn from_ron_str(source: &str) -> Result<Self, ProjectError> {
        let definition: ProjectDefinition = ron::from_str(source)?;
        Self::from_definition(definition)
    }

    /// Reads and parses a project file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        log::debug!("Project: Loading '{}'", path.display());
        let source = fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Replaces an existing blueprint with a new version of itself, as the
    /// host does when a blueprint is recompiled.
    pub fn recompile_blueprint(
        &mut self,
        definition: BlueprintDefinition,
    ) -> Result<(), ProjectError> {
        if self.blueprints.get(&definition.name).is_none() {
            return Err(ProjectError::UnknownBlueprint(definition.name));
        }
        self.check_overrides(&definition)?;
        let info = self.resolve_native_overrides(&definition)?;
        self.registry.replace(info)?;
        self.blueprints.insert(definition.to_blueprint());
        log::debug!("Project: Recompiled '{}'", definition.name);
        Ok(())
    }

    /// The class registry.
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// The blueprint store.
    pub fn blueprints(&self) -> &BlueprintLibrary {
        &self.blueprints
    }

    fn check_overrides(&self, definition: &BlueprintDefinition) -> Result<(), ProjectError> {
        for record in &definition.inherited_overrides {
            let is_blueprint = self
                .registry
                .class(&record.owner)
                .is_some_and(|owner| owner.kind == ClassKind::Blueprint);
            if !is_blueprint || !self.registry.is_child_of(&definition.parent, &record.owner) {
                return Err(ProjectError::ForeignOverride {
                    blueprint: definition.name.clone(),
                    owner: record.owner.clone(),
                });
            }
        }
        Ok(())
    }

    /// Builds the blueprint's class entry. Every native override must name a
    /// component of the parent's default instance and inherits its
    /// attachment when it declares none.
    fn resolve_native_overrides(
        &self,
        definition: &BlueprintDefinition,
    ) -> Result<ClassInfo, ProjectError> {
        let inherited = self.registry.default_object(&definition.parent);
        let mut info = ClassInfo::blueprint(definition.name.clone(), definition.parent.clone());
        for node in &definition.native_overrides {
            let declared = inherited.as_ref().and_then(|object| {
                object
                    .components
                    .iter()
                    .find(|declared| declared.template.name == node.template.name)
            });
            let Some(declared) = declared else {
                return Err(ProjectError::UnknownNativeComponent {
                    blueprint: definition.name.clone(),
                    component: node.template.name.clone(),
                });
            };
            let mut node = node.clone();
            if node.parent.is_none() {
                node.parent = declared.parent.clone();
            }
            info = info.with_default_component(node);
        }
        Ok(info)
    }
}
