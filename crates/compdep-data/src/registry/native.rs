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

//! Static registration of native classes.
//!
//! Every native class submits a [`NativeClass`] item; the registry gathers
//! all of them at startup. Crates linking against this one can add their own
//! classes the same way:
//!
//! ```rust,ignore
//! use compdep_core::class::ClassInfo;
//! use compdep_data::NativeClass;
//!
//! fn turret() -> ClassInfo {
//!     ClassInfo::native("TurretComponent", Some("SceneComponent"))
//! }
//!
//! inventory::submit! { NativeClass { describe: turret } }
//! ```

use compdep_core::class::{builtin, ClassInfo};
use compdep_core::construction::{ComponentTemplate, ConstructionNode};

/// A statically registered native class.
pub struct NativeClass {
    /// Builds the class's registry entry.
    pub describe: fn() -> ClassInfo,
}

inventory::collect!(NativeClass);

/// Describes every statically registered native class, in no particular order.
pub fn native_classes() -> Vec<ClassInfo> {
    let mut classes = Vec::new();
    for native in inventory::iter::<NativeClass> {
        classes.push((native.describe)());
    }
    classes
}

fn object() -> ClassInfo {
    ClassInfo::native(builtin::OBJECT, None)
}

fn actor_component() -> ClassInfo {
    ClassInfo::native(builtin::ACTOR_COMPONENT, Some(builtin::OBJECT))
}

fn scene_component() -> ClassInfo {
    ClassInfo::native(builtin::SCENE_COMPONENT, Some(builtin::ACTOR_COMPONENT))
}

fn primitive_component() -> ClassInfo {
    ClassInfo::native("PrimitiveComponent", Some(builtin::SCENE_COMPONENT))
}

fn shape_component() -> ClassInfo {
    ClassInfo::native("ShapeComponent", Some("PrimitiveComponent"))
}

fn capsule_component() -> ClassInfo {
    ClassInfo::native("CapsuleComponent", Some("ShapeComponent"))
}

fn static_mesh_component() -> ClassInfo {
    ClassInfo::native("StaticMeshComponent", Some("PrimitiveComponent"))
}

fn skeletal_mesh_component() -> ClassInfo {
    ClassInfo::native("SkeletalMeshComponent", Some("PrimitiveComponent"))
}

fn arrow_component() -> ClassInfo {
    ClassInfo::native("ArrowComponent", Some("PrimitiveComponent"))
}

fn movement_component() -> ClassInfo {
    ClassInfo::native("MovementComponent", Some(builtin::ACTOR_COMPONENT))
}

fn character_movement_component() -> ClassInfo {
    ClassInfo::native("CharacterMovementComponent", Some("MovementComponent"))
}

fn actor() -> ClassInfo {
    ClassInfo::native(builtin::ACTOR, Some(builtin::OBJECT))
}

fn pawn() -> ClassInfo {
    ClassInfo::native("Pawn", Some(builtin::ACTOR))
}

fn character() -> ClassInfo {
    ClassInfo::native("Character", Some("Pawn"))
        .with_default_component(ConstructionNode::new(ComponentTemplate::new(
            "CollisionCylinder",
            "CapsuleComponent",
        )))
        .with_default_component(
            ConstructionNode::new(ComponentTemplate::new("Arrow", "ArrowComponent"))
                .attached_to("CollisionCylinder"),
        )
        .with_default_component(
            ConstructionNode::new(ComponentTemplate::new(
                "CharacterMesh0",
                "SkeletalMeshComponent",
            ))
            .attached_to("CollisionCylinder"),
        )
        .with_default_component(ConstructionNode::new(ComponentTemplate::new(
            "CharMoveComp",
            "CharacterMovementComponent",
        )))
}

inventory::submit! { NativeClass { describe: object } }
inventory::submit! { NativeClass { describe: actor_component } }
inventory::submit! { NativeClass { describe: scene_component } }
inventory::submit! { NativeClass { describe: primitive_component } }
inventory::submit! { NativeClass { describe: shape_component } }
inventory::submit! { NativeClass { describe: capsule_component } }
inventory::submit! { NativeClass { describe: static_mesh_component } }
inventory::submit! { NativeClass { describe: skeletal_mesh_component } }
inventory::submit! { NativeClass { describe: arrow_component } }
inventory::submit! { NativeClass { describe: movement_component } }
inventory::submit! { NativeClass { describe: character_movement_component } }
inventory::submit! { NativeClass { describe: actor } }
inventory::submit! { NativeClass { describe: pawn } }
inventory::submit! { NativeClass { describe: character } }
