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

//! Status texts attached to a [`FulfillmentResult`](super::FulfillmentResult).

/// The descriptor has no target class.
pub const NO_CLASS_GIVEN: &str = "No class given!";
/// The declaring component is not being edited inside a composite type.
pub const NO_OWNER: &str = "Cannot find outer of class! Are you editing a blueprint?";
/// A spatial component could not be found in its owner's component set.
pub const SOURCE_NOT_FOUND: &str =
    "Component not found in its blueprint! Are you editing a blueprint?";
/// A child dependency declared on a component without a scene-graph position.
pub const CHILD_ON_ACTOR_COMPONENT: &str =
    "Cannot have child dependency on an ActorComponent! Use a SceneComponent instead.";

/// A matching component exists.
pub const PRESENT: &str = "Present";
/// No matching component exists.
pub const NOT_PRESENT: &str = "Not Present";
/// A component of the right class carries the tag.
pub const PRESENT_WITH_TAG: &str = "Present with Tag";
/// Components of the right class exist, none carries the tag.
pub const CORRECT_TYPE_WRONG_TAG: &str = "Correct Type, Wrong Tag";
/// The tag exists, but only on components of other classes.
pub const WRONG_TYPE_CORRECT_TAG: &str = "Wrong Type, Correct Tag";
/// A matching component is below the declaring one.
pub const PRESENT_AS_CHILD: &str = "Present as Child";
/// Components of the right class exist, none below the declaring one.
pub const EXISTS_NOT_AS_CHILD: &str = "Exists, not as child";
/// A class and tag match exists, but not below the declaring one.
pub const TAGGED_EXISTS_NOT_AS_CHILD: &str = "Exists, Not as Child";
/// A class match is below the declaring one, without the tag.
pub const CHILD_EXISTS_WRONG_TAG: &str = "Child Exists, Wrong Tag";

/// Replaces the status of an unfulfilled optional dependency.
pub const NOT_PRESENT_OPTIONAL: &str = "Not Present; Optional";
