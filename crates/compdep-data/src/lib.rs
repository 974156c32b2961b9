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

//! # CompDep Data
//!
//! Concrete, in-memory implementations of the collaborator contracts defined
//! in `compdep-core`:
//!
//! - [`ClassRegistry`] implements `TypeRegistry`. It is seeded with the
//!   native classes every host provides, registered statically through
//!   [`NativeClass`] items, and extended with project classes.
//! - [`BlueprintLibrary`] implements `ConstructionGraphStore` over the
//!   construction graphs of the project's blueprints.
//! - [`Project`] loads both from a RON project file.

#![warn(missing_docs)]

mod blueprint;
mod project;
mod registry;

pub use blueprint::*;
pub use project::*;
pub use registry::*;
