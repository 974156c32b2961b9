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

//! Kahn's algorithm over an arbitrary set of nodes and `(parent, child)` edges.

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use ahash::AHashMap;

/// The edges contain at least one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError {
    /// Number of nodes that could not be ordered.
    pub unresolved: usize,
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cycle detected; {} node(s) could not be ordered", self.unresolved)
    }
}

impl std::error::Error for CycleError {}

/// Orders `nodes` so that every parent comes before its children.
///
/// Roots keep their relative input order, which makes the result
/// deterministic for a given input. Edges that mention a node absent from
/// `nodes` only count toward the child's in-degree when the child is known.
pub fn topological_sort<T>(
    nodes: impl IntoIterator<Item = T>,
    edges: impl IntoIterator<Item = (T, T)>,
) -> Result<Vec<T>, CycleError>
where
    T: Copy + Eq + Hash,
{
    let node_list: Vec<T> = nodes.into_iter().collect();
    let mut in_degree: AHashMap<T, usize> = node_list.iter().map(|&node| (node, 0)).collect();
    let mut children: AHashMap<T, Vec<T>> = AHashMap::new();

    for (parent, child) in edges {
        children.entry(parent).or_default().push(child);
        if let Some(degree) = in_degree.get_mut(&child) {
            *degree += 1;
        }
    }

    let mut ready: VecDeque<T> = node_list
        .iter()
        .copied()
        .filter(|node| in_degree.get(node).copied().unwrap_or(0) == 0)
        .collect();

    let mut sorted = Vec::with_capacity(node_list.len());
    while let Some(node) = ready.pop_front() {
        sorted.push(node);
        for &child in children.get(&node).map(Vec::as_slice).unwrap_or(&[]) {
            if let Some(degree) = in_degree.get_mut(&child) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push_back(child);
                }
            }
        }
    }

    if sorted.len() == node_list.len() {
        Ok(sorted)
    } else {
        Err(CycleError {
            unresolved: node_list.len() - sorted.len(),
        })
    }
}
