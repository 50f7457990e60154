use std::collections::HashSet;

use thiserror::Error;
use tracing::trace;

use crate::models::{Node, NodeMapping};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    #[error("Node '{0}' not found in mapping")]
    NotFound(String),

    /// A node was reached a second time, so the mapping is not a tree
    #[error("Cycle detected at node '{0}'")]
    CycleDetected(String),
}

/// Pre-order depth-first walk over a conversation tree
///
/// Calls `visit` for the node at `root_id` and then for each descendant, taking
/// children in their stored order. Children missing from the mapping are skipped.
/// Nodes without a message are still visited and descended into.
///
/// Uses an explicit stack, so deep conversations cannot overflow the call stack.
/// If a node is reached twice the walk stops with [`WalkError::CycleDetected`];
/// `visit` may already have seen part of the tree by then.
///
/// Returns the number of nodes visited.
pub fn walk<'a, F>(root_id: &str, mapping: &'a NodeMapping, mut visit: F) -> Result<usize, WalkError>
where
    F: FnMut(&'a Node),
{
    let root = mapping.get(root_id).ok_or_else(|| WalkError::NotFound(root_id.to_string()))?;

    let mut stack = vec![root];
    let mut visited: HashSet<&str> = HashSet::new();

    while let Some(node) = stack.pop() {
        if !visited.insert(node.id.as_str()) {
            return Err(WalkError::CycleDetected(node.id.clone()));
        }

        visit(node);

        // reversed so the first child is popped first
        for child_id in node.children.iter().rev() {
            match mapping.get(child_id) {
                Some(child) => stack.push(child),
                None => trace!(parent = %node.id, child = %child_id, "Skipping missing child node"),
            }
        }
    }

    Ok(visited.len())
}
