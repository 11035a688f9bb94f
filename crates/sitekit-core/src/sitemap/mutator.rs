//! Pure tree edits
//!
//! Every function borrows the current forest and returns a new one, so callers
//! can compare the old and new trees. Missing ids are silent no-ops.

use super::model::{InsertPosition, NodeUpdate, SitemapNode};
use super::tree::{contains_descendant, find_node};
use crate::error::{Result, SitekitError};
use crate::types::NodeId;

/// Remove the node with `id` and its whole subtree
pub fn remove(tree: &[SitemapNode], id: &NodeId) -> Vec<SitemapNode> {
    tree.iter()
        .filter(|node| &node.id != id)
        .map(|node| rebuild(node, remove(&node.children, id)))
        .collect()
}

/// Insert `node` relative to `target_id`
///
/// Without a target the node is appended to the root level. An unknown target
/// leaves the tree unchanged.
pub fn insert(
    tree: &[SitemapNode],
    mut node: SitemapNode,
    target_id: Option<&NodeId>,
    position: InsertPosition,
) -> Vec<SitemapNode> {
    let mut pages = tree.to_vec();

    match target_id {
        None => {
            node.parent_id = None;
            pages.push(node);
        }
        Some(target_id) => {
            // The node comes back when the target does not exist.
            let _ = place(&mut pages, None, node, target_id, position);
        }
    }

    pages
}

/// Move the subtree rooted at `dragged_id` relative to `target_id`
///
/// Returns the tree unchanged when the dragged node or the target is missing.
/// Fails with [`SitekitError::InvalidMove`] when the target is the dragged node
/// or one of its descendants.
pub fn move_node(
    tree: &[SitemapNode],
    dragged_id: &NodeId,
    target_id: Option<&NodeId>,
    position: InsertPosition,
) -> Result<Vec<SitemapNode>> {
    let Some(dragged) = find_node(tree, dragged_id) else {
        return Ok(tree.to_vec());
    };

    if let Some(target_id) = target_id {
        if contains_descendant(dragged, target_id) {
            return Err(SitekitError::InvalidMove {
                dragged: dragged_id.to_string(),
                target: target_id.to_string(),
            });
        }
        if find_node(tree, target_id).is_none() {
            return Ok(tree.to_vec());
        }
    }

    let dragged = dragged.clone();
    let without = remove(tree, dragged_id);
    Ok(insert(&without, dragged, target_id, position))
}

/// Apply field edits to the node with `id`, bumping its `updated_at`
pub fn update_node(tree: &[SitemapNode], id: &NodeId, update: &NodeUpdate) -> Vec<SitemapNode> {
    tree.iter()
        .map(|node| {
            if &node.id == id {
                let mut node = node.clone();
                apply(&mut node, update);
                node
            } else {
                rebuild(node, update_node(&node.children, id, update))
            }
        })
        .collect()
}

fn apply(node: &mut SitemapNode, update: &NodeUpdate) {
    if update.is_empty() {
        return;
    }
    if let Some(title) = &update.title {
        node.title = title.clone();
    }
    if let Some(url) = &update.url {
        node.url = url.clone();
    }
    if let Some(link) = &update.content_page_id {
        node.content_page_id = link.clone();
    }
    node.touch();
}

/// Place `node` next to or under `target_id` within `siblings`, recursing into
/// children. Hands the node back if the target was not found.
fn place(
    siblings: &mut Vec<SitemapNode>,
    parent_id: Option<&NodeId>,
    mut node: SitemapNode,
    target_id: &NodeId,
    position: InsertPosition,
) -> Option<SitemapNode> {
    if let Some(index) = siblings.iter().position(|n| &n.id == target_id) {
        match position {
            InsertPosition::Before => {
                node.parent_id = parent_id.cloned();
                siblings.insert(index, node);
            }
            InsertPosition::After => {
                node.parent_id = parent_id.cloned();
                siblings.insert(index + 1, node);
            }
            InsertPosition::Child => {
                node.parent_id = Some(target_id.clone());
                siblings[index].children.push(node);
            }
        }
        return None;
    }

    for sibling in siblings.iter_mut() {
        node = place(
            &mut sibling.children,
            Some(&sibling.id),
            node,
            target_id,
            position,
        )?;
    }

    Some(node)
}

fn rebuild(node: &SitemapNode, children: Vec<SitemapNode>) -> SitemapNode {
    SitemapNode {
        id: node.id.clone(),
        title: node.title.clone(),
        url: node.url.clone(),
        content_page_id: node.content_page_id.clone(),
        children,
        parent_id: node.parent_id.clone(),
        order: node.order,
        created_at: node.created_at,
        updated_at: node.updated_at,
    }
}
