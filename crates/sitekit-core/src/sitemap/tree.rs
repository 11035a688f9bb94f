//! Read-only queries over the sitemap forest

use super::model::SitemapNode;
use crate::types::{ContentPageId, NodeId};

/// Find a node anywhere in the forest (depth-first, pre-order)
pub fn find_node<'a>(tree: &'a [SitemapNode], id: &NodeId) -> Option<&'a SitemapNode> {
    for node in tree {
        if &node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Whether any node in the forest links the given content page
pub fn has_linked_content(tree: &[SitemapNode], content_page_id: &ContentPageId) -> bool {
    tree.iter().any(|node| {
        node.content_page_id.as_ref() == Some(content_page_id)
            || has_linked_content(&node.children, content_page_id)
    })
}

/// All nodes linking the given content page, in pre-order
pub fn linked_nodes<'a>(
    tree: &'a [SitemapNode],
    content_page_id: &ContentPageId,
) -> Vec<&'a SitemapNode> {
    iter(tree)
        .filter(|(_, node)| node.content_page_id.as_ref() == Some(content_page_id))
        .map(|(_, node)| node)
        .collect()
}

/// Total number of nodes in the forest
pub fn count_nodes(tree: &[SitemapNode]) -> usize {
    tree.iter().map(|node| 1 + count_nodes(&node.children)).sum()
}

/// Whether `id` is `node` itself or one of its descendants
pub fn contains_descendant(node: &SitemapNode, id: &NodeId) -> bool {
    &node.id == id || node.children.iter().any(|child| contains_descendant(child, id))
}

/// Chain of nodes from a root down to the node with `id`, inclusive
pub fn find_path<'a>(tree: &'a [SitemapNode], id: &NodeId) -> Option<Vec<&'a SitemapNode>> {
    for node in tree {
        if &node.id == id {
            return Some(vec![node]);
        }
        if let Some(mut path) = find_path(&node.children, id) {
            path.insert(0, node);
            return Some(path);
        }
    }
    None
}

/// Pre-order iterator yielding `(depth, node)` pairs
pub fn iter(tree: &[SitemapNode]) -> PreOrder<'_> {
    PreOrder {
        stack: tree.iter().rev().map(|node| (0, node)).collect(),
    }
}

/// Pre-order traversal of a forest
pub struct PreOrder<'a> {
    stack: Vec<(usize, &'a SitemapNode)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (usize, &'a SitemapNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn node(id: &str, title: &str, url: &str) -> SitemapNode {
        let mut node = SitemapNode::new(title, url);
        node.id = NodeId::from(id);
        node
    }

    /// A -> [B -> [D], C]
    pub fn sample_tree() -> Vec<SitemapNode> {
        let a = NodeId::from("a");
        let b = NodeId::from("b");
        vec![node("a", "A", "/")
            .with_child(
                node("b", "B", "/b")
                    .with_parent(a.clone())
                    .with_child(node("d", "D", "/b/d").with_parent(b)),
            )
            .with_child(node("c", "C", "/c").with_parent(a))]
    }
}
