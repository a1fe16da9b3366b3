//! Category tree helpers for the storefront filters.
//!
//! `/categories/tree` returns nested `{id, name, subCategories?}` nodes. The
//! storefront needs both a flat list (single select) and the children of a
//! node (dependent dropdowns four levels deep).

use serde::{Deserialize, Serialize};

use crate::ads::{deserialize_id, deserialize_lenient, deserialize_lenient_seq};

/// Maximum nesting the ad model can reference (main, one, two, three).
pub const MAX_CATEGORY_DEPTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub name: String,
    /// Malformed children are skipped; `null` reads as a leaf.
    #[serde(default, alias = "sub_categories", deserialize_with = "deserialize_lenient_seq")]
    pub sub_categories: Vec<CategoryNode>,
}

/// One row of a flattened tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatCategory {
    pub id: String,
    pub name: String,
    /// 0 for top-level categories.
    pub depth: usize,
    pub parent_id: Option<String>,
}

/// Depth-first, pre-order flattening: every parent precedes its children.
pub fn flatten(tree: &[CategoryNode]) -> Vec<FlatCategory> {
    fn walk(nodes: &[CategoryNode], depth: usize, parent: Option<&str>, out: &mut Vec<FlatCategory>) {
        for node in nodes {
            out.push(FlatCategory {
                id: node.id.clone(),
                name: node.name.clone(),
                depth,
                parent_id: parent.map(str::to_string),
            });
            walk(&node.sub_categories, depth + 1, Some(&node.id), out);
        }
    }

    let mut out = Vec::new();
    walk(tree, 0, None, &mut out);
    out
}

/// Find a node anywhere in the tree.
pub fn find<'a>(tree: &'a [CategoryNode], id: &str) -> Option<&'a CategoryNode> {
    tree.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find(&node.sub_categories, id)
        }
    })
}

/// Direct sub-categories of `id`; `None` when `id` is not in the tree.
pub fn children_of<'a>(tree: &'a [CategoryNode], id: &str) -> Option<&'a [CategoryNode]> {
    find(tree, id).map(|node| node.sub_categories.as_slice())
}

/// The main/one/two/three chain behind the cascading category dropdowns.
///
/// Selecting a level discards every deeper level. A selection that is not a
/// child of the level above is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    chain: Vec<String>,
}

impl CategorySelection {
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// Deepest selected category, the one used as the feed filter.
    pub fn leaf(&self) -> Option<&str> {
        self.chain.last().map(String::as_str)
    }

    /// Options for the dropdown at `level` (0 = main).
    pub fn options<'a>(&self, tree: &'a [CategoryNode], level: usize) -> &'a [CategoryNode] {
        match level {
            0 => tree,
            _ => self
                .chain
                .get(level - 1)
                .and_then(|parent| children_of(tree, parent))
                .unwrap_or_default(),
        }
    }

    /// Select `id` at `level`, clearing deeper levels. `None` clears from
    /// `level` down. Returns whether the selection changed.
    pub fn select(&mut self, tree: &[CategoryNode], level: usize, id: Option<&str>) -> bool {
        if level >= MAX_CATEGORY_DEPTH || level > self.chain.len() {
            return false;
        }

        match id {
            None => {
                let changed = self.chain.len() > level;
                self.chain.truncate(level);
                changed
            }
            Some(id) => {
                if !self.options(tree, level).iter().any(|node| node.id == id) {
                    return false;
                }
                if self.chain.get(level).map(String::as_str) == Some(id) {
                    return false;
                }
                self.chain.truncate(level);
                self.chain.push(id.to_string());
                true
            }
        }
    }
}
