use std::collections::{HashMap, HashSet};

use super::node::Node;

/// One change needed to turn the previous children of a container into
/// the next ones. Nodes are matched by key; unkeyed nodes by position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Patch {
    Insert { index: usize, key: String },
    Update { index: usize, key: String },
    Remove { key: String },
}

fn node_key(node: &Node, index: usize) -> String {
    node.key()
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", index))
}

pub fn diff(old: &[Node], new: &[Node]) -> Vec<Patch> {
    let old_by_key: HashMap<String, &Node> = old
        .iter()
        .enumerate()
        .map(|(i, n)| (node_key(n, i), n))
        .collect();
    let new_keys: HashSet<String> = new
        .iter()
        .enumerate()
        .map(|(i, n)| node_key(n, i))
        .collect();

    let mut patches = Vec::new();

    for (i, node) in old.iter().enumerate() {
        let key = node_key(node, i);
        if !new_keys.contains(&key) {
            patches.push(Patch::Remove { key });
        }
    }

    for (index, node) in new.iter().enumerate() {
        let key = node_key(node, index);
        match old_by_key.get(&key) {
            None => patches.push(Patch::Insert { index, key }),
            Some(prev) if *prev != node => patches.push(Patch::Update { index, key }),
            Some(_) => {}
        }
    }

    patches
}

/// Build the next children, reusing every old node the patches left
/// untouched. The result always equals `new`.
pub fn apply(old: Vec<Node>, patches: &[Patch], new: &[Node]) -> Vec<Node> {
    let touched: HashSet<&str> = patches
        .iter()
        .filter_map(|p| match p {
            Patch::Insert { key, .. } | Patch::Update { key, .. } => Some(key.as_str()),
            Patch::Remove { .. } => None,
        })
        .collect();

    let mut reusable: HashMap<String, Node> = old
        .into_iter()
        .enumerate()
        .map(|(i, n)| (node_key(&n, i), n))
        .collect();

    new.iter()
        .enumerate()
        .map(|(index, node)| {
            let key = node_key(node, index);
            if touched.contains(key.as_str()) {
                return node.clone();
            }
            reusable.remove(&key).unwrap_or_else(|| node.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::node::Element;

    fn card(id: i64, likes: i64) -> Node {
        Element::new("div")
            .key(format!("post-{}", id))
            .text(format!("likes {}", likes))
            .into()
    }

    #[test]
    fn identical_trees_produce_no_patches() {
        let nodes = vec![card(1, 0), card(2, 5)];
        assert!(diff(&nodes, &nodes.clone()).is_empty());
    }

    #[test]
    fn keyed_changes_are_minimal() {
        let old = vec![card(3, 0), card(2, 1), card(1, 0)];
        let new = vec![card(4, 0), card(3, 0), card(2, 2)];

        let patches = diff(&old, &new);
        assert_eq!(
            patches,
            vec![
                Patch::Remove { key: "post-1".into() },
                Patch::Insert { index: 0, key: "post-4".into() },
                Patch::Update { index: 2, key: "post-2".into() },
            ]
        );

        assert_eq!(apply(old, &patches, &new), new);
    }

    #[test]
    fn placeholder_swaps_with_cards() {
        let empty = vec![Node::from(Element::new("div").class("no-posts").text("none"))];
        let filled = vec![card(1, 0)];

        let patches = diff(&empty, &filled);
        assert!(patches.contains(&Patch::Remove { key: "#0".into() }));
        assert!(patches.contains(&Patch::Insert { index: 0, key: "post-1".into() }));
        assert_eq!(apply(empty, &patches, &filled), filled);
    }
}
