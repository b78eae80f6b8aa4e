//! Leaf enumeration and shape-preserving reconstruction
//!
//! Two views of the same tree are offered here:
//!
//! - [`count_leaves`] estimates the number of translation units for progress
//!   and size limits. It only descends into objects: string values inside
//!   arrays are not counted.
//! - [`translate_leaves`] rebuilds the tree with every string replaced,
//!   including strings inside arrays, and leaves numbers, booleans and nulls
//!   untouched.
//!
//! The two disagree for documents with strings inside arrays. That asymmetry
//! is covered by tests.

use crate::document::Node;
use crate::language::Language;
use futures::future::try_join_all;
use std::future::Future;

/// Count the string leaves reachable through objects.
///
/// A string value counts as one, an object value is descended into, and an
/// array value contributes nothing. For a root array the same rule is applied
/// to its direct elements.
pub fn count_leaves(node: &Node) -> usize {
    fn count_child(child: &Node) -> usize {
        match child {
            Node::Text(_) => 1,
            Node::Object(_) => count_leaves(child),
            _ => 0,
        }
    }

    match node {
        Node::Object(entries) => entries.iter().map(|(_, v)| count_child(v)).sum(),
        Node::Array(items) => items.iter().map(count_child).sum(),
        _ => 0,
    }
}

/// All string leaves in document order, including those inside arrays.
pub fn leaves(node: &Node) -> Vec<&str> {
    fn collect<'a>(node: &'a Node, out: &mut Vec<&'a str>) {
        match node {
            Node::Text(text) => out.push(text),
            Node::Object(entries) => entries.iter().for_each(|(_, v)| collect(v, out)),
            Node::Array(items) => items.iter().for_each(|v| collect(v, out)),
            Node::Number(_) | Node::Bool(_) | Node::Null => {}
        }
    }

    let mut out = Vec::new();
    collect(node, &mut out);
    out
}

/// Build a new tree of the same shape, replacing each string leaf with
/// `f(leaf)`. Leaves are visited in the same order as [`leaves`].
pub fn map_leaves<F>(node: &Node, f: &mut F) -> Node
where
    F: FnMut(&str) -> String,
{
    match node {
        Node::Text(text) => Node::Text(f(text)),
        Node::Object(entries) => Node::Object(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), map_leaves(value, f)))
                .collect(),
        ),
        Node::Array(items) => Node::Array(items.iter().map(|v| map_leaves(v, f)).collect()),
        other => other.clone(),
    }
}

/// Translate every string leaf concurrently and rebuild the tree.
///
/// `translate_one` is called once per string leaf with the leaf text and the
/// target language. All calls are polled together; the first error aborts the
/// remaining calls and is returned, discarding any partial translation.
/// The input tree is never modified, so several languages may traverse the
/// same source at once.
pub async fn translate_leaves<F, Fut, E>(
    node: &Node,
    language: Language,
    translate_one: F,
) -> Result<Node, E>
where
    F: Fn(String, Language) -> Fut,
    Fut: Future<Output = Result<String, E>>,
{
    let calls = leaves(node)
        .into_iter()
        .map(|text| translate_one(text.to_owned(), language));
    let translated = try_join_all(calls).await?;

    let mut translated = translated.into_iter();
    Ok(map_leaves(node, &mut |original: &str| {
        translated.next().unwrap_or_else(|| original.to_owned())
    }))
}
