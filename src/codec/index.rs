use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::handler::FieldHandler;
use crate::schema::SchemaNode;

/// A leaf of the schema together with where it sits in the data tree.
#[derive(Clone, Debug)]
pub struct Binding {
    path: Vec<String>,
    handler: FieldHandler,
}

impl Binding {
    /// Schema keys from the root down to this leaf.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The path joined with `.`, e.g. `filter.wow.dungeon`.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }

    pub fn handler(&self) -> &FieldHandler {
        &self.handler
    }

    /// Path of the object this leaf writes into.
    pub(crate) fn scope(&self) -> &[String] {
        match self.path.split_last() {
            Some((_, parents)) => parents,
            None => &[],
        }
    }
}

/// The schema shape with leaves pointing into [`HandlerIndex::bindings`].
#[derive(Clone, Debug)]
pub(crate) enum Node {
    Leaf(usize),
    Branch(IndexMap<String, Node>),
}

pub(crate) type Branch = IndexMap<String, Node>;

/// Query key → bindings sharing it, in depth-first schema order.
#[derive(Clone, Debug, Default)]
pub(crate) struct HandlerIndex {
    pub(crate) bindings: Vec<Binding>,
    pub(crate) buckets: IndexMap<String, Vec<usize>>,
}

impl HandlerIndex {
    /// Walks the schema once, recording each leaf's path, and returns the
    /// compiled tree with the index.
    pub(crate) fn build(root: SchemaNode) -> Result<(Branch, Self)> {
        let SchemaNode::Branch(children) = root else {
            return Err(Error::UnexpectedType {
                path: String::new(),
                found: "a field handler at the root",
            });
        };

        let mut index = HandlerIndex::default();
        let mut path = Vec::new();
        let tree = index.collect(children, &mut path);
        index.check_conditions()?;
        Ok((tree, index))
    }

    fn collect(&mut self, children: IndexMap<String, SchemaNode>, path: &mut Vec<String>) -> Branch {
        let mut branch = Branch::with_capacity(children.len());
        for (key, child) in children {
            path.push(key.clone());
            let node = match child {
                SchemaNode::Leaf(handler) => {
                    let position = self.bindings.len();
                    self.buckets
                        .entry(handler.query().to_string())
                        .or_default()
                        .push(position);
                    self.bindings.push(Binding {
                        path: path.clone(),
                        handler,
                    });
                    Node::Leaf(position)
                }
                SchemaNode::Branch(grandchildren) => Node::Branch(self.collect(grandchildren, path)),
            };
            path.pop();
            branch.insert(key, node);
        }
        branch
    }

    /// A shared key is only decodable when every field behind it can be
    /// told apart.
    fn check_conditions(&self) -> Result<()> {
        for (query, positions) in &self.buckets {
            if positions.len() < 2 {
                continue;
            }
            for &position in positions {
                let binding = &self.bindings[position];
                if binding.handler.condition().is_none() {
                    return Err(Error::MissingCondition {
                        query: query.clone(),
                        path: binding.dotted_path(),
                    });
                }
            }
        }
        Ok(())
    }

    pub(crate) fn candidates(&self, query: &str) -> &[usize] {
        self.buckets.get(query).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn contains(&self, query: &str) -> bool {
        self.buckets.contains_key(query)
    }
}
