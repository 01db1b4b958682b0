use std::collections::{HashSet, VecDeque};

use crate::{SchemaIndex, TypeKind};

/// One step of a [`TypePath`]: selecting `field` on `parent` lands on `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop<'a> {
    pub parent: &'a str,
    pub field: &'a str,
    /// The named type the field is declared with, after unwrapping.
    pub field_type: &'a str,
    /// Equal to `field_type` unless the field returns a union, in which case this is the member
    /// the path continues through.
    pub target: &'a str,
}

impl Hop<'_> {
    pub fn through_union(&self) -> bool {
        self.field_type != self.target
    }
}

/// An ordered sequence of hops. Empty when no path exists.
pub type TypePath<'a> = Vec<Hop<'a>>;

/// Breadth-first search over the field adjacency of a [`SchemaIndex`].
pub struct PathFinder<'i, 'a> {
    index: &'i SchemaIndex<'a>,
}

impl<'i, 'a> PathFinder<'i, 'a> {
    pub fn new(index: &'i SchemaIndex<'a>) -> Self {
        PathFinder { index }
    }

    /// Shortest path from `source` to `target` in hop count.
    ///
    /// Types are marked visited when enqueued. When several fields lead to the same next type, the
    /// first one in declaration order wins. Fields requiring arguments are never followed. Returns
    /// an empty path when the target is unreachable or equal to the source.
    pub fn find(&self, source: &str, target: &str) -> TypePath<'a> {
        let Some(source) = self.index.type_name(source).filter(|source| *source != target) else {
            return Vec::new();
        };

        let mut visited = HashSet::from([source]);
        let mut queue = VecDeque::from([(source, TypePath::new())]);

        while let Some((current, path)) = queue.pop_front() {
            for edge in self.index.fields(current) {
                if edge.requires_arguments() {
                    continue;
                }

                let field_type = edge.target();
                let members = match self.index.kind(field_type) {
                    Some(TypeKind::Union) if field_type != target => self.index.union_members(field_type),
                    _ => None,
                };

                let next_types = match members {
                    Some(members) => members.iter().copied().collect::<Vec<_>>(),
                    None => vec![field_type],
                };

                for next in next_types {
                    if !visited.insert(next) {
                        continue;
                    }

                    let mut next_path = path.clone();
                    next_path.push(Hop {
                        parent: current,
                        field: edge.name(),
                        field_type,
                        target: next,
                    });

                    if next == target {
                        tracing::debug!(from = source, to = target, hops = next_path.len(), "found type path");
                        return next_path;
                    }

                    queue.push_back((next, next_path));
                }
            }
        }

        tracing::debug!(from = source, to = target, "no type path");
        Vec::new()
    }
}
