use std::fmt;

use crate::{
    selection::{self, Selection},
    Error, SchemaIndex, TypeKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentSize {
    /// Leaf fields only.
    Medium,
    /// Leaf fields, plus the medium fragment of every object or interface field.
    Large,
}

impl FragmentSize {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            FragmentSize::Medium => "Medium",
            FragmentSize::Large => "Large",
        }
    }
}

/// `EventMediumFragment`, `EventLargeFragment`.
pub fn fragment_name(type_name: &str, size: FragmentSize) -> String {
    format!("{type_name}{}Fragment", size.as_str())
}

/// A generated fragment definition. Displays as a single line of GraphQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    name: String,
    type_condition: String,
    selection_set: Vec<Selection>,
}

impl Fragment {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_condition(&self) -> &str {
        &self.type_condition
    }

    /// Type name and size of the fragments this one depends on, in the order they are spread.
    pub fn spreads(&self) -> Vec<(&str, FragmentSize)> {
        let mut spreads = Vec::new();

        for selection in &self.selection_set {
            selection.collect_spreads(&mut spreads);
        }

        spreads
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = format!("fragment {} on {}", self.name, self.type_condition);
        selection::render(&self.selection_set, &mut rendered);

        f.write_str(&rendered)
    }
}

pub struct FragmentBuilder<'i, 'a> {
    index: &'i SchemaIndex<'a>,
}

impl<'i, 'a> FragmentBuilder<'i, 'a> {
    pub fn new(index: &'i SchemaIndex<'a>) -> Self {
        FragmentBuilder { index }
    }

    pub fn medium(&self, type_name: &str) -> Result<Fragment, Error> {
        self.build(type_name, FragmentSize::Medium)
    }

    pub fn large(&self, type_name: &str) -> Result<Fragment, Error> {
        self.build(type_name, FragmentSize::Large)
    }

    pub fn build(&self, type_name: &str, size: FragmentSize) -> Result<Fragment, Error> {
        let kind = self
            .index
            .kind(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.to_owned()))?;

        if !kind.is_composite() {
            return Err(Error::NotComposite(type_name.to_owned()));
        }

        let fields = self.index.fields(type_name);
        let mut selection_set = Vec::with_capacity(fields.len());

        let id = fields
            .iter()
            .find(|edge| edge.name() == "id" && !edge.requires_arguments() && self.is_leaf(edge.target()));

        if let Some(id) = id {
            selection_set.push(Selection::leaf(id.name()));
        }

        for edge in fields {
            if edge.requires_arguments() || (id.is_some() && edge.name() == "id") {
                continue;
            }

            match self.index.kind(edge.target()) {
                Some(kind) if kind.is_leaf() => selection_set.push(Selection::leaf(edge.name())),
                Some(TypeKind::Object | TypeKind::Interface) if size == FragmentSize::Large => {
                    let spread = Selection::spread(edge.target(), FragmentSize::Medium);
                    selection_set.push(Selection::field(edge.name(), vec![spread]));
                }
                _ => (),
            }
        }

        if selection_set.is_empty() {
            selection_set.push(Selection::leaf("__typename"));
        }

        let fragment = Fragment {
            name: fragment_name(type_name, size),
            type_condition: type_name.to_owned(),
            selection_set,
        };

        tracing::debug!(fragment = fragment.name(), selections = fragment.selection_set.len(), "built fragment");

        Ok(fragment)
    }

    fn is_leaf(&self, type_name: &str) -> bool {
        self.index.kind(type_name).is_some_and(TypeKind::is_leaf)
    }
}
