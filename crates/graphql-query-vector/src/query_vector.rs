use indexmap::IndexSet;

use crate::{
    fragments::{FragmentBuilder, FragmentSize},
    schema_index::fold_description,
    selection::{self, Selection},
    Error, FieldEdge, Hop, OperationKind, PathFinder, SchemaIndex,
};

/// Synthesizes a paginated list query over a root type, reaching into each further requested type
/// along the shortest field path from the root.
///
/// The generated document is the operation, preceded by one comment line per page operation
/// argument, followed by every fragment it spreads. It is kept compact, one definition per line.
pub struct QueryVectorBuilder<'i, 'a> {
    index: &'i SchemaIndex<'a>,
    page_operation: Option<String>,
}

impl<'i, 'a> QueryVectorBuilder<'i, 'a> {
    pub fn new(index: &'i SchemaIndex<'a>) -> Self {
        QueryVectorBuilder {
            index,
            page_operation: None,
        }
    }

    /// Use this root query field instead of the first one returning a list of the root type.
    pub fn with_page_operation(mut self, page_operation: impl Into<String>) -> Self {
        self.page_operation = Some(page_operation.into());
        self
    }

    /// Builds the query for `types`, the first one being the root of the query.
    pub fn build<S: AsRef<str>>(&self, types: &[S]) -> Result<String, Error> {
        let Some((root, targets)) = types.split_first() else {
            return Err(Error::EmptyTypeList);
        };

        for type_name in types {
            let type_name = type_name.as_ref();

            match self.index.kind(type_name) {
                None => return Err(Error::UnknownType(type_name.to_owned())),
                Some(kind) if !kind.is_composite() => return Err(Error::NotComposite(type_name.to_owned())),
                Some(_) => (),
            }
        }

        let root = root.as_ref();
        let page_operation = self.page_operation(root)?;

        let path_finder = PathFinder::new(self.index);
        let mut selection_set = IndexSet::new();

        selection_set.insert(Selection::spread(root, FragmentSize::Medium));
        selection_set.insert(Selection::spread(root, FragmentSize::Large));

        for target in targets {
            let target = target.as_ref();

            if target == root {
                continue;
            }

            let path = path_finder.find(root, target);

            if path.is_empty() {
                return Err(Error::UnreachableType {
                    root: root.to_owned(),
                    target: target.to_owned(),
                });
            }

            selection_set.insert(nested_selection(&path, target));
        }

        let mut rendered = String::new();
        let mut variables = Vec::new();
        let mut arguments = Vec::new();

        for argument in page_operation.definition().arguments() {
            let ty = argument.ty().to_string();
            let description = argument
                .description()
                .map(|description| fold_description(&description.to_cow()))
                .filter(|description| !description.is_empty())
                .unwrap_or_else(|| String::from("no description"));

            rendered.push_str(&format!("# {}: {ty} - {description}\n", argument.name()));
            variables.push(format!("${}: {ty}", argument.name()));
            arguments.push((argument.name().to_owned(), format!("${}", argument.name())));
        }

        let operation = Selection::Field {
            name: page_operation.name().to_owned(),
            arguments,
            selection_set: selection_set.into_iter().collect(),
        };

        rendered.push_str("query ");
        rendered.push_str(page_operation.name());

        if !variables.is_empty() {
            rendered.push('(');
            rendered.push_str(&variables.join(", "));
            rendered.push(')');
        }

        selection::render(std::slice::from_ref(&operation), &mut rendered);

        let mut spreads = Vec::new();
        operation.collect_spreads(&mut spreads);

        let mut pending = spreads
            .into_iter()
            .map(|(type_name, size)| (type_name.to_owned(), size))
            .collect::<IndexSet<_>>();

        let fragment_builder = FragmentBuilder::new(self.index);
        let mut position = 0;

        while let Some((type_name, size)) = pending.get_index(position).cloned() {
            let fragment = fragment_builder.build(&type_name, size)?;

            rendered.push_str("\n\n");
            rendered.push_str(&fragment.to_string());

            let dependencies = fragment
                .spreads()
                .into_iter()
                .map(|(type_name, size)| (type_name.to_owned(), size))
                .collect::<Vec<_>>();

            pending.extend(dependencies);
            position += 1;
        }

        tracing::debug!(
            page_operation = page_operation.name(),
            types = types.len(),
            fragments = pending.len(),
            "built query vector"
        );

        Ok(rendered)
    }

    fn page_operation(&self, root: &str) -> Result<FieldEdge<'a>, Error> {
        let query = self
            .index
            .root_type(OperationKind::Query)
            .ok_or(Error::MissingRootType(OperationKind::Query.as_str()))?;

        let mut candidates = self
            .index
            .fields(query)
            .iter()
            .filter(|edge| edge.returns_list() && edge.target() == root);

        match &self.page_operation {
            Some(operation) => candidates
                .find(|edge| edge.name() == operation.as_str())
                .copied()
                .ok_or_else(|| Error::UnknownPageOperation {
                    operation: operation.clone(),
                    type_name: root.to_owned(),
                }),
            None => candidates
                .next()
                .copied()
                .ok_or_else(|| Error::NoPageOperation(root.to_owned())),
        }
    }
}

/// `invitations { user { ...UserMediumFragment } }` for the path `Event.invitations -> Invitation.user`.
fn nested_selection(path: &[Hop<'_>], target: &str) -> Selection {
    let mut selection = Selection::spread(target, FragmentSize::Medium);

    for (position, hop) in path.iter().enumerate().rev() {
        let last = position + 1 == path.len();

        let inner = if hop.through_union() && !last {
            Selection::InlineFragment {
                type_condition: hop.target.to_owned(),
                selection_set: vec![selection],
            }
        } else {
            selection
        };

        selection = Selection::field(hop.field, vec![inner]);
    }

    selection
}
