use std::collections::HashMap;

use cynic_parser::{
    common::OperationType,
    executable::{FragmentDefinition, Iter, OperationDefinition, Selection},
    type_system::{Definition, FieldDefinition, TypeDefinition},
    ExecutableDocument,
};
use indexmap::IndexSet;

use crate::{schema_index::fold_description, Error, OperationKind, SchemaIndex, TypeKind};

const MISSING_DESCRIPTION: &str = "missing description";

struct FieldInfo<'a> {
    ty: &'a str,
    description: Option<String>,
    definition: FieldDefinition<'a>,
}

/// Documents a query with `@param`, `@returns` and `@property` comment lines.
///
/// Field descriptions come from every object and interface field of the schema, including fields
/// the index was told to disable: a hand-written query may still select them.
pub struct QueryAnnotator<'i, 'a> {
    index: &'i SchemaIndex<'a>,
    fields: HashMap<(&'a str, &'a str), FieldInfo<'a>>,
}

impl<'i, 'a> QueryAnnotator<'i, 'a> {
    pub fn new(index: &'i SchemaIndex<'a>) -> Self {
        let mut fields = HashMap::new();

        for definition in index.document().definitions() {
            let (Definition::Type(ty) | Definition::TypeExtension(ty)) = definition else {
                continue;
            };

            let type_fields = match ty {
                TypeDefinition::Object(object) => object.fields(),
                TypeDefinition::Interface(interface) => interface.fields(),
                _ => continue,
            };

            for field in type_fields {
                let info = FieldInfo {
                    ty: field.ty().name(),
                    description: field
                        .description()
                        .map(|description| fold_description(&description.to_cow())),
                    definition: field,
                };

                fields.insert((ty.name(), field.name()), info);
            }
        }

        QueryAnnotator { index, fields }
    }

    /// Parses `query` and returns the documentation header, a blank line and the pretty printed query.
    ///
    /// Comments of the original query are not carried over.
    pub fn annotate(&self, query: &str) -> Result<String, Error> {
        let document = cynic_parser::parse_executable_document(query)?;

        let mut header = String::new();
        let mut properties = Walk {
            document: &document,
            seen: IndexSet::new(),
            fragment_stack: Vec::new(),
            lines: String::new(),
        };

        for operation in document.operations() {
            let kind = match operation.operation_type() {
                OperationType::Query => OperationKind::Query,
                OperationType::Mutation => OperationKind::Mutation,
                OperationType::Subscription => OperationKind::Subscription,
            };

            let root = self
                .index
                .root_type(kind)
                .ok_or(Error::MissingRootType(kind.as_str()))?;

            self.write_params(operation, root, &mut header);
            self.walk(operation.selection_set(), root, "", &mut properties);
        }

        header.push_str("# @returns {Object}\n");
        header.push_str(&properties.lines);

        tracing::debug!(properties = properties.seen.len(), "annotated query");

        Ok(format!("{header}\n{}", document.to_string_pretty().trim_end()))
    }

    fn write_params(&self, operation: OperationDefinition<'_>, root: &str, header: &mut String) {
        for variable in operation.variable_definitions() {
            let description = self.variable_description(operation, root, variable.name());

            header.push_str(&format!(
                "# @param {{{}}} {} - {description}\n",
                variable.ty(),
                variable.name()
            ));
        }
    }

    /// Looks for an argument named like the variable on the root fields of the operation. Its own
    /// description wins, then the description of its input type.
    fn variable_description(&self, operation: OperationDefinition<'_>, root: &str, variable: &str) -> String {
        let arguments = operation
            .selection_set()
            .filter_map(|selection| match selection {
                Selection::Field(field) => self.fields.get(&(root, field.name())),
                _ => None,
            })
            .flat_map(|info| info.definition.arguments());

        for argument in arguments {
            if argument.name() != variable {
                continue;
            }

            let description = argument
                .description()
                .map(|description| fold_description(&description.to_cow()))
                .filter(|description| !description.is_empty())
                .or_else(|| self.index.description(argument.ty().name()).map(fold_description));

            if let Some(description) = description {
                return description;
            }
        }

        MISSING_DESCRIPTION.to_owned()
    }

    fn walk<'d>(&self, selection_set: Iter<'d, Selection<'d>>, parent: &str, path: &str, state: &mut Walk<'d>) {
        for selection in selection_set {
            match selection {
                Selection::Field(field) => {
                    if field.name() == "__typename" || self.index.kind(parent) == Some(TypeKind::Union) {
                        continue;
                    }

                    let Some(info) = self.fields.get(&(parent, field.name())) else {
                        tracing::warn!(parent, field = field.name(), "field is not defined in the schema");
                        continue;
                    };

                    let key = field.alias().unwrap_or(field.name());
                    let path = if path.is_empty() {
                        key.to_owned()
                    } else {
                        format!("{path}.{key}")
                    };

                    state.property(&path, info.ty, info.description.as_deref());
                    self.walk(field.selection_set(), info.ty, &path, state);
                }
                Selection::InlineFragment(fragment) => {
                    let condition = fragment.type_condition().unwrap_or(parent);

                    self.union_member(parent, condition, path, state);
                    self.walk(fragment.selection_set(), condition, path, state);
                }
                Selection::FragmentSpread(spread) => {
                    let name = spread.fragment_name();

                    if state.fragment_stack.contains(&name) {
                        continue;
                    }

                    let Some(fragment) = state.fragment(name) else {
                        tracing::warn!(fragment = name, "spread of an undefined fragment");
                        continue;
                    };

                    self.union_member(parent, fragment.type_condition(), path, state);

                    state.fragment_stack.push(name);
                    self.walk(fragment.selection_set(), fragment.type_condition(), path, state);
                    state.fragment_stack.pop();
                }
            }
        }
    }

    /// A fragment narrowing a union field to one of its members documents the member at the path of
    /// the field.
    fn union_member(&self, parent: &str, member: &str, path: &str, state: &mut Walk<'_>) {
        if path.is_empty() || member == parent || self.index.kind(parent) != Some(TypeKind::Union) {
            return;
        }

        let description = self.index.description(member).map(fold_description);
        state.property(path, member, description.as_deref());
    }
}

struct Walk<'d> {
    document: &'d ExecutableDocument,
    seen: IndexSet<(String, String)>,
    fragment_stack: Vec<&'d str>,
    lines: String,
}

impl<'d> Walk<'d> {
    fn fragment(&self, name: &str) -> Option<FragmentDefinition<'d>> {
        self.document.fragments().find(|fragment| fragment.name() == name)
    }

    /// Adds a `@property` line unless the path is already documented with this type.
    fn property(&mut self, path: &str, ty: &str, description: Option<&str>) {
        if !self.seen.insert((path.to_owned(), ty.to_owned())) {
            return;
        }

        let description = description.filter(|description| !description.is_empty());

        self.lines.push_str(&format!(
            "# @property {{{ty}}} {path} - {}\n",
            description.unwrap_or(MISSING_DESCRIPTION)
        ));
    }
}
