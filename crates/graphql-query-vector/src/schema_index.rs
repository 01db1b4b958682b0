use std::collections::{HashMap, HashSet};

use cynic_parser::{
    common::WrappingType,
    type_system::{Definition, FieldDefinition, TypeDefinition},
    TypeSystemDocument,
};
use indexmap::{IndexMap, IndexSet};

use crate::Error;

const BUILTIN_SCALARS: &[&str] = &["ID", "Int", "Float", "String", "Boolean"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl TypeKind {
    /// Object, interface and union types can carry a selection set.
    pub fn is_composite(self) -> bool {
        matches!(self, TypeKind::Object | TypeKind::Interface | TypeKind::Union)
    }

    pub fn is_leaf(self) -> bool {
        matches!(self, TypeKind::Scalar | TypeKind::Enum)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

/// A field of an object or interface type, pointing at the innermost named type it returns.
#[derive(Clone, Copy)]
pub struct FieldEdge<'a> {
    name: &'a str,
    target: &'a str,
    returns_list: bool,
    requires_arguments: bool,
    definition: FieldDefinition<'a>,
}

impl<'a> FieldEdge<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The field type with all list and non-null wrappers removed.
    pub fn target(&self) -> &'a str {
        self.target
    }

    pub fn returns_list(&self) -> bool {
        self.returns_list
    }

    /// Whether the field has a non-null argument without a default value.
    pub fn requires_arguments(&self) -> bool {
        self.requires_arguments
    }

    pub fn definition(&self) -> FieldDefinition<'a> {
        self.definition
    }
}

impl std::fmt::Debug for FieldEdge<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldEdge")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("returns_list", &self.returns_list)
            .field("requires_arguments", &self.requires_arguments)
            .finish()
    }
}

/// Lookup structures over a parsed SDL document.
///
/// Built once per document and never mutated afterwards, so a single index can be shared between
/// concurrent builds. Field names passed as disabled are dropped at construction and never show up
/// in a path or a fragment.
pub struct SchemaIndex<'a> {
    document: &'a TypeSystemDocument,
    query_type: Option<&'a str>,
    mutation_type: Option<&'a str>,
    subscription_type: Option<&'a str>,
    kinds: HashMap<&'a str, TypeKind>,
    adjacency: IndexMap<&'a str, Vec<FieldEdge<'a>>>,
    descriptions: HashMap<&'a str, Option<String>>,
    union_members: HashMap<&'a str, IndexSet<&'a str>>,
}

impl<'a> SchemaIndex<'a> {
    pub fn new(document: &'a TypeSystemDocument) -> Result<Self, Error> {
        Self::with_disabled_fields(document, std::iter::empty::<&str>())
    }

    pub fn with_disabled_fields<I, S>(document: &'a TypeSystemDocument, disabled_fields: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let disabled: HashSet<String> = disabled_fields.into_iter().map(|f| f.as_ref().to_owned()).collect();

        let mut index = SchemaIndex {
            document,
            query_type: None,
            mutation_type: None,
            subscription_type: None,
            kinds: BUILTIN_SCALARS.iter().map(|name| (*name, TypeKind::Scalar)).collect(),
            adjacency: IndexMap::new(),
            descriptions: HashMap::new(),
            union_members: HashMap::new(),
        };

        let mut explicit_roots = false;

        for definition in document.definitions() {
            match definition {
                Definition::Schema(schema) | Definition::SchemaExtension(schema) => {
                    explicit_roots = true;

                    if let Some(query) = schema.query_type() {
                        index.query_type = Some(query.named_type());
                    }
                    if let Some(mutation) = schema.mutation_type() {
                        index.mutation_type = Some(mutation.named_type());
                    }
                    if let Some(subscription) = schema.subscription_type() {
                        index.subscription_type = Some(subscription.named_type());
                    }
                }
                Definition::Directive(_) => (),
                Definition::Type(ty) | Definition::TypeExtension(ty) => index.ingest_type(ty, &disabled),
            }
        }

        if !index.kinds.values().any(|kind| *kind == TypeKind::Object) {
            return Err(Error::Schema("the document contains no object type definitions".into()));
        }

        if !explicit_roots {
            let defined = |name: &'static str| index.kinds.get(name).is_some_and(|kind| *kind == TypeKind::Object);
            index.query_type = defined("Query").then_some("Query");
            index.mutation_type = defined("Mutation").then_some("Mutation");
            index.subscription_type = defined("Subscription").then_some("Subscription");
        }

        tracing::debug!(
            types = index.kinds.len() - BUILTIN_SCALARS.len(),
            composite = index.adjacency.len(),
            unions = index.union_members.len(),
            "indexed schema"
        );

        Ok(index)
    }

    fn ingest_type(&mut self, ty: TypeDefinition<'a>, disabled: &HashSet<String>) {
        let name = ty.name();

        if let Some(description) = ty.description() {
            self.descriptions.insert(name, Some(description.to_cow().into_owned()));
        } else {
            self.descriptions.entry(name).or_insert(None);
        }

        let fields = match ty {
            TypeDefinition::Scalar(_) => {
                self.kinds.insert(name, TypeKind::Scalar);
                return;
            }
            TypeDefinition::Enum(_) => {
                self.kinds.insert(name, TypeKind::Enum);
                return;
            }
            TypeDefinition::InputObject(_) => {
                self.kinds.insert(name, TypeKind::InputObject);
                return;
            }
            TypeDefinition::Union(union) => {
                self.kinds.insert(name, TypeKind::Union);
                self.union_members
                    .entry(name)
                    .or_default()
                    .extend(union.members().map(|member| member.name()));
                return;
            }
            TypeDefinition::Object(object) => {
                self.kinds.insert(name, TypeKind::Object);
                object.fields()
            }
            TypeDefinition::Interface(interface) => {
                self.kinds.insert(name, TypeKind::Interface);
                interface.fields()
            }
        };

        let edges = self.adjacency.entry(name).or_default();

        for field in fields {
            if disabled.contains(field.name()) {
                continue;
            }

            let ty = field.ty();
            let requires_arguments = field.arguments().any(|argument| {
                let non_null = matches!(argument.ty().wrappers().next(), Some(WrappingType::NonNull));
                non_null && argument.default_value().is_none()
            });

            edges.push(FieldEdge {
                name: field.name(),
                target: ty.name(),
                returns_list: ty.wrappers().any(|wrapper| matches!(wrapper, WrappingType::List)),
                requires_arguments,
                definition: field,
            });
        }
    }

    pub fn document(&self) -> &'a TypeSystemDocument {
        self.document
    }

    pub fn kind(&self, type_name: &str) -> Option<TypeKind> {
        self.kinds.get(type_name).copied()
    }

    /// The name as borrowed from the schema document.
    pub fn type_name(&self, type_name: &str) -> Option<&'a str> {
        self.kinds.get_key_value(type_name).map(|(name, _)| *name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.kinds.contains_key(type_name)
    }

    /// The fields of an object or interface type in declaration order. Empty for any other type.
    pub fn fields(&self, type_name: &str) -> &[FieldEdge<'a>] {
        self.adjacency.get(type_name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldEdge<'a>> {
        self.fields(type_name).iter().find(|edge| edge.name == field_name)
    }

    pub fn description(&self, type_name: &str) -> Option<&str> {
        self.descriptions.get(type_name).and_then(|description| description.as_deref())
    }

    pub fn union_members(&self, type_name: &str) -> Option<&IndexSet<&'a str>> {
        self.union_members.get(type_name)
    }

    pub fn root_type(&self, kind: OperationKind) -> Option<&'a str> {
        match kind {
            OperationKind::Query => self.query_type,
            OperationKind::Mutation => self.mutation_type,
            OperationKind::Subscription => self.subscription_type,
        }
    }
}

/// Descriptions end up in single-line comments.
pub(crate) fn fold_description(description: &str) -> String {
    description.split_whitespace().collect::<Vec<_>>().join(" ")
}
