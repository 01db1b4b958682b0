/// Errors produced while indexing a schema, building a query vector or annotating a query.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The SDL document cannot be indexed
    #[error("unusable schema: {0}")]
    Schema(String),
    /// A requested type name is not defined in the schema
    #[error("unknown type `{0}`")]
    UnknownType(String),
    /// No field path connects the root type to a requested type
    #[error("type `{target}` cannot be reached from `{root}`")]
    UnreachableType { root: String, target: String },
    /// Fragments can only be built for object, interface and union types
    #[error("type `{0}` is not an object, interface or union type")]
    NotComposite(String),
    /// No root query field returns a list of the requested root type
    #[error("no page operation returns a list of `{0}`")]
    NoPageOperation(String),
    /// An explicitly requested page operation does not fit the root type
    #[error("`{operation}` is not a Query field returning a list of `{type_name}`")]
    UnknownPageOperation { operation: String, type_name: String },
    /// Nothing to build
    #[error("at least one type name is required")]
    EmptyTypeList,
    /// The query uses an operation kind the schema has no root type for
    #[error("the schema does not define a {0} root type")]
    MissingRootType(&'static str),
    /// The GraphQL text could not be parsed
    #[error(transparent)]
    Parse(#[from] cynic_parser::Error),
}
