//! # Query vectors
//!
//! Synthesizes GraphQL list queries from an ordered list of type names. The first type is the root
//! of the query: it is fetched through a "page operation", a `Query` field returning a list of it.
//! Every further type is reached along the shortest field path from the root, with the link types in
//! between selected on the way. Fragments for each type are generated from the schema and appended
//! to the operation.
//!
//! ```ignore
//! let document = cynic_parser::parse_type_system_document(sdl)?;
//! let index = SchemaIndex::with_disabled_fields(&document, ["createdBy"])?;
//!
//! let query = QueryVectorBuilder::new(&index).build(&["Event", "User"])?;
//! let explained = QueryAnnotator::new(&index).annotate(&query)?;
//! ```
//!
//! All of it is synchronous and borrows the parsed schema. Nothing here performs I/O.

mod annotate;
mod error;
mod fragments;
mod path_finder;
mod query_vector;
mod schema_index;
mod selection;

pub use annotate::QueryAnnotator;
pub use error::Error;
pub use fragments::{fragment_name, Fragment, FragmentBuilder, FragmentSize};
pub use path_finder::{Hop, PathFinder, TypePath};
pub use query_vector::QueryVectorBuilder;
pub use schema_index::{FieldEdge, OperationKind, SchemaIndex, TypeKind};
