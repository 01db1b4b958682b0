use std::{fs, io, path::Path};

use anyhow::{anyhow, Context};
use graphql_query_vector::{FragmentBuilder, FragmentSize, PathFinder, QueryAnnotator, QueryVectorBuilder, SchemaIndex};

use crate::{
    args::{BuildArgs, Command, OutputFormat},
    config::Config,
};

#[derive(serde::Serialize)]
struct BuildOutput<'a> {
    types: &'a [String],
    query: &'a str,
}

/// Runs one command against the schema and returns what goes to stdout.
pub(crate) fn run(command: &Command, sdl: &str, config: &Config) -> anyhow::Result<String> {
    let document = cynic_parser::parse_type_system_document(sdl).context("could not parse the schema")?;

    match command {
        Command::Build(args) => build(&document, args, config),
        Command::Explain { query } => {
            let index = SchemaIndex::with_disabled_fields(&document, &config.disabled_fields)?;
            let query = read_query(query)?;

            Ok(QueryAnnotator::new(&index).annotate(&query)?)
        }
        Command::Fragment { type_name, large } => {
            let index = SchemaIndex::with_disabled_fields(&document, &config.disabled_fields)?;
            let size = if *large { FragmentSize::Large } else { FragmentSize::Medium };
            let fragment = FragmentBuilder::new(&index).build(type_name, size)?.to_string();
            let document = cynic_parser::parse_executable_document(&fragment)?;

            Ok(document.to_string_pretty().trim_end().to_owned())
        }
        Command::Path { from, to } => {
            let index = SchemaIndex::with_disabled_fields(&document, &config.disabled_fields)?;

            for type_name in [from, to] {
                if !index.contains(type_name) {
                    return Err(graphql_query_vector::Error::UnknownType(type_name.clone()).into());
                }
            }

            let path = PathFinder::new(&index).find(from, to);

            if path.is_empty() {
                return Err(anyhow!("no field path leads from `{from}` to `{to}`"));
            }

            let mut rendered = path
                .iter()
                .map(|hop| format!("{}.{}", hop.parent, hop.field))
                .collect::<Vec<_>>();

            rendered.push(to.clone());

            Ok(rendered.join(" -> "))
        }
    }
}

fn build(document: &cynic_parser::TypeSystemDocument, args: &BuildArgs, config: &Config) -> anyhow::Result<String> {
    let disabled_fields = config.disabled_fields.iter().chain(&args.disabled_fields);
    let index = SchemaIndex::with_disabled_fields(document, disabled_fields)?;

    let page_operation = args.page_operation.clone().or_else(|| {
        args.types
            .first()
            .and_then(|root| config.page_operations.get(root))
            .cloned()
    });

    let mut builder = QueryVectorBuilder::new(&index);

    if let Some(page_operation) = page_operation {
        tracing::debug!(%page_operation, "using page operation");
        builder = builder.with_page_operation(page_operation);
    }

    let mut query = builder.build(&args.types)?;

    if args.explain || config.explain {
        query = QueryAnnotator::new(&index).annotate(&query)?;
    }

    match args.format {
        OutputFormat::Text => Ok(query),
        OutputFormat::Json => {
            let output = BuildOutput {
                types: &args.types,
                query: &query,
            };

            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}

fn read_query(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        return io::read_to_string(io::stdin()).context("could not read the query from stdin");
    }

    fs::read_to_string(path).with_context(|| format!("could not read the query at {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SCHEMA: &str = indoc::indoc! {r#"
        type Query {
          eventPage(skip: Int, limit: Int): [Event]
          upcomingEvents: [Event!]!
        }

        type Event {
          id: ID
          name: String
          createdBy: User
          invitations: [Invitation]
        }

        type Invitation {
          id: ID
          user: User
        }

        type User {
          id: ID
          name: String
        }

        type Orphan {
          id: ID
        }
    "#};

    fn build_args(types: &[&str]) -> BuildArgs {
        BuildArgs {
            types: types.iter().map(|ty| ty.to_string()).collect(),
            page_operation: None,
            disabled_fields: Vec::new(),
            explain: false,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn build_with_configured_page_operation() {
        let config = Config {
            page_operations: [("Event".to_string(), "upcomingEvents".to_string())].into(),
            disabled_fields: vec!["createdBy".to_string()],
            ..Default::default()
        };

        let output = run(&Command::Build(build_args(&["Event", "User"])), SCHEMA, &config).unwrap();

        insta::assert_snapshot!(output, @r###"
        query upcomingEvents { upcomingEvents { ...EventMediumFragment ...EventLargeFragment invitations { user { ...UserMediumFragment } } } }

        fragment EventMediumFragment on Event { id name }

        fragment EventLargeFragment on Event { id name invitations { ...InvitationMediumFragment } }

        fragment UserMediumFragment on User { id name }

        fragment InvitationMediumFragment on Invitation { id }
        "###);
    }

    #[test]
    fn command_line_page_operation_wins() {
        let config = Config {
            page_operations: [("Event".to_string(), "upcomingEvents".to_string())].into(),
            ..Default::default()
        };

        let mut args = build_args(&["Event"]);
        args.page_operation = Some("eventPage".to_string());

        let output = run(&Command::Build(args), SCHEMA, &config).unwrap();

        assert!(output.contains("query eventPage($skip: Int, $limit: Int)"), "{output}");
    }

    #[test]
    fn build_as_json() {
        let mut args = build_args(&["Event"]);
        args.format = OutputFormat::Json;
        args.disabled_fields = vec!["createdBy".to_string(), "invitations".to_string()];
        args.page_operation = Some("upcomingEvents".to_string());

        let output = run(&Command::Build(args), SCHEMA, &Config::default()).unwrap();

        insta::assert_snapshot!(output, @r###"
        {
          "types": [
            "Event"
          ],
          "query": "query upcomingEvents { upcomingEvents { ...EventMediumFragment ...EventLargeFragment } }\n\nfragment EventMediumFragment on Event { id name }\n\nfragment EventLargeFragment on Event { id name }"
        }
        "###);
    }

    #[test]
    fn build_with_explanation() {
        let mut args = build_args(&["Event"]);
        args.explain = true;
        args.page_operation = Some("upcomingEvents".to_string());
        args.disabled_fields = vec!["createdBy".to_string(), "invitations".to_string()];

        let output = run(&Command::Build(args), SCHEMA, &Config::default()).unwrap();

        insta::assert_snapshot!(output, @r###"
        # @returns {Object}
        # @property {Event} upcomingEvents - missing description
        # @property {ID} upcomingEvents.id - missing description
        # @property {String} upcomingEvents.name - missing description

        query upcomingEvents {
          upcomingEvents {
            ...EventMediumFragment
            ...EventLargeFragment
          }
        }

        fragment EventMediumFragment on Event {
          id
          name
        }

        fragment EventLargeFragment on Event {
          id
          name
        }
        "###);
    }

    #[test]
    fn explain_a_query_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "query {{ eventPage(limit: 2) {{ name invitations {{ user {{ id }} }} }} }}").unwrap();

        let command = Command::Explain {
            query: file.path().to_path_buf(),
        };

        let output = run(&command, SCHEMA, &Config::default()).unwrap();

        insta::assert_snapshot!(output, @r###"
        # @returns {Object}
        # @property {Event} eventPage - missing description
        # @property {String} eventPage.name - missing description
        # @property {Invitation} eventPage.invitations - missing description
        # @property {User} eventPage.invitations.user - missing description
        # @property {ID} eventPage.invitations.user.id - missing description

        {
          eventPage(limit: 2) {
            name
            invitations {
              user {
                id
              }
            }
          }
        }
        "###);
    }

    #[test]
    fn fragments() {
        let command = Command::Fragment {
            type_name: "Event".to_string(),
            large: true,
        };

        let output = run(&command, SCHEMA, &Config::default()).unwrap();

        insta::assert_snapshot!(output, @r###"
        fragment EventLargeFragment on Event {
          id
          name
          createdBy {
            ...UserMediumFragment
          }
          invitations {
            ...InvitationMediumFragment
          }
        }
        "###);
    }

    #[test]
    fn paths() {
        let command = Command::Path {
            from: "Event".to_string(),
            to: "User".to_string(),
        };

        let config = Config {
            disabled_fields: vec!["createdBy".to_string()],
            ..Default::default()
        };

        let output = run(&command, SCHEMA, &config).unwrap();
        assert_eq!(output, "Event.invitations -> Invitation.user -> User");

        let output = run(&command, SCHEMA, &Config::default()).unwrap();
        assert_eq!(output, "Event.createdBy -> User");
    }

    #[test]
    fn unreachable_paths_fail() {
        let command = Command::Path {
            from: "Event".to_string(),
            to: "Orphan".to_string(),
        };

        let error = run(&command, SCHEMA, &Config::default()).unwrap_err();
        insta::assert_snapshot!(error, @"no field path leads from `Event` to `Orphan`");

        let command = Command::Path {
            from: "Event".to_string(),
            to: "Nope".to_string(),
        };

        let error = run(&command, SCHEMA, &Config::default()).unwrap_err();
        insta::assert_snapshot!(error, @"unknown type `Nope`");
    }

    #[test]
    fn invalid_schema() {
        let error = run(&Command::Build(build_args(&["Event"])), "type Query {", &Config::default()).unwrap_err();

        insta::assert_snapshot!(error, @"could not parse the schema");
    }
}
