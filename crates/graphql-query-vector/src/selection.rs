use crate::fragments::FragmentSize;

/// A generated selection, rendered on a single line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Selection {
    Field {
        name: String,
        arguments: Vec<(String, String)>,
        selection_set: Vec<Selection>,
    },
    InlineFragment {
        type_condition: String,
        selection_set: Vec<Selection>,
    },
    FragmentSpread {
        type_name: String,
        size: FragmentSize,
    },
}

impl Selection {
    pub(crate) fn leaf(name: impl Into<String>) -> Self {
        Selection::Field {
            name: name.into(),
            arguments: Vec::new(),
            selection_set: Vec::new(),
        }
    }

    pub(crate) fn field(name: impl Into<String>, selection_set: Vec<Selection>) -> Self {
        Selection::Field {
            name: name.into(),
            arguments: Vec::new(),
            selection_set,
        }
    }

    pub(crate) fn spread(type_name: impl Into<String>, size: FragmentSize) -> Self {
        Selection::FragmentSpread {
            type_name: type_name.into(),
            size,
        }
    }

    /// All fragments spread in this selection, depth first.
    pub(crate) fn collect_spreads<'s>(&'s self, spreads: &mut Vec<(&'s str, FragmentSize)>) {
        match self {
            Selection::FragmentSpread { type_name, size } => spreads.push((type_name.as_str(), *size)),
            Selection::Field { selection_set, .. } | Selection::InlineFragment { selection_set, .. } => {
                for selection in selection_set {
                    selection.collect_spreads(spreads);
                }
            }
        }
    }
}

pub(crate) fn render(selection_set: &[Selection], rendered: &mut String) {
    let selection_count = selection_set.len();

    for (i, selection) in selection_set.iter().enumerate() {
        if i == 0 {
            rendered.push_str(" {");
        }

        match selection {
            Selection::Field {
                name,
                arguments,
                selection_set,
            } => {
                rendered.push(' ');
                rendered.push_str(name);

                let arguments_count = arguments.len();

                for (i, (name, value)) in arguments.iter().enumerate() {
                    if i == 0 {
                        rendered.push('(');
                    }

                    rendered.push_str(name);
                    rendered.push_str(": ");
                    rendered.push_str(value);

                    if i == arguments_count - 1 {
                        rendered.push(')');
                    } else {
                        rendered.push_str(", ");
                    }
                }

                render(selection_set, rendered);
            }
            Selection::InlineFragment {
                type_condition,
                selection_set,
            } => {
                rendered.push_str(" ... on ");
                rendered.push_str(type_condition);
                render(selection_set, rendered);
            }
            Selection::FragmentSpread { type_name, size } => {
                rendered.push_str(" ...");
                rendered.push_str(type_name);
                rendered.push_str(size.as_str());
                rendered.push_str("Fragment");
            }
        }

        if i == selection_count - 1 {
            rendered.push_str(" }");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_selections_on_one_line() {
        let selection_set = vec![
            Selection::spread("Event", FragmentSize::Medium),
            Selection::field(
                "invitations",
                vec![
                    Selection::leaf("id"),
                    Selection::field("user", vec![Selection::spread("User", FragmentSize::Large)]),
                ],
            ),
            Selection::InlineFragment {
                type_condition: "Loan".into(),
                selection_set: vec![Selection::leaf("id")],
            },
        ];

        let mut rendered = String::from("query");
        render(&selection_set, &mut rendered);

        insta::assert_snapshot!(rendered, @"query { ...EventMediumFragment invitations { id user { ...UserLargeFragment } } ... on Loan { id } }");
    }

    #[test]
    fn renders_arguments() {
        let selection_set = vec![Selection::Field {
            name: "eventPage".into(),
            arguments: vec![("skip".into(), "$skip".into()), ("limit".into(), "$limit".into())],
            selection_set: vec![Selection::leaf("id")],
        }];

        let mut rendered = String::new();
        render(&selection_set, &mut rendered);

        assert_eq!(rendered, " { eventPage(skip: $skip, limit: $limit) { id } }");
    }

    #[test]
    fn empty_selection_set_renders_nothing() {
        let mut rendered = String::from("id");
        render(&[], &mut rendered);

        assert_eq!(rendered, "id");
    }

    #[test]
    fn spreads_are_collected_depth_first() {
        let selection = Selection::field(
            "a",
            vec![
                Selection::spread("A", FragmentSize::Medium),
                Selection::field("b", vec![Selection::spread("B", FragmentSize::Large)]),
                Selection::spread("C", FragmentSize::Medium),
            ],
        );

        let mut spreads = Vec::new();
        selection.collect_spreads(&mut spreads);

        assert_eq!(
            spreads,
            [
                ("A", FragmentSize::Medium),
                ("B", FragmentSize::Large),
                ("C", FragmentSize::Medium)
            ]
        );
    }
}
