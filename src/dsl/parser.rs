//! Parser for the flowchart DSL.
//!
//! Turns classified lines into [`Statement`]s. Every function here is total:
//! fragments that do not fit the grammar degrade to bare node references.

use super::ast::*;
use super::lexer::{Lexer, Line, LineKind};
use crate::graph::NodeType;

/// Parser over a stream of classified lines.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self { lexer }
    }

    /// Parse every remaining line into statements.
    pub fn parse(&mut self) -> Vec<Statement> {
        self.by_ref().collect()
    }
}

impl Iterator for Parser<'_> {
    type Item = Statement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lexer.next()?;
            if let Some(statement) = parse_line(&line) {
                return Some(statement);
            }
        }
    }
}

/// Parse one classified line.
///
/// Returns `None` only when the line holds nothing usable as a node, such as
/// a bare `-->`.
pub fn parse_line(line: &Line<'_>) -> Option<Statement> {
    match line.kind {
        LineKind::Declaration => parse_node_ref(line.text).map(Statement::Declaration),
        LineKind::Edge => parse_edge_line(line.text),
    }
}

/// Decompose `source --> [|label|] target`.
///
/// If one side is empty the other is kept as a declaration so no node
/// mentioned on the line is lost.
pub fn parse_edge_line(text: &str) -> Option<Statement> {
    let Some((left, remainder)) = text.split_once(EDGE_MARKER) else {
        return parse_node_ref(text).map(Statement::Declaration);
    };

    let (label, right) = split_edge_label(remainder);
    match (parse_node_ref(left), parse_node_ref(right)) {
        (Some(source), Some(target)) => Some(Statement::Edge(EdgeRef {
            source,
            target,
            label: label.to_string(),
        })),
        (Some(only), None) | (None, Some(only)) => {
            tracing::debug!(
                line = text,
                node = %only.id,
                "edge line missing an endpoint, kept as declaration"
            );
            Some(Statement::Declaration(only))
        }
        (None, None) => None,
    }
}

/// Split the text after `-->` into `(label, target fragment)`.
///
/// Everything between the first and last `|` is the label; everything after
/// the last `|` is the target.
pub fn split_edge_label(remainder: &str) -> (&str, &str) {
    match (remainder.find(LABEL_DELIMITER), remainder.rfind(LABEL_DELIMITER)) {
        (Some(first), Some(last)) if first < last => {
            (remainder[first + 1..last].trim(), &remainder[last + 1..])
        }
        (Some(_), Some(last)) => ("", &remainder[last + 1..]),
        _ => ("", remainder),
    }
}

/// Extract a node reference from one fragment of a line.
///
/// Returns `None` for an empty fragment. A fragment that starts with a
/// delimiter takes the first word inside it as id (`[Do thing]` is the node
/// `Do` labeled `Do thing`), so the id always survives being written back.
pub fn parse_node_ref(fragment: &str) -> Option<NodeRef> {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return None;
    }

    let ident = match extract_identifier(fragment) {
        "" => first_word(fragment).unwrap_or(fragment),
        ident => ident,
    };
    let id = ident.to_string();
    let shaped = match_shape(fragment);

    Some(match shaped {
        Some((node_type, inner)) => NodeRef {
            label: if inner.is_empty() { id.clone() } else { inner.to_string() },
            id,
            node_type,
        },
        None => NodeRef::bare(id),
    })
}

/// The leading run of a fragment before the first shape delimiter or whitespace.
pub fn extract_identifier(fragment: &str) -> &str {
    let fragment = fragment.trim();
    let end = fragment
        .find(|c: char| c.is_whitespace() || IDENT_TERMINATORS.contains(&c))
        .unwrap_or(fragment.len());
    &fragment[..end]
}

/// Shape of a fragment, by the first matching rule in [`SHAPE_RULES`].
///
/// Defaults to [`NodeType::State`] when no delimiter pair is present.
pub fn extract_shape(fragment: &str) -> NodeType {
    match_shape(fragment.trim())
        .map(|(node_type, _)| node_type)
        .unwrap_or_default()
}

/// Display label of a fragment: the text inside the first matching delimiter
/// pair, or the identifier when there is none.
pub fn extract_label(fragment: &str) -> String {
    parse_node_ref(fragment)
        .map(|node| node.label)
        .unwrap_or_default()
}

// First run of text that is neither whitespace nor a shape delimiter.
fn first_word(fragment: &str) -> Option<&str> {
    fragment
        .split(|c: char| c.is_whitespace() || SHAPE_DELIMITERS.contains(&c))
        .find(|word| !word.is_empty())
}

// Inner text runs from the opening delimiter to the last closing one, so
// labels may contain the closing delimiter themselves.
fn match_shape(fragment: &str) -> Option<(NodeType, &str)> {
    SHAPE_RULES.iter().find_map(|rule| {
        let open = fragment.find(rule.open)?;
        let inner_start = open + rule.open.len();
        let inner_len = fragment[inner_start..].rfind(rule.close)?;
        Some((
            rule.node_type,
            fragment[inner_start..inner_start + inner_len].trim(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, node_type: NodeType, label: &str) -> NodeRef {
        NodeRef {
            id: id.to_string(),
            node_type,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_parse_bare_node() {
        assert_eq!(parse_node_ref("  A  "), Some(NodeRef::bare("A")));
    }

    #[test]
    fn test_parse_shapes() {
        assert_eq!(parse_node_ref("A((Start))"), Some(node("A", NodeType::State, "Start")));
        assert_eq!(parse_node_ref("B[Do thing]"), Some(node("B", NodeType::Action, "Do thing")));
        assert_eq!(parse_node_ref("C{Check}"), Some(node("C", NodeType::Choice, "Check")));
    }

    #[test]
    fn test_shape_precedence() {
        // Double parentheses win over brackets wherever they appear.
        assert_eq!(extract_shape("A[f((x))]"), NodeType::State);
        assert_eq!(extract_shape("A{[x]}"), NodeType::Action);
        assert_eq!(extract_shape("A(x)"), NodeType::State);
    }

    #[test]
    fn test_unclosed_delimiter_falls_through() {
        let parsed = parse_node_ref("A[oops").unwrap();
        assert_eq!(parsed, NodeRef::bare("A"));
    }

    #[test]
    fn test_label_may_contain_closing_delimiter() {
        assert_eq!(extract_label("A[list [1]]"), "list [1]");
    }

    #[test]
    fn test_empty_label_defaults_to_id() {
        assert_eq!(parse_node_ref("A[]"), Some(node("A", NodeType::Action, "A")));
    }

    #[test]
    fn test_identifier_stops_at_whitespace() {
        assert_eq!(extract_identifier("Start here"), "Start");
        assert_eq!(extract_identifier("Go{Ready?}"), "Go");
    }

    #[test]
    fn test_fragment_without_identifier() {
        assert_eq!(parse_node_ref("[Go]"), Some(node("Go", NodeType::Action, "Go")));
        assert_eq!(parse_node_ref("[oops"), Some(NodeRef::bare("oops")));
        assert_eq!(parse_node_ref("   "), None);
    }

    #[test]
    fn test_fallback_id_is_first_word() {
        assert_eq!(
            parse_node_ref("[Do thing]"),
            Some(node("Do", NodeType::Action, "Do thing"))
        );
        assert_eq!(
            parse_node_ref("(( {Wait} here ))"),
            Some(node("Wait", NodeType::State, "{Wait} here"))
        );
        assert_eq!(parse_node_ref("[]"), Some(node("[]", NodeType::Action, "[]")));
    }

    #[test]
    fn test_parse_labeled_edge() {
        let statement = parse_edge_line("A[Do thing]-->|yes| B{Check}").unwrap();
        assert_eq!(
            statement,
            Statement::Edge(EdgeRef {
                source: node("A", NodeType::Action, "Do thing"),
                target: node("B", NodeType::Choice, "Check"),
                label: "yes".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_unlabeled_edge() {
        let Some(Statement::Edge(edge)) = parse_edge_line("A --> B") else {
            panic!("expected edge");
        };
        assert_eq!(edge.source.id, "A");
        assert_eq!(edge.target.id, "B");
        assert_eq!(edge.label, "");
    }

    #[test]
    fn test_edge_label_is_trimmed() {
        assert_eq!(split_edge_label("|  maybe later |C"), ("maybe later", "C"));
        assert_eq!(split_edge_label("||C"), ("", "C"));
        assert_eq!(split_edge_label("|C"), ("", "C"));
        assert_eq!(split_edge_label(" C"), ("", " C"));
    }

    #[test]
    fn test_edge_missing_endpoint_becomes_declaration() {
        assert_eq!(
            parse_edge_line("A -->"),
            Some(Statement::Declaration(NodeRef::bare("A")))
        );
        assert_eq!(
            parse_edge_line("--> B[Run]"),
            Some(Statement::Declaration(node("B", NodeType::Action, "Run")))
        );
        assert_eq!(parse_edge_line("-->"), None);
    }

    #[test]
    fn test_parser_iterates_statements() {
        let statements = Parser::new(Lexer::new("graph TD\nA\nA-->B\n-->")).parse();
        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[0], Statement::Declaration(_)));
        assert!(matches!(statements[1], Statement::Edge(_)));
    }
}
