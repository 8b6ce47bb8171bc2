//! Final per-line presentation values for one document.

use serde::{Deserialize, Serialize};

use linecast_highlight::{highlight_value, highlight_with, Segment};
use linecast_types::Side;

use crate::annotation::Projection;
use crate::block::BlockIndex;
use crate::config::{DocumentKind, ProjectionConfig};
use crate::resolver::{resolve, LineStyle, Resolution};

/// Split a document into lines the way they are numbered: on `\n`, with a
/// trailing `\r` removed. A trailing newline yields a final empty line.
pub fn document_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// One rendered line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineView {
    /// 1-based line number.
    pub number: usize,
    #[serde(flatten)]
    pub resolution: Resolution,
    /// The line text cut into highlighted and plain runs.
    pub segments: Vec<Segment>,
}

impl LineView {
    /// The full line text.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Resolve and highlight every line of `document` on `side`.
pub fn render_side(
    projection: &Projection,
    blocks: &BlockIndex,
    side: Side,
    document: &str,
    config: &ProjectionConfig,
) -> Vec<LineView> {
    document_lines(document)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let number = i + 1;
            let statement = projection.get(side, number);
            let resolution = resolve(number, blocks.get(side, number), statement);

            let segments = match statement {
                Some(s) if resolution.highlight_tokens => {
                    highlight_with(text, &s.token_changes, side, config.highlight_mode)
                }
                Some(_)
                    if config.document_kind == DocumentKind::KeyValue
                        && matches!(resolution.style, LineStyle::Modified | LineStyle::MovedModified) =>
                {
                    highlight_value(text)
                }
                _ if text.is_empty() => Vec::new(),
                _ => vec![Segment::plain(text)],
            };

            LineView {
                number,
                resolution,
                segments,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::project;
    use linecast_highlight::HighlightMode;
    use linecast_types::{ChangeKind, ChangeNode, TokenChange};

    const DOC_A: &str = "fn main() {\n    let foo = 1;\n}\n";
    const DOC_B: &str = "fn main() {\n    let bar = 1;\n}\n";

    fn modified_tree() -> Vec<ChangeNode> {
        vec![ChangeNode::new(ChangeKind::Modified, "main")
            .with_block_type("function")
            .with_range(Side::A, 1, 3)
            .with_range(Side::B, 1, 3)
            .with_children(vec![ChangeNode::new(ChangeKind::Modified, "let")
                .with_range(Side::A, 2, 2)
                .with_range(Side::B, 2, 2)
                .with_token_changes(vec![TokenChange::new("foo", (8, 11), "bar", (8, 11))])])]
    }

    #[test]
    fn document_lines_numbering() {
        assert_eq!(document_lines("a\r\nb\n"), vec!["a", "b", ""]);
        assert_eq!(document_lines(""), vec![""]);
    }

    #[test]
    fn renders_every_line_with_highlights() {
        let roots = modified_tree();
        let projection = project(&roots).unwrap();
        let blocks = BlockIndex::build(&roots);
        let views = render_side(&projection, &blocks, Side::A, DOC_A, &ProjectionConfig::default());

        assert_eq!(views.len(), 4);
        assert!(views[0].resolution.badge.is_some());
        assert_eq!(views[0].resolution.style, LineStyle::Modified);
        assert!(!views[0].resolution.highlight_tokens);

        let second = &views[1];
        assert!(second.resolution.highlight_tokens);
        assert_eq!(
            second.segments,
            vec![
                Segment::plain("    let "),
                Segment::highlighted("foo"),
                Segment::plain(" = 1;"),
            ]
        );
        assert_eq!(second.text(), "    let foo = 1;");
        assert!(views[3].segments.is_empty());
        assert_eq!(views[3].resolution.style, LineStyle::Unchanged);
    }

    #[test]
    fn side_b_highlights_new_token() {
        let roots = modified_tree();
        let projection = project(&roots).unwrap();
        let blocks = BlockIndex::build(&roots);
        let views = render_side(&projection, &blocks, Side::B, DOC_B, &ProjectionConfig::default());
        assert_eq!(views[1].segments[1], Segment::highlighted("bar"));
    }

    #[test]
    fn key_value_documents_highlight_values() {
        let doc = "{\n  \"port\": 8080\n}";
        let roots = vec![ChangeNode::new(ChangeKind::Modified, "port")
            .with_line(Side::A, 2)
            .with_line(Side::B, 2)];
        let projection = project(&roots).unwrap();
        let blocks = BlockIndex::build(&roots);
        let config = ProjectionConfig {
            document_kind: DocumentKind::KeyValue,
            ..ProjectionConfig::default()
        };
        let views = render_side(&projection, &blocks, Side::A, doc, &config);
        assert_eq!(
            views[1].segments,
            vec![Segment::plain("  \"port\":"), Segment::highlighted(" 8080")]
        );
        assert_eq!(views[0].segments, vec![Segment::plain("{")]);
    }

    #[test]
    fn moved_key_value_line_highlights_value() {
        let doc_a = "{\n  \"port\": 80,\n  \"host\": \"a\"\n}";
        let roots = vec![ChangeNode::new(ChangeKind::MovedModified, "port")
            .with_line(Side::A, 2)
            .with_line(Side::B, 3)];
        let projection = project(&roots).unwrap();
        let blocks = BlockIndex::build(&roots);
        let config = ProjectionConfig {
            document_kind: DocumentKind::KeyValue,
            ..ProjectionConfig::default()
        };
        let views = render_side(&projection, &blocks, Side::A, doc_a, &config);
        assert_eq!(views[1].resolution.style, LineStyle::MovedModified);
        assert_eq!(
            views[1].segments,
            vec![Segment::plain("  \"port\":"), Segment::highlighted(" 80,")]
        );
    }

    #[test]
    fn line_view_json_flattens_resolution() {
        let roots = modified_tree();
        let projection = project(&roots).unwrap();
        let blocks = BlockIndex::build(&roots);
        let views = render_side(&projection, &blocks, Side::A, DOC_A, &ProjectionConfig::default());
        let json = serde_json::to_value(&views[1]).unwrap();
        assert_eq!(json["number"], 2);
        assert_eq!(json["style"], "modified");
        assert_eq!(json["highlight_tokens"], true);
        assert!(json.get("resolution").is_none());
        assert!(json.get("badge").is_none());
        assert_eq!(json["segments"][1]["text"], "foo");
        assert_eq!(json["segments"][1]["highlighted"], true);
    }

    #[test]
    fn configured_mode_reaches_highlighter() {
        let doc = "return total;";
        let roots = vec![ChangeNode::new(ChangeKind::Modified, "ret")
            .with_range(Side::A, 1, 1)
            .with_range(Side::B, 1, 1)
            .with_token_changes(vec![TokenChange::new("total", (0, 4), "sum", (0, 3))])];
        let projection = project(&roots).unwrap();
        let blocks = BlockIndex::build(&roots);
        let config = ProjectionConfig {
            highlight_mode: HighlightMode::Verified,
            ..ProjectionConfig::default()
        };
        let views = render_side(&projection, &blocks, Side::A, doc, &config);
        assert_eq!(views[0].segments[1], Segment::highlighted("total"));
    }
}
