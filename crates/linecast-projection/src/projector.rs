//! Change tree to line maps.
//!
//! Every node with lines on a side claims each line of its span there. When
//! several nodes claim the same line, one claim owns it:
//!
//! 1. Range claims beat legacy single-line claims.
//! 2. `added`/`deleted` beat `modified`, `moved`, and `moved_modified`.
//! 3. Otherwise the deeper node wins.
//! 4. Remaining ties go to the node first in pre-order.
//!
//! A `modified` claim on a line that a `moved_modified` ancestor also claims
//! never owns the line. Token changes from every claim on a line are
//! attached to the owner. Because ownership depends only on these keys and
//! not on visiting order, the result is independent of traversal order.
//!
//! # Invariants
//!
//! - Each line of each side has at most one annotation.
//! - A move's counterpart is carried only on the start line of its range.
//! - A node with no lines on a side never creates an entry on that side.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use linecast_types::{ChangeKind, ChangeNode, LineRange, Side, Span, Tallies, TokenChange};

use crate::annotation::{LineMap, MoveLink, ProjectedAnnotation, Projection};
use crate::config::ProjectionConfig;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::{ProjectionError, ProjectionResult};

/// Project `roots` with the default configuration and no document bounds.
pub fn project(roots: &[ChangeNode]) -> ProjectionResult<Projection> {
    Projector::default().project(roots)
}

/// Projects change trees onto per-document line maps.
#[derive(Clone, Debug, Default)]
pub struct Projector {
    config: ProjectionConfig,
}

impl Projector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project `roots` without bounding lines to any document.
    pub fn project(&self, roots: &[ChangeNode]) -> ProjectionResult<Projection> {
        self.run(roots, [None, None])
    }

    /// Project `roots`, dropping lines past the end of either document.
    pub fn project_documents(
        &self,
        roots: &[ChangeNode],
        document_a: &str,
        document_b: &str,
    ) -> ProjectionResult<Projection> {
        let limits = [
            Some(crate::view::document_lines(document_a).len()),
            Some(crate::view::document_lines(document_b).len()),
        ];
        self.run(roots, limits)
    }

    fn run(
        &self,
        roots: &[ChangeNode],
        limits: [Option<usize>; 2],
    ) -> ProjectionResult<Projection> {
        let mut walker = Walker::new(&self.config, limits);
        for root in roots {
            walker.walk(root, 0)?;
        }

        let projection = Projection {
            map_a: resolve_claims(std::mem::take(&mut walker.claims[0])),
            map_b: resolve_claims(std::mem::take(&mut walker.claims[1])),
            tallies: Tallies::from_roots(roots),
            diagnostics: walker.diagnostics,
        };

        info!(
            roots = roots.len(),
            marked = walker.marked,
            lines_a = projection.map_a.len(),
            lines_b = projection.map_b.len(),
            diagnostics = projection.diagnostics.len(),
            "projection complete"
        );
        Ok(projection)
    }
}

/// One node's claim on one line.
struct Claim<'t> {
    node: &'t ChangeNode,
    seq: usize,
    depth: usize,
    legacy: bool,
    /// A `modified` claim under a `moved_modified` ancestor on the same line.
    shielded: bool,
    move_link: Option<MoveLink>,
    /// The counterpart start, on the start line of a moved range only.
    badge: Option<usize>,
}

impl Claim<'_> {
    fn rank(&self) -> (bool, bool, usize, Reverse<usize>) {
        (
            !self.legacy,
            self.node.kind.is_structural(),
            self.depth,
            Reverse(self.seq),
        )
    }
}

/// Lines claimed by a node still on the ancestor stack.
struct Ancestor {
    kind: ChangeKind,
    ranges: [Option<LineRange>; 2],
}

struct Walker<'t, 'c> {
    config: &'c ProjectionConfig,
    limits: [Option<usize>; 2],
    claims: [BTreeMap<usize, Vec<Claim<'t>>>; 2],
    ancestors: Vec<Ancestor>,
    diagnostics: Vec<Diagnostic>,
    marked: usize,
    next_seq: usize,
}

impl<'t, 'c> Walker<'t, 'c> {
    fn new(config: &'c ProjectionConfig, limits: [Option<usize>; 2]) -> Self {
        Self {
            config,
            limits,
            claims: [BTreeMap::new(), BTreeMap::new()],
            ancestors: Vec::new(),
            diagnostics: Vec::new(),
            marked: 0,
            next_seq: 0,
        }
    }

    fn walk(&mut self, node: &'t ChangeNode, depth: usize) -> ProjectionResult<()> {
        let seq = self.next_seq;
        self.next_seq += 1;

        let mut claimed = [None, None];
        if let Some(spans) = self.spans(node, seq) {
            self.check_move(node, seq, &spans);
            for side in [Side::A, Side::B] {
                let Some(span) = spans[index(side)] else {
                    continue;
                };
                if !node.kind.applies_to(side) {
                    debug!(node = node.label(), %side, kind = %node.kind, "ignoring lines on inapplicable side");
                    continue;
                }
                claimed[index(side)] = self.claim(node, seq, depth, side, span, &spans)?;
            }
        }

        self.ancestors.push(Ancestor {
            kind: node.kind,
            ranges: claimed,
        });
        for child in &node.children {
            self.walk(child, depth + 1)?;
        }
        self.ancestors.pop();
        Ok(())
    }

    /// Both spans of `node`, or `None` if the node must be skipped.
    fn spans(&mut self, node: &ChangeNode, seq: usize) -> Option<[Option<Span>; 2]> {
        let mut spans = [None, None];
        for side in [Side::A, Side::B] {
            match node.span(side) {
                Ok(span) => spans[index(side)] = span,
                Err(e) => {
                    self.report(DiagnosticKind::InvalidRange, node, seq, Some(side), e.to_string());
                    return None;
                }
            }
        }
        if spans.iter().all(Option::is_none) {
            self.report(
                DiagnosticKind::MalformedNode,
                node,
                seq,
                None,
                "no line range or line on either side".into(),
            );
            return None;
        }
        Some(spans)
    }

    fn check_move(&mut self, node: &ChangeNode, seq: usize, spans: &[Option<Span>; 2]) {
        if !node.kind.is_move() {
            return;
        }
        match spans {
            [Some(a), Some(b)] if a.range == b.range => {
                self.report(
                    DiagnosticKind::StationaryMove,
                    node,
                    seq,
                    None,
                    format!("both sides at lines {}", a.range),
                );
            }
            [Some(_), None] | [None, Some(_)] => {
                let missing = if spans[0].is_none() { Side::A } else { Side::B };
                self.report(
                    DiagnosticKind::MissingCounterpart,
                    node,
                    seq,
                    Some(missing),
                    "move has lines on one side only".into(),
                );
            }
            _ => {}
        }
    }

    /// Record `node`'s claims on `side`. Returns the lines actually claimed.
    fn claim(
        &mut self,
        node: &'t ChangeNode,
        seq: usize,
        depth: usize,
        side: Side,
        span: Span,
        spans: &[Option<Span>; 2],
    ) -> ProjectionResult<Option<LineRange>> {
        let range = match self.limits[index(side)] {
            Some(max_line) => {
                let clamped = span.range.clamp_to(max_line);
                if clamped != Some(span.range) {
                    self.report(
                        DiagnosticKind::LineOutOfDocument,
                        node,
                        seq,
                        Some(side),
                        format!("lines {} exceed document length {max_line}", span.range),
                    );
                }
                match clamped {
                    Some(range) => range,
                    None => return Ok(None),
                }
            }
            None => span.range,
        };

        let move_link = if node.kind.is_move() {
            spans[index(side.other())].map(|other| MoveLink {
                own_start: span.range.start(),
                counterpart_start: other.range.start(),
            })
        } else {
            None
        };

        let shields: Vec<LineRange> = if node.kind == ChangeKind::Modified {
            self.ancestors
                .iter()
                .filter(|a| a.kind == ChangeKind::MovedModified)
                .filter_map(|a| a.ranges[index(side)])
                .collect()
        } else {
            Vec::new()
        };

        self.marked += range.len();
        if self.marked > self.config.max_marked_lines {
            return Err(ProjectionError::TooManyLines {
                limit: self.config.max_marked_lines,
            });
        }

        let lines = &mut self.claims[index(side)];
        for line in range.lines() {
            let badge = match move_link {
                Some(link) if line == span.range.start() => Some(link.counterpart_start),
                _ => None,
            };
            lines.entry(line).or_default().push(Claim {
                node,
                seq,
                depth,
                legacy: span.is_legacy(),
                shielded: shields.iter().any(|r| r.contains(line)),
                move_link,
                badge,
            });
        }

        debug!(node = node.label(), kind = %node.kind, %side, lines = %range, depth, "claimed lines");
        Ok(Some(range))
    }

    fn report(
        &mut self,
        kind: DiagnosticKind,
        node: &ChangeNode,
        seq: usize,
        side: Option<Side>,
        message: String,
    ) {
        let diagnostic = Diagnostic {
            kind,
            identifier: node.label().to_string(),
            node_index: seq,
            side,
            message,
        };
        warn!(%diagnostic, "change node problem");
        self.diagnostics.push(diagnostic);
    }
}

fn index(side: Side) -> usize {
    match side {
        Side::A => 0,
        Side::B => 1,
    }
}

/// Pick each line's owner and gather every claim's token changes onto it.
fn resolve_claims(claims: BTreeMap<usize, Vec<Claim<'_>>>) -> LineMap {
    claims
        .into_iter()
        .filter_map(|(line, claims)| resolve_line(&claims).map(|a| (line, a)))
        .collect()
}

fn resolve_line(claims: &[Claim<'_>]) -> Option<ProjectedAnnotation> {
    let owner = claims
        .iter()
        .filter(|c| !c.shielded)
        .max_by_key(|c| c.rank())
        .or_else(|| claims.iter().max_by_key(|c| c.rank()))?;

    let mut token_changes: Vec<TokenChange> = Vec::new();
    let mut ordered: Vec<&Claim<'_>> = claims.iter().collect();
    ordered.sort_by_key(|c| c.seq);
    for claim in ordered {
        for change in &claim.node.token_changes {
            if !token_changes.contains(change) {
                token_changes.push(change.clone());
            }
        }
    }

    Some(ProjectedAnnotation {
        kind: owner.node.kind,
        identifier: owner.node.identifier.clone(),
        description: owner.node.description.clone(),
        counterpart_line: owner.badge,
        move_link: owner.move_link,
        token_changes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use linecast_types::ChangeKind::*;
    use proptest::prelude::*;

    fn node(kind: ChangeKind, id: &str) -> ChangeNode {
        ChangeNode::new(kind, id).with_description(format!("{id} description"))
    }

    fn foo_to_bar() -> TokenChange {
        TokenChange::new("foo", (4, 7), "bar", (4, 7))
    }

    #[test]
    fn modified_line_with_token_change() {
        let root = node(Modified, "f")
            .with_range(Side::A, 10, 10)
            .with_range(Side::B, 10, 10)
            .with_token_changes(vec![foo_to_bar()]);
        let p = project(&[root]).unwrap();

        let a = p.get(Side::A, 10).unwrap();
        assert_eq!(a.kind, Modified);
        assert_eq!(a.token_changes, vec![foo_to_bar()]);
        assert_eq!(a.counterpart_line, None);
        assert_eq!(p.get(Side::B, 10).unwrap().token_changes.len(), 1);
        assert_eq!(p.map_a.len(), 1);
    }

    #[test]
    fn moved_modified_absorbs_nested_modified() {
        let child_change = TokenChange::new("x", (2, 3), "y", (2, 3));
        let root = node(MovedModified, "block")
            .with_range(Side::A, 5, 8)
            .with_range(Side::B, 20, 23)
            .with_children(vec![node(Modified, "stmt")
                .with_range(Side::A, 6, 6)
                .with_range(Side::B, 21, 21)
                .with_token_changes(vec![child_change.clone()])]);
        let p = project(&[root]).unwrap();

        let start = p.get(Side::A, 5).unwrap();
        assert_eq!(start.kind, MovedModified);
        assert_eq!(start.counterpart_line, Some(20));

        let six = p.get(Side::A, 6).unwrap();
        assert_eq!(six.kind, MovedModified);
        assert_eq!(six.identifier, "block");
        assert_eq!(six.description, "block description");
        assert_eq!(six.token_changes, vec![child_change.clone()]);
        assert_eq!(six.counterpart_line, None);

        for line in [7, 8] {
            let a = p.get(Side::A, line).unwrap();
            assert_eq!(a.kind, MovedModified);
            assert!(a.token_changes.is_empty());
            assert_eq!(a.counterpart_line, None);
        }

        assert_eq!(p.get(Side::B, 20).unwrap().counterpart_line, Some(5));
        assert_eq!(p.get(Side::B, 21).unwrap().token_changes, vec![child_change]);
    }

    #[test]
    fn deleted_sibling_beats_modified_sibling() {
        let roots = vec![
            node(Modified, "first").with_range(Side::A, 12, 12).with_range(Side::B, 12, 12),
            node(Deleted, "second").with_range(Side::A, 12, 12),
        ];
        let p = project(&roots).unwrap();
        assert_eq!(p.get(Side::A, 12).unwrap().kind, Deleted);
        assert_eq!(p.get(Side::B, 12).unwrap().kind, Modified);
    }

    #[test]
    fn structural_beats_regardless_of_order() {
        let forward = vec![
            node(Deleted, "d").with_range(Side::A, 3, 3),
            node(Modified, "m").with_range(Side::A, 1, 5).with_range(Side::B, 1, 5),
        ];
        let mut backward = forward.clone();
        backward.reverse();
        let p1 = project(&forward).unwrap();
        let p2 = project(&backward).unwrap();
        assert_eq!(p1.get(Side::A, 3).unwrap().kind, Deleted);
        assert_eq!(p2.get(Side::A, 3).unwrap().kind, Deleted);
        assert_eq!(p1.map_a, p2.map_a);
    }

    #[test]
    fn added_child_overrides_moved_modified_parent() {
        let root = node(MovedModified, "block")
            .with_range(Side::A, 1, 4)
            .with_range(Side::B, 11, 15)
            .with_children(vec![node(Added, "new_stmt").with_range(Side::B, 13, 13)]);
        let p = project(&[root]).unwrap();
        assert_eq!(p.get(Side::B, 13).unwrap().kind, Added);
        assert_eq!(p.get(Side::B, 12).unwrap().kind, MovedModified);
        assert_eq!(p.get(Side::B, 11).unwrap().counterpart_line, Some(1));
    }

    #[test]
    fn deeper_node_wins_among_equal_classes() {
        let root = node(Moved, "outer")
            .with_range(Side::A, 1, 10)
            .with_range(Side::B, 31, 40)
            .with_children(vec![node(Modified, "inner")
                .with_range(Side::A, 4, 4)
                .with_range(Side::B, 34, 34)]);
        let p = project(&[root]).unwrap();
        // A moved (not moved_modified) ancestor does not shield.
        assert_eq!(p.get(Side::A, 4).unwrap().kind, Modified);
        assert_eq!(p.get(Side::A, 4).unwrap().identifier, "inner");
    }

    #[test]
    fn ties_go_to_first_in_order() {
        let roots = vec![
            node(Modified, "one").with_range(Side::A, 2, 2).with_range(Side::B, 2, 2),
            node(Modified, "two").with_range(Side::A, 2, 2).with_range(Side::B, 2, 2),
        ];
        let p = project(&roots).unwrap();
        assert_eq!(p.get(Side::A, 2).unwrap().identifier, "one");
    }

    #[test]
    fn token_changes_attach_to_structural_owner() {
        let tc = TokenChange::new("a", (0, 1), "b", (0, 1));
        let root = node(Modified, "f")
            .with_range(Side::A, 1, 3)
            .with_range(Side::B, 1, 3)
            .with_token_changes(vec![tc.clone()])
            .with_children(vec![node(Deleted, "gone").with_range(Side::A, 2, 2)]);
        let p = project(&[root]).unwrap();
        let two = p.get(Side::A, 2).unwrap();
        assert_eq!(two.kind, Deleted);
        assert_eq!(two.token_changes, vec![tc]);
    }

    #[test]
    fn move_badge_only_on_start_line() {
        let root = node(Moved, "m").with_range(Side::A, 3, 9).with_range(Side::B, 50, 56);
        let p = project(&[root]).unwrap();
        let badges_a: Vec<usize> = p.map_a.iter().filter(|(_, a)| a.is_badge()).map(|(l, _)| *l).collect();
        let badges_b: Vec<usize> = p.map_b.iter().filter(|(_, a)| a.is_badge()).map(|(l, _)| *l).collect();
        assert_eq!(badges_a, vec![3]);
        assert_eq!(badges_b, vec![50]);
        assert_eq!(p.get(Side::A, 3).unwrap().counterpart_line, Some(50));
        assert_eq!(p.get(Side::B, 50).unwrap().counterpart_line, Some(3));
        assert_eq!(p.get(Side::A, 6).unwrap().counterpart_of(6), Some(53));
    }

    #[test]
    fn child_on_start_line_takes_the_badge_slot() {
        let root = node(Moved, "m")
            .with_range(Side::A, 3, 5)
            .with_range(Side::B, 13, 15)
            .with_children(vec![node(Modified, "first").with_range(Side::A, 3, 3).with_range(Side::B, 13, 13)]);
        let p = project(&[root]).unwrap();
        let start = p.get(Side::A, 3).unwrap();
        assert_eq!(start.kind, Modified);
        assert_eq!(start.counterpart_line, None);
    }

    #[test]
    fn legacy_line_only_fills_empty_slot() {
        let roots = vec![
            node(Added, "legacy").with_line(Side::B, 7),
            node(Modified, "ranged").with_range(Side::A, 7, 7).with_range(Side::B, 7, 7),
            node(Deleted, "legacy_alone").with_line(Side::A, 30),
        ];
        let p = project(&roots).unwrap();
        assert_eq!(p.get(Side::B, 7).unwrap().identifier, "ranged");
        assert_eq!(p.get(Side::A, 30).unwrap().kind, Deleted);
    }

    #[test]
    fn a_only_node_never_touches_map_b() {
        let root = node(Deleted, "gone")
            .with_range(Side::A, 4, 6)
            .with_token_changes(vec![TokenChange::new("x", (0, 1), "y", (0, 1))]);
        let p = project(&[root]).unwrap();
        assert_eq!(p.map_a.len(), 3);
        assert!(p.map_b.is_empty());
    }

    #[test]
    fn added_ignores_a_side_lines() {
        let root = node(Added, "new").with_range(Side::A, 1, 2).with_range(Side::B, 8, 9);
        let p = project(&[root]).unwrap();
        assert!(p.map_a.is_empty());
        assert_eq!(p.map_b.len(), 2);
    }

    #[test]
    fn invalid_range_skips_node_but_not_children() {
        let root = node(Modified, "broken")
            .with_range(Side::A, 9, 2)
            .with_range(Side::B, 1, 3)
            .with_children(vec![node(Added, "child").with_range(Side::B, 2, 2)]);
        let sibling = node(Deleted, "sibling").with_range(Side::A, 20, 20);
        let p = project(&[root, sibling]).unwrap();

        assert_eq!(p.diagnostics.len(), 1);
        let d = &p.diagnostics[0];
        assert_eq!(d.kind, DiagnosticKind::InvalidRange);
        assert_eq!(d.identifier, "broken");
        assert_eq!(d.side, Some(Side::A));
        assert!(p.has_skipped_nodes());

        assert_eq!(p.map_b.len(), 1);
        assert_eq!(p.get(Side::B, 2).unwrap().kind, Added);
        assert_eq!(p.get(Side::A, 20).unwrap().kind, Deleted);
    }

    #[test]
    fn malformed_node_is_reported() {
        let root = node(Modified, "container")
            .with_children(vec![node(Modified, "leaf").with_range(Side::A, 1, 1).with_range(Side::B, 1, 1)]);
        let p = project(&[root]).unwrap();
        assert_eq!(p.diagnostics[0].kind, DiagnosticKind::MalformedNode);
        assert_eq!(p.diagnostics[0].node_index, 0);
        assert_eq!(p.get(Side::A, 1).unwrap().identifier, "leaf");
    }

    #[test]
    fn skipped_ancestor_does_not_shield() {
        let root = node(MovedModified, "broken")
            .with_range(Side::A, 5, 1)
            .with_range(Side::B, 20, 24)
            .with_children(vec![node(Modified, "stmt").with_range(Side::A, 3, 3).with_range(Side::B, 22, 22)]);
        let p = project(&[root]).unwrap();
        assert_eq!(p.get(Side::A, 3).unwrap().kind, Modified);
    }

    #[test]
    fn move_problems_are_diagnosed() {
        let roots = vec![
            node(Moved, "still").with_range(Side::A, 4, 6).with_range(Side::B, 4, 6),
            node(MovedModified, "half").with_range(Side::A, 10, 12),
        ];
        let p = project(&roots).unwrap();
        let kinds: Vec<_> = p.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::StationaryMove, DiagnosticKind::MissingCounterpart]
        );
        assert_eq!(p.diagnostics[1].side, Some(Side::B));
        assert_eq!(p.get(Side::A, 10).unwrap().counterpart_line, None);
        assert!(!p.has_skipped_nodes());
    }

    #[test]
    fn document_bounds_clip_ranges() {
        let root = node(Modified, "tail").with_range(Side::A, 2, 6).with_range(Side::B, 9, 9);
        let p = Projector::default()
            .project_documents(&[root], "1\n2\n3", "only line")
            .unwrap();
        assert_eq!(p.map_a.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert!(p.map_b.is_empty());
        assert_eq!(p.diagnostics.len(), 2);
        assert!(p.diagnostics.iter().all(|d| d.kind == DiagnosticKind::LineOutOfDocument));
    }

    #[test]
    fn line_limit_aborts() {
        let config = ProjectionConfig {
            max_marked_lines: 10,
            ..ProjectionConfig::default()
        };
        let root = node(Modified, "huge").with_range(Side::A, 1, 8).with_range(Side::B, 1, 8);
        assert_eq!(
            Projector::new(config).project(&[root]),
            Err(ProjectionError::TooManyLines { limit: 10 })
        );
    }

    #[test]
    fn tallies_are_flat_over_roots() {
        let roots = vec![
            node(Added, "a").with_range(Side::B, 1, 1),
            node(MovedModified, "mm").with_range(Side::A, 1, 2).with_range(Side::B, 5, 6),
            node(Moved, "m").with_range(Side::A, 3, 3).with_range(Side::B, 8, 8),
        ];
        let p = project(&roots).unwrap();
        assert_eq!(p.tallies.added, 1);
        assert_eq!(p.tallies.moved, 2);
        assert_eq!(p.tallies.total(), 3);
    }

    fn arb_kind() -> impl Strategy<Value = ChangeKind> {
        prop_oneof![
            Just(Added),
            Just(Deleted),
            Just(Modified),
            Just(Moved),
            Just(MovedModified),
        ]
    }

    fn arb_node() -> impl Strategy<Value = ChangeNode> {
        let leaf = (
            arb_kind(),
            proptest::option::of((1usize..30, 0usize..4)),
            proptest::option::of((1usize..30, 0usize..4)),
            any::<bool>(),
        )
            .prop_map(|(kind, a, b, tokens)| {
                let mut n = ChangeNode::new(kind, format!("{kind}"));
                if let Some((start, len)) = a {
                    n = n.with_range(Side::A, start, start + len);
                }
                if let Some((start, len)) = b {
                    n = n.with_range(Side::B, start, start + len);
                }
                if tokens {
                    n = n.with_token_changes(vec![TokenChange::new("t", (0, 1), "u", (0, 1))]);
                }
                n
            });
        leaf.prop_recursive(3, 24, 4, |inner| {
            (inner.clone(), proptest::collection::vec(inner, 0..4))
                .prop_map(|(parent, children)| parent.with_children(children))
        })
    }

    /// A node with a B span somewhere in its subtree.
    fn touches_b(node: &ChangeNode) -> bool {
        (node.kind.applies_to(Side::B) && matches!(node.span(Side::B), Ok(Some(_))))
            || node.children.iter().any(touches_b)
    }

    proptest! {
        #[test]
        fn projection_is_idempotent(roots in proptest::collection::vec(arb_node(), 0..5)) {
            let first = project(&roots).unwrap();
            let second = project(&roots).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn one_badge_per_side_per_move(
            kind in prop_oneof![Just(Moved), Just(MovedModified)],
            a in (1usize..20, 0usize..5),
            b in (1usize..20, 0usize..5),
            children in proptest::collection::vec(arb_node(), 0..3),
        ) {
            let leaf = children.is_empty();
            let root = ChangeNode::new(kind, "root")
                .with_range(Side::A, a.0, a.0 + a.1)
                .with_range(Side::B, b.0, b.0 + b.1)
                .with_children(children);
            let p = project(std::slice::from_ref(&root)).unwrap();

            for (side, (start, len), other_start) in [(Side::A, a, b.0), (Side::B, b, a.0)] {
                let badges: Vec<usize> = (start..=start + len)
                    .filter(|line| {
                        p.get(side, *line).is_some_and(|ann| {
                            ann.identifier == "root" && ann.counterpart_line == Some(other_start)
                        })
                    })
                    .collect();
                if leaf {
                    prop_assert_eq!(badges, vec![start]);
                } else {
                    prop_assert!(badges.iter().all(|l| *l == start));
                }
            }
        }

        #[test]
        fn structural_child_always_owns_its_lines(
            parent_kind in prop_oneof![Just(Modified), Just(MovedModified), Just(Moved)],
            child_deleted in any::<bool>(),
            child_first in any::<bool>(),
        ) {
            let (child_kind, side) = if child_deleted { (Deleted, Side::A) } else { (Added, Side::B) };
            let child = node(child_kind, "child").with_range(side, 3, 3);
            let peer = node(parent_kind, "peer").with_range(Side::A, 1, 5).with_range(Side::B, 2, 6);
            let nested = peer.clone().with_children(vec![child.clone()]);
            let siblings = if child_first { vec![child, peer] } else { vec![peer, child] };

            prop_assert_eq!(project(&[nested]).unwrap().get(side, 3).unwrap().kind, child_kind);
            prop_assert_eq!(project(&siblings).unwrap().get(side, 3).unwrap().kind, child_kind);
        }

        #[test]
        fn b_entries_only_from_b_spans(roots in proptest::collection::vec(arb_node(), 0..4)) {
            let p = project(&roots).unwrap();
            if !roots.iter().any(touches_b) {
                prop_assert!(p.map_b.is_empty());
            }
        }
    }
}
