//! Hierarchical sequencing of parent/child edges
//!
//! Turns a flat list of `(id, parent)` edges into an ordered list of
//! placements, each annotated with its nesting level. Every descendant of a
//! placement ends up in the contiguous block directly after it, so the
//! result can be printed top to bottom with indentation.
//!
//! The input does not have to be a tree: ids may repeat (an issue with more
//! than one parent) and parent chains may loop back on themselves. Once a full
//! pass over the pending edges makes no progress, one member of the loop is
//! placed without waiting for its parent. It still nests under that parent
//! when the parent already has a placement.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use serde::Serialize;

/// An `(id, parent)` pair to be placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<I> {
    pub id: I,
    pub parent: Option<I>,
}

impl<I> Edge<I> {
    /// Creates an edge from `id` to `parent`
    pub fn new(id: I, parent: Option<I>) -> Self {
        Self { id, parent }
    }

    /// Creates an edge without a parent
    pub fn root(id: I) -> Self {
        Self { id, parent: None }
    }

    /// Creates an edge with a parent
    pub fn child(id: I, parent: I) -> Self {
        Self {
            id,
            parent: Some(parent),
        }
    }
}

/// A committed entry in the output ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement<I> {
    pub id: I,
    pub level: u32,
}

impl<I> Placement<I> {
    /// Returns true if this placement has no resolved parent
    pub fn is_root(&self) -> bool {
        self.level == 0
    }
}

/// Placements plus the ids the cycle guard had to force
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceReport<I> {
    pub placements: Vec<Placement<I>>,

    /// Ids placed without waiting for their parent, in placement order
    pub forced: Vec<I>,
}

/// Orders `edges` for indented display
///
/// See [`sequence_with_report`] for the details.
pub fn sequence<I: Eq + Hash + Clone>(edges: Vec<Edge<I>>) -> Vec<Placement<I>> {
    sequence_with_report(edges).placements
}

/// Orders `edges` for indented display and reports cycle breaks
///
/// Edges are scanned round-robin. An edge is placed once its parent is no
/// longer pending; it is then inserted at the end of its parent's subtree
/// block (one level deeper), or appended as a root when the parent has no
/// placement. Every placement resets the stall window. An edge whose id and
/// parent have both been seen since the last placement is stuck in a cycle
/// and is placed immediately.
///
/// Always terminates: after at most one full pass without progress the
/// guard trips on the first edge revisited. Each visit is a constant number
/// of hash lookups, so the whole run is quadratic in the number of edges.
pub fn sequence_with_report<I: Eq + Hash + Clone>(edges: Vec<Edge<I>>) -> SequenceReport<I> {
    let mut pending = edges;
    let mut placed: Vec<Placement<I>> = Vec::with_capacity(pending.len());
    let mut forced = Vec::new();
    let mut stalled: HashSet<I> = HashSet::new();
    let mut k = 0;

    // Multiplicity of each id still pending
    let mut pending_ids: HashMap<I, usize> = HashMap::new();
    for edge in &pending {
        *pending_ids.entry(edge.id.clone()).or_insert(0) += 1;
    }

    while !pending.is_empty() {
        let edge = &pending[k];

        let in_cycle = stalled.contains(&edge.id)
            && edge.parent.as_ref().is_some_and(|p| stalled.contains(p));
        if !in_cycle {
            stalled.insert(edge.id.clone());
        }

        let parent_pending = edge
            .parent
            .as_ref()
            .is_some_and(|p| pending_ids.contains_key(p));

        if in_cycle || !parent_pending {
            let edge = pending.remove(k);
            let remaining = pending_ids.get_mut(&edge.id).map(|count| {
                *count -= 1;
                *count
            });
            if remaining == Some(0) {
                pending_ids.remove(&edge.id);
            }
            if in_cycle {
                forced.push(edge.id.clone());
            }
            insert_placement(&mut placed, edge);
            stalled.clear();
        } else {
            k += 1;
        }

        if k >= pending.len() {
            k = 0;
        }
    }

    SequenceReport { placements: placed, forced }
}

/// Inserts `edge` after the last descendant of its parent's first placement
fn insert_placement<I: PartialEq>(placed: &mut Vec<Placement<I>>, edge: Edge<I>) {
    let parent_pos = edge
        .parent
        .as_ref()
        .and_then(|p| placed.iter().position(|pl| &pl.id == p));

    match parent_pos {
        Some(l) => {
            let parent_level = placed[l].level;
            let end = placed[l + 1..]
                .iter()
                .position(|pl| pl.level <= parent_level)
                .map_or(placed.len(), |offset| l + 1 + offset);

            placed.insert(
                end,
                Placement {
                    id: edge.id,
                    level: parent_level + 1,
                },
            );
        }
        None => placed.push(Placement {
            id: edge.id,
            level: 0,
        }),
    }
}

/// Invokes `hook` once per placement, in display order
pub fn render_with<I>(placements: &[Placement<I>], mut hook: impl FnMut(&Placement<I>)) {
    for placement in placements {
        hook(placement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pl(id: &'static str, level: u32) -> Placement<&'static str> {
        Placement { id, level }
    }

    #[test]
    fn empty_input() {
        let placed: Vec<Placement<u32>> = sequence(vec![]);
        assert!(placed.is_empty());
    }

    #[test]
    fn chain_is_nested() {
        let edges = vec![
            Edge::root("A"),
            Edge::child("B", "A"),
            Edge::child("C", "B"),
        ];

        assert_eq!(sequence(edges), vec![pl("A", 0), pl("B", 1), pl("C", 2)]);
    }

    #[test]
    fn chain_in_reverse_order() {
        let edges = vec![
            Edge::child("C", "B"),
            Edge::child("B", "A"),
            Edge::root("A"),
        ];

        assert_eq!(sequence(edges), vec![pl("A", 0), pl("B", 1), pl("C", 2)]);
    }

    #[test]
    fn two_cycle_breaks_at_first_seen_edge() {
        let edges = vec![Edge::child("A", "B"), Edge::child("B", "A")];
        let report = sequence_with_report(edges);

        // A stalls, B stalls, A trips the guard and is forced; B then
        // finds A placed and nests under it.
        assert_eq!(report.placements, vec![pl("A", 0), pl("B", 1)]);
        assert_eq!(report.forced, vec!["A"]);
    }

    #[test]
    fn siblings_stay_grouped_under_parent() {
        let edges = vec![
            Edge::root("A"),
            Edge::child("B", "A"),
            Edge::child("C", "A"),
        ];

        assert_eq!(sequence(edges), vec![pl("A", 0), pl("B", 1), pl("C", 1)]);
    }

    #[test]
    fn children_inserted_before_later_roots() {
        let edges = vec![
            Edge::root("A"),
            Edge::root("D"),
            Edge::child("B", "A"),
            Edge::child("C", "A"),
        ];

        assert_eq!(
            sequence(edges),
            vec![pl("A", 0), pl("B", 1), pl("C", 1), pl("D", 0)]
        );
    }

    #[test]
    fn grandchild_lands_inside_its_parent_block() {
        let edges = vec![
            Edge::root("A"),
            Edge::child("B", "A"),
            Edge::child("C", "A"),
            Edge::child("E", "B"),
        ];

        assert_eq!(
            sequence(edges),
            vec![pl("A", 0), pl("B", 1), pl("E", 2), pl("C", 1)]
        );
    }

    #[test]
    fn unknown_parent_is_a_root() {
        let edges = vec![Edge::child("A", "X")];
        assert_eq!(sequence(edges), vec![pl("A", 0)]);
    }

    #[test]
    fn duplicate_roots_are_kept() {
        let edges = vec![Edge::root("A"), Edge::root("A")];
        assert_eq!(sequence(edges), vec![pl("A", 0), pl("A", 0)]);
    }

    #[test]
    fn multi_parent_issue_placed_under_each_parent() {
        let edges = vec![
            Edge::root("P"),
            Edge::root("Q"),
            Edge::child("C", "P"),
            Edge::child("C", "Q"),
        ];

        assert_eq!(
            sequence(edges),
            vec![pl("P", 0), pl("C", 1), pl("Q", 0), pl("C", 1)]
        );
    }

    #[test]
    fn shared_ancestor_uses_first_placement() {
        // C appears twice; D hangs off the first C in display order.
        let edges = vec![
            Edge::child("D", "C"),
            Edge::root("P"),
            Edge::root("Q"),
            Edge::child("C", "P"),
            Edge::child("C", "Q"),
        ];

        assert_eq!(
            sequence(edges),
            vec![pl("P", 0), pl("C", 1), pl("D", 2), pl("Q", 0), pl("C", 1)]
        );
    }

    #[test]
    fn self_loop_is_forced_to_root() {
        let edges = vec![Edge::child("A", "A")];
        let report = sequence_with_report(edges);

        assert_eq!(report.placements, vec![pl("A", 0)]);
        assert_eq!(report.forced, vec!["A"]);
    }

    #[test]
    fn three_cycle_terminates() {
        let edges = vec![
            Edge::child("A", "C"),
            Edge::child("B", "A"),
            Edge::child("C", "B"),
        ];
        let report = sequence_with_report(edges);

        assert_eq!(report.placements, vec![pl("A", 0), pl("B", 1), pl("C", 2)]);
        assert_eq!(report.forced.len(), 1);
    }

    #[test]
    fn cycle_hanging_off_a_tree() {
        let edges = vec![
            Edge::child("B", "C"),
            Edge::child("C", "B"),
            Edge::root("A"),
            Edge::child("D", "A"),
        ];
        let placed = sequence(edges);

        assert_eq!(placed.len(), 4);
        let a = placed.iter().position(|p| p.id == "A").unwrap();
        assert_eq!(placed[a + 1], pl("D", 1));
    }

    #[test]
    fn acyclic_input_is_deterministic() {
        let edges = vec![
            Edge::child("E", "B"),
            Edge::root("A"),
            Edge::child("B", "A"),
            Edge::child("C", "A"),
            Edge::root("F"),
        ];

        assert_eq!(sequence(edges.clone()), sequence(edges));
    }

    #[test]
    fn render_hook_sees_every_placement_in_order() {
        let placed = sequence(vec![Edge::root("A"), Edge::child("B", "A")]);
        let mut rows = Vec::new();

        render_with(&placed, |p| rows.push(format!("{}{}", "  ".repeat(p.level as usize), p.id)));

        assert_eq!(rows, vec!["A", "  B"]);
    }

    #[test]
    fn long_cycle_terminates() {
        let n = 200u32;
        let edges: Vec<_> = (0..n).map(|i| Edge::child(i, (i + 1) % n)).collect();

        let placed = sequence(edges);
        assert_eq!(placed.len(), n as usize);
        assert_eq!(placed.iter().filter(|p| p.is_root()).count(), 1);
    }

    #[test]
    fn long_reverse_chain_nests_fully() {
        let n = 3000u32;
        let mut edges: Vec<_> = (1..n).rev().map(|i| Edge::child(i, i - 1)).collect();
        edges.push(Edge::root(0));

        let report = sequence_with_report(edges);

        assert!(report.forced.is_empty());
        assert_eq!(report.placements.len(), n as usize);
        for (i, placement) in report.placements.iter().enumerate() {
            assert_eq!(placement.id, i as u32);
            assert_eq!(placement.level, i as u32);
        }
    }
}
