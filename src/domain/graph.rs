//! Relationship graph for issues
//!
//! Mirrors the "blocks" links between issues so cycles can be reported.
//! The roadmap itself tolerates cycles; this graph only diagnoses them.
//! Uses petgraph for graph operations.

use petgraph::algo::{has_path_connecting, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use super::id::IssueId;
use super::issue::Issue;

/// Directed graph with an edge from each blocking issue to the issue it blocks
#[derive(Debug, Default)]
pub struct RelationshipGraph {
    graph: DiGraph<IssueId, ()>,

    /// Map from IssueId to node index
    node_map: HashMap<IssueId, NodeIndex>,
}

impl RelationshipGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds the graph from a collection of issues
    ///
    /// Links to issues outside the collection are ignored.
    pub fn from_issues<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        let mut graph = Self::new();

        // First pass: add all nodes
        let issues: Vec<_> = issues.into_iter().collect();
        for issue in &issues {
            graph.add_issue(issue.id);
        }

        // Second pass: add all edges
        for issue in &issues {
            for parent in &issue.parents {
                graph.add_link(*parent, issue.id);
            }
        }

        graph
    }

    /// Adds an issue to the graph
    pub fn add_issue(&mut self, id: IssueId) {
        if !self.node_map.contains_key(&id) {
            let idx = self.graph.add_node(id);
            self.node_map.insert(id, idx);
        }
    }

    /// Adds a `parent` blocks `child` link
    ///
    /// Returns false if either issue is unknown.
    pub fn add_link(&mut self, parent: IssueId, child: IssueId) -> bool {
        match (self.node_map.get(&parent), self.node_map.get(&child)) {
            (Some(&p), Some(&c)) => {
                self.graph.update_edge(p, c, ());
                true
            }
            _ => false,
        }
    }

    /// Returns true if linking `parent` to `child` would close a cycle
    pub fn would_create_cycle(&self, parent: IssueId, child: IssueId) -> bool {
        if parent == child {
            return true;
        }

        match (self.node_map.get(&parent), self.node_map.get(&child)) {
            (Some(&p), Some(&c)) => has_path_connecting(&self.graph, c, p, None),
            _ => false,
        }
    }

    /// Returns every cycle as a sorted list of its members
    ///
    /// Cycles are ordered by their smallest member.
    pub fn cycles(&self) -> Vec<Vec<IssueId>> {
        let mut cycles: Vec<Vec<IssueId>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || self.graph.find_edge(component[0], component[0]).is_some()
            })
            .map(|component| {
                let mut ids: Vec<_> = component
                    .into_iter()
                    .filter_map(|idx| self.graph.node_weight(idx).copied())
                    .collect();
                ids.sort();
                ids
            })
            .collect();

        cycles.sort();
        cycles
    }

    /// Returns the number of issues in the graph
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> IssueId {
        IssueId::new(n).unwrap()
    }

    fn issue(n: u32, parents: &[u32]) -> Issue {
        let mut issue = Issue::new(id(n), format!("Issue {}", n));
        issue.parents = parents.iter().map(|p| id(*p)).collect();
        issue
    }

    #[test]
    fn empty_graph() {
        let graph = RelationshipGraph::new();
        assert!(graph.is_empty());
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn tree_has_no_cycles() {
        let issues = vec![issue(1, &[]), issue(2, &[1]), issue(3, &[1]), issue(4, &[2])];
        let graph = RelationshipGraph::from_issues(&issues);

        assert_eq!(graph.len(), 4);
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn finds_two_cycle() {
        let issues = vec![issue(1, &[2]), issue(2, &[1]), issue(3, &[])];
        let graph = RelationshipGraph::from_issues(&issues);

        assert_eq!(graph.cycles(), vec![vec![id(1), id(2)]]);
    }

    #[test]
    fn finds_separate_cycles_sorted() {
        let issues = vec![
            issue(5, &[6]),
            issue(6, &[7]),
            issue(7, &[5]),
            issue(2, &[3]),
            issue(3, &[2]),
        ];
        let graph = RelationshipGraph::from_issues(&issues);

        assert_eq!(
            graph.cycles(),
            vec![vec![id(2), id(3)], vec![id(5), id(6), id(7)]]
        );
    }

    #[test]
    fn finds_self_loop() {
        // Issue::add_parent refuses self links, but the store may hold one.
        let issues = vec![issue(1, &[1])];
        let graph = RelationshipGraph::from_issues(&issues);

        assert_eq!(graph.cycles(), vec![vec![id(1)]]);
    }

    #[test]
    fn links_to_unknown_issues_are_ignored() {
        let issues = vec![issue(1, &[99])];
        let graph = RelationshipGraph::from_issues(&issues);

        assert_eq!(graph.len(), 1);
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn would_create_cycle() {
        let issues = vec![issue(1, &[]), issue(2, &[1]), issue(3, &[2])];
        let graph = RelationshipGraph::from_issues(&issues);

        // 3 blocking 1 closes 1 -> 2 -> 3 -> 1
        assert!(graph.would_create_cycle(id(3), id(1)));
        assert!(!graph.would_create_cycle(id(1), id(3)));
        assert!(graph.would_create_cycle(id(2), id(2)));
    }
}
