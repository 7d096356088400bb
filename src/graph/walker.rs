//! Link traversal: discovers every issue reachable from a start key through issue
//! links (and optionally subtasks) and records one directed edge per relationship.

use std::collections::HashSet;

use crate::client::IssueTracker;
use crate::error::{DepGraphError, DepGraphResult};
use crate::graph::{DependencyGraph, EdgeKind};
use crate::logging::{log_debug, log_info, log_warn};
use crate::models::{Issue, IssueRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Follow subtasks in addition to issue links.
    pub include_subtasks: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            include_subtasks: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkStats {
    /// Issues fetched and expanded.
    pub fetched: usize,
    /// Linked keys the tracker reported as not found.
    pub skipped: usize,
}

/// Traversal context for a single walk.
///
/// Depth-first, driven by an explicit stack rather than recursion. A key enters
/// `seen` as soon as it is dequeued, so each reachable issue is fetched exactly once
/// no matter how many links lead to it.
pub struct LinkWalker<'t, T: ?Sized> {
    tracker: &'t T,
    options: WalkOptions,
    graph: DependencyGraph,
    seen: HashSet<String>,
    stack: Vec<String>,
    stats: WalkStats,
}

impl<'t, T: IssueTracker + ?Sized> LinkWalker<'t, T> {
    pub fn new(graph: DependencyGraph, tracker: &'t T, options: WalkOptions) -> Self {
        Self {
            tracker,
            options,
            graph,
            seen: HashSet::new(),
            stack: Vec::new(),
            stats: WalkStats::default(),
        }
    }

    /// Walk everything reachable from `start_key` and hand the graph back.
    ///
    /// The start issue must exist. A linked issue that comes back not-found is kept as a
    /// bare node and not expanded; any other fetch failure aborts the walk.
    pub async fn run(mut self, start_key: &str) -> DepGraphResult<DependencyGraph> {
        self.graph.ensure_node(start_key, None);
        self.stack.push(start_key.to_string());

        while let Some(key) = self.stack.pop() {
            if self.seen.contains(&key) {
                continue;
            }

            let fetched = self.tracker.fetch_issue(&key).await;
            let issue = match fetched {
                Ok(Some(issue)) => issue,
                Ok(None) if key == start_key => {
                    return Err(DepGraphError::IssueNotFound(key));
                }
                Ok(None) => {
                    log_warn(&format!("Linked issue {} not found, skipping", key));
                    self.seen.insert(key);
                    self.stats.skipped += 1;
                    continue;
                }
                Err(e) => {
                    log_warn(&format!("Could not get issue {}: {}", key, e));
                    return Err(e);
                }
            };

            self.seen.insert(key.clone());
            self.stats.fetched += 1;

            let children = self.expand(&key, &issue);
            log_debug(&format!("{} -> {:?}", key, children));

            // Reversed so the first-encountered child is expanded first.
            let pending: Vec<String> = children
                .into_iter()
                .rev()
                .filter(|child| !self.seen.contains(child))
                .collect();
            self.stack.extend(pending);
        }

        log_info(&format!(
            "Walk from {} done: {} fetched, {} not found",
            start_key, self.stats.fetched, self.stats.skipped
        ));

        Ok(self.graph)
    }

    /// Record the edges of one fetched issue and return the far-end keys of every edge
    /// that was newly added, in link order followed by subtask order.
    pub fn expand(&mut self, key: &str, issue: &Issue) -> Vec<String> {
        self.graph.ensure_node(key, Some(issue.summary()));

        let mut children = Vec::new();

        for link in &issue.fields.issuelinks {
            // Jira only gives the outward phrase on the type; inward edges reuse it.
            let label = &link.link_type.outward;

            if let Some(outward) = &link.outward_issue {
                self.connect(key, outward, EdgeKind::Link(label.clone()), false, &mut children);
            }
            if let Some(inward) = &link.inward_issue {
                self.connect(key, inward, EdgeKind::Link(label.clone()), true, &mut children);
            }
        }

        if self.options.include_subtasks {
            for subtask in &issue.fields.subtasks {
                self.connect(key, subtask, EdgeKind::Subtask, false, &mut children);
            }
        }

        children
    }

    fn connect(
        &mut self,
        key: &str,
        other: &IssueRef,
        kind: EdgeKind,
        incoming: bool,
        children: &mut Vec<String>,
    ) {
        let added = if incoming {
            self.graph.add_edge(&other.key, key, kind)
        } else {
            self.graph.add_edge(key, &other.key, kind)
        };

        if added {
            self.graph.ensure_node(&other.key, other.summary());
            children.push(other.key.clone());
        }
    }
}

/// Walk from `start_key` into `graph` and return it.
pub async fn walk<T: IssueTracker + ?Sized>(
    graph: DependencyGraph,
    start_key: &str,
    tracker: &T,
    options: WalkOptions,
) -> DepGraphResult<DependencyGraph> {
    LinkWalker::new(graph, tracker, options).run(start_key).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockTracker;

    fn blocks() -> EdgeKind {
        EdgeKind::Link("blocks".to_string())
    }

    async fn walk_from(tracker: &MockTracker, start: &str) -> DependencyGraph {
        walk(DependencyGraph::with_start(start), start, tracker, WalkOptions::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_single_issue_without_links() {
        let tracker = MockTracker::new().with_issue(Issue::new("DEMO-1", "Alone", "To Do"));
        let graph = walk_from(&tracker, "DEMO-1").await;

        assert_eq!(graph.node_keys(), vec!["DEMO-1"]);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node("DEMO-1").unwrap().label(), "DEMO-1\nAlone");
    }

    #[tokio::test]
    async fn test_outward_link_points_away() {
        let tracker = MockTracker::new()
            .with_issue(Issue::new("A-1", "a", "To Do").with_outward_link("A-2", "blocks"))
            .with_issue(Issue::new("A-2", "b", "To Do"));
        let graph = walk_from(&tracker, "A-1").await;

        assert_eq!(graph.edge("A-1", "A-2"), Some(&blocks()));
        assert!(!graph.has_edge("A-2", "A-1"));
    }

    #[tokio::test]
    async fn test_inward_link_reuses_outward_label() {
        let tracker = MockTracker::new()
            .with_issue(Issue::new("A-1", "a", "To Do").with_inward_link("C-1", "blocks"))
            .with_issue(Issue::new("C-1", "c", "To Do"));
        let graph = walk_from(&tracker, "A-1").await;

        assert_eq!(graph.edge("C-1", "A-1"), Some(&blocks()));
        assert!(!graph.has_edge("A-1", "C-1"));
    }

    #[tokio::test]
    async fn test_cycle_terminates_and_fetches_once() {
        let tracker = MockTracker::new()
            .with_issue(Issue::new("DEMO-1", "one", "To Do").with_outward_link("DEMO-2", "blocks"))
            .with_issue(
                Issue::new("DEMO-2", "two", "To Do").with_outward_link("DEMO-1", "is blocked by"),
            );
        let graph = walk_from(&tracker, "DEMO-1").await;

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.edge("DEMO-2", "DEMO-1"),
            Some(&EdgeKind::Link("is blocked by".to_string()))
        );
        assert_eq!(tracker.fetch_count("DEMO-1"), 1);
        assert_eq!(tracker.fetch_count("DEMO-2"), 1);
    }

    #[tokio::test]
    async fn test_symmetric_link_records_make_one_edge() {
        // Jira stores a link on both issues: outward on one side, inward on the other.
        let tracker = MockTracker::new()
            .with_issue(Issue::new("A-1", "a", "To Do").with_outward_link("A-2", "blocks"))
            .with_issue(Issue::new("A-2", "b", "To Do").with_inward_link("A-1", "blocks"));
        let graph = walk_from(&tracker, "A-1").await;

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(tracker.total_fetches(), 2);
    }

    #[tokio::test]
    async fn test_diamond_fetches_each_key_once() {
        let tracker = MockTracker::new()
            .with_issue(
                Issue::new("D-1", "top", "To Do")
                    .with_outward_link("D-2", "blocks")
                    .with_outward_link("D-3", "blocks"),
            )
            .with_issue(Issue::new("D-2", "left", "To Do").with_outward_link("D-4", "blocks"))
            .with_issue(Issue::new("D-3", "right", "To Do").with_outward_link("D-4", "blocks"))
            .with_issue(Issue::new("D-4", "bottom", "To Do"));
        let graph = walk_from(&tracker, "D-1").await;

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        for key in ["D-1", "D-2", "D-3", "D-4"] {
            assert_eq!(tracker.fetch_count(key), 1, "{} fetched more than once", key);
        }
    }

    #[tokio::test]
    async fn test_depth_first_order_follows_links() {
        let tracker = MockTracker::new()
            .with_issue(
                Issue::new("O-1", "", "To Do")
                    .with_outward_link("O-2", "blocks")
                    .with_outward_link("O-4", "blocks"),
            )
            .with_issue(Issue::new("O-2", "", "To Do").with_outward_link("O-3", "blocks"))
            .with_issue(Issue::new("O-3", "", "To Do"))
            .with_issue(Issue::new("O-4", "", "To Do"));
        let graph = walk_from(&tracker, "O-1").await;

        // O-3 hangs off O-2, so it is expanded before O-2's sibling O-4.
        assert_eq!(tracker.fetched_keys(), vec!["O-1", "O-2", "O-3", "O-4"]);
        assert_eq!(graph.node_keys(), vec!["O-1", "O-2", "O-4", "O-3"]);
    }

    #[tokio::test]
    async fn test_subtasks_follow_links() {
        let issue = Issue::new("S-1", "parent", "To Do")
            .with_subtask("S-3")
            .with_outward_link("S-2", "relates to");
        let tracker = MockTracker::new()
            .with_issue(issue.clone())
            .with_issue(Issue::new("S-2", "", "To Do"))
            .with_issue(Issue::new("S-3", "", "To Do"));

        let mut walker = LinkWalker::new(
            DependencyGraph::with_start("S-1"),
            &tracker,
            WalkOptions::default(),
        );
        assert_eq!(walker.expand("S-1", &issue), vec!["S-2", "S-3"]);

        let graph = walk_from(&tracker, "S-1").await;
        assert_eq!(graph.edge("S-1", "S-3"), Some(&EdgeKind::Subtask));
        assert_eq!(tracker.fetched_keys(), vec!["S-1", "S-2", "S-3"]);
    }

    #[tokio::test]
    async fn test_subtasks_can_be_skipped() {
        let tracker = MockTracker::new()
            .with_issue(Issue::new("S-1", "parent", "To Do").with_subtask("S-2"))
            .with_issue(Issue::new("S-2", "child", "To Do"));
        let options = WalkOptions {
            include_subtasks: false,
        };
        let graph = walk(DependencyGraph::with_start("S-1"), "S-1", &tracker, options)
            .await
            .unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(tracker.fetch_count("S-2"), 0);
    }

    #[tokio::test]
    async fn test_missing_start_issue_is_an_error() {
        let tracker = MockTracker::new();
        let result = walk(
            DependencyGraph::with_start("NOPE-1"),
            "NOPE-1",
            &tracker,
            WalkOptions::default(),
        )
        .await;

        assert!(matches!(result, Err(DepGraphError::IssueNotFound(key)) if key == "NOPE-1"));
    }

    #[tokio::test]
    async fn test_missing_linked_issue_is_skipped() {
        let tracker = MockTracker::new().with_issue(
            Issue::new("A-1", "a", "To Do")
                .with_outward_link("GONE-1", "blocks")
                .with_outward_link("A-2", "blocks"),
        )
        .with_issue(Issue::new("A-2", "b", "To Do"));

        let walker = LinkWalker::new(
            DependencyGraph::with_start("A-1"),
            &tracker,
            WalkOptions::default(),
        );
        let graph = walker.run("A-1").await.unwrap();

        assert!(graph.contains("GONE-1"));
        assert_eq!(graph.node("GONE-1").unwrap().label(), "GONE-1");
        assert!(graph.has_edge("A-1", "A-2"));
        assert_eq!(tracker.fetch_count("GONE-1"), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_walk() {
        let tracker = MockTracker::new()
            .with_issue(
                Issue::new("A-1", "a", "To Do")
                    .with_outward_link("BAD-1", "blocks")
                    .with_outward_link("A-2", "blocks"),
            )
            .with_issue(Issue::new("A-2", "b", "To Do"))
            .with_failure("BAD-1");

        let result = walk(
            DependencyGraph::with_start("A-1"),
            "A-1",
            &tracker,
            WalkOptions::default(),
        )
        .await;

        assert!(matches!(result, Err(DepGraphError::ApiError { status: 500, .. })));
        assert_eq!(tracker.fetch_count("A-2"), 0);
    }
}
