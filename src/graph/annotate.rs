//! Passes that run after the walk: epic membership edges, epic shapes and status colors.

use crate::client::IssueTracker;
use crate::error::DepGraphResult;
use crate::graph::{DependencyGraph, EdgeKind, NodeShape, StatusColor};
use crate::logging::{log_debug, log_warn};
use crate::models::Issue;

/// Whether `key` behaves as an epic. Issue type metadata is not trusted for this;
/// the tracker is asked directly.
pub async fn is_epic<T: IssueTracker + ?Sized>(tracker: &T, key: &str) -> DepGraphResult<bool> {
    tracker.probe_epic(key).await
}

/// Add a membership edge from `epic_key` to every issue in `epic_issues`.
///
/// Additive only: an ordered pair that already has an edge (of any kind) is left alone.
pub fn expand_epic(
    mut graph: DependencyGraph,
    epic_issues: &[Issue],
    epic_key: &str,
) -> DependencyGraph {
    graph.ensure_node(epic_key, None);

    for issue in epic_issues {
        graph.ensure_node(&issue.key, Some(issue.summary()));
        if !graph.add_edge(epic_key, &issue.key, EdgeKind::Membership) {
            log_debug(&format!("{} -> {} already present", epic_key, issue.key));
        }
    }

    graph
}

/// Give every node the tracker considers an epic the epic shape.
pub async fn mark_epic_shapes<T: IssueTracker + ?Sized>(
    mut graph: DependencyGraph,
    tracker: &T,
) -> DepGraphResult<DependencyGraph> {
    for key in graph.node_keys() {
        if is_epic(tracker, &key).await? {
            if let Some(node) = graph.node_mut(&key) {
                node.shape = NodeShape::Epic;
            }
        }
    }

    Ok(graph)
}

/// Fill every node with the color of its current workflow status.
///
/// Runs over whatever nodes exist when it is called, so it must come after every
/// structural pass. A node whose issue is not found keeps no fill color.
pub async fn color_by_status<T: IssueTracker + ?Sized>(
    mut graph: DependencyGraph,
    tracker: &T,
) -> DepGraphResult<DependencyGraph> {
    for key in graph.node_keys() {
        let Some(issue) = tracker.fetch_issue(&key).await? else {
            log_warn(&format!("No status for {}, leaving it uncolored", key));
            continue;
        };

        if let Some(node) = graph.node_mut(&key) {
            node.fill_color = Some(StatusColor::for_status(issue.status_name()));
        }
    }

    Ok(graph)
}
