use crate::client::IssueTracker;
use crate::error::DepGraphResult;
use crate::graph::{self, DependencyGraph, WalkOptions};
use crate::logging::log_info;

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub walk: WalkOptions,
    /// Add membership edges for every issue in the start issue's epic.
    pub expand_epic: bool,
}

/// Build the annotated graph for `start_key`.
///
/// Structure first (walk, then epic membership), decoration last (shapes, then
/// colors) so nodes added by the expander are decorated too.
pub async fn build_graph<T: IssueTracker + ?Sized>(
    tracker: &T,
    start_key: &str,
    options: BuildOptions,
) -> DepGraphResult<DependencyGraph> {
    let graph = DependencyGraph::with_start(start_key);
    let mut graph = graph::walk(graph, start_key, tracker, options.walk).await?;

    if options.expand_epic {
        match tracker.fetch_epic_issues(start_key).await? {
            Some(members) => {
                log_info(&format!("Adding {} issues from epic {}", members.len(), start_key));
                graph = graph::expand_epic(graph, &members, start_key);
            }
            None => log_info(&format!("{} is not an epic, nothing to expand", start_key)),
        }
    }

    let graph = graph::mark_epic_shapes(graph, tracker).await?;
    graph::color_by_status(graph, tracker).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{CachedTracker, MockTracker};
    use crate::graph::{EdgeKind, NodeShape, StatusColor};
    use crate::models::Issue;

    fn expanding() -> BuildOptions {
        BuildOptions {
            expand_epic: true,
            ..BuildOptions::default()
        }
    }

    #[tokio::test]
    async fn test_members_added_by_expander_are_colored() {
        let tracker = MockTracker::new()
            .with_issue(Issue::new("DEMO-0", "Epic", "In Progress"))
            .with_issue(Issue::new("DEMO-1", "one", "Done"))
            .with_issue(Issue::new("DEMO-2", "two", "To Do"))
            .with_epic("DEMO-0", &["DEMO-1", "DEMO-2"]);

        let graph = build_graph(&tracker, "DEMO-0", expanding()).await.unwrap();

        assert_eq!(graph.node("DEMO-0").unwrap().shape, NodeShape::Epic);
        assert_eq!(graph.node("DEMO-1").unwrap().fill_color, Some(StatusColor::Green));
        assert_eq!(graph.node("DEMO-2").unwrap().fill_color, Some(StatusColor::White));
        assert_eq!(graph.edge("DEMO-0", "DEMO-2"), Some(&EdgeKind::Membership));
    }

    #[tokio::test]
    async fn test_expansion_disabled() {
        let tracker = MockTracker::new()
            .with_issue(Issue::new("DEMO-0", "Epic", "To Do"))
            .with_epic("DEMO-0", &["DEMO-1"]);

        let graph = build_graph(&tracker, "DEMO-0", BuildOptions::default())
            .await
            .unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node("DEMO-0").unwrap().shape, NodeShape::Epic);
    }

    #[tokio::test]
    async fn test_non_epic_start_with_expansion() {
        let tracker = MockTracker::new().with_issue(Issue::new("DEMO-1", "one", "To Do"));

        let graph = build_graph(&tracker, "DEMO-1", expanding()).await.unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node("DEMO-1").unwrap().shape, NodeShape::Default);
    }

    #[tokio::test]
    async fn test_cache_avoids_refetching_during_coloring() {
        let mock = MockTracker::new()
            .with_issue(Issue::new("A-1", "a", "To Do").with_outward_link("A-2", "blocks"))
            .with_issue(Issue::new("A-2", "b", "Done"));
        let tracker = CachedTracker::new(mock);

        let graph = build_graph(&tracker, "A-1", BuildOptions::default())
            .await
            .unwrap();

        assert_eq!(graph.node("A-2").unwrap().fill_color, Some(StatusColor::Green));
        assert_eq!(tracker.inner().fetch_count("A-1"), 1);
        assert_eq!(tracker.inner().fetch_count("A-2"), 1);
    }
}
