//! Visual attributes for nodes and edges.

/// Fill color for a workflow status name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    White,
    Yellow,
    Green,
    /// Any status outside the three known names.
    Gray,
}

impl StatusColor {
    pub fn for_status(name: &str) -> Self {
        match name {
            "To Do" => StatusColor::White,
            "In Progress" => StatusColor::Yellow,
            "Done" => StatusColor::Green,
            _ => StatusColor::Gray,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::White => "white",
            StatusColor::Yellow => "yellow",
            StatusColor::Green => "green",
            StatusColor::Gray => "gray",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeShape {
    #[default]
    Default,
    Epic,
}

impl NodeShape {
    /// Graphviz shape name, `None` for the renderer's default.
    pub fn as_graphviz(&self) -> Option<&'static str> {
        match self {
            NodeShape::Default => None,
            NodeShape::Epic => Some("folder"),
        }
    }
}

/// How two issues are related.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeKind {
    /// A semantic issue link, carrying the link type's outward phrase.
    Link(String),
    Subtask,
    /// Direct membership in an epic.
    Membership,
}

impl EdgeKind {
    pub fn label(&self) -> &str {
        match self {
            EdgeKind::Link(label) => label,
            EdgeKind::Subtask => "subtask",
            EdgeKind::Membership => "epic",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            EdgeKind::Link(_) => "black",
            EdgeKind::Subtask => "blue",
            EdgeKind::Membership => "violet",
        }
    }

    pub fn penwidth(&self) -> f32 {
        match self {
            EdgeKind::Link(_) => 1.0,
            EdgeKind::Subtask | EdgeKind::Membership => 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses() {
        assert_eq!(StatusColor::for_status("To Do").as_str(), "white");
        assert_eq!(StatusColor::for_status("In Progress").as_str(), "yellow");
        assert_eq!(StatusColor::for_status("Done").as_str(), "green");
    }

    #[test]
    fn test_unknown_status_is_gray() {
        assert_eq!(StatusColor::for_status("In Review"), StatusColor::Gray);
        assert_eq!(StatusColor::for_status("done"), StatusColor::Gray);
        assert_eq!(StatusColor::for_status(""), StatusColor::Gray);
    }

    #[test]
    fn test_structural_edges_are_thinner() {
        let link = EdgeKind::Link("blocks".to_string());
        assert_eq!(link.label(), "blocks");
        assert!(EdgeKind::Subtask.penwidth() < link.penwidth());
        assert!(EdgeKind::Membership.penwidth() < link.penwidth());
    }
}
