//! Domain models for the roadmap
//!
//! Contains the core business logic without any I/O concerns.

mod id;
mod issue;
mod version;
mod progress;
mod graph;
mod roadmap;
pub mod sequence;

pub use id::{IdError, IssueId};
pub use issue::{Issue, IssueError, IssueStatus};
pub use version::{roadmap_order, Version};
pub use progress::RoadmapProgress;
pub use graph::RelationshipGraph;
pub use roadmap::{
    build_roadmap, collect_edges, RoadmapError, RoadmapOptions, RoadmapRow, VersionEdges,
    VersionRoadmap,
};
pub use sequence::{render_with, sequence, sequence_with_report, Edge, Placement, SequenceReport};
