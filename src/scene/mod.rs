//! Scene descriptions: boxes with final coordinates and the edges to route
//!
//! A scene is a TOML document:
//!
//! ```toml
//! [routing]
//! clearance = 20
//!
//! [[nodes]]
//! id = "vnet"
//! x = 0
//! y = 0
//! width = 660
//! height = 400
//!
//! [[nodes]]
//! id = "web"
//! parent = "vnet"
//! x = 30
//! y = 70
//! width = 280
//! height = 140
//!
//! [[branches]]
//! container = "vnet"
//! target = "web"
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use toml::Spanned;

use crate::error::SceneError;
use crate::routing::{BoundingBox, Point, RoutingConfig, Side};

mod router;

pub use router::{route_scene, EdgeKind, NodeLayout, RoutedEdge, RoutedScene};

/// Optional descriptive header of a scene
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A positioned box; containers are nodes that other nodes name as parent
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    pub id: Spanned<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub parent: Option<Spanned<String>>,
    #[serde(default)]
    pub label: Option<String>,
}

impl NodeSpec {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }

    pub fn id(&self) -> &str {
        self.id.get_ref()
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_ref().map(|p| p.get_ref().as_str())
    }
}

/// Peer-to-peer edge between two boxes
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeSpec {
    pub from: Spanned<String>,
    pub from_side: Side,
    pub to: Spanned<String>,
    pub to_side: Side,
    #[serde(default)]
    pub label: Option<String>,
}

/// Hub-and-spoke edge from a container's hub down to one of its children
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchSpec {
    pub container: Spanned<String>,
    pub target: Spanned<String>,
    /// Defaults to the container's horizontal center on its top lane
    #[serde(default)]
    pub hub: Option<Point>,
    #[serde(default)]
    pub label: Option<String>,
}

/// A validated scene
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default)]
    pub metadata: Option<SceneMetadata>,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    #[serde(default)]
    pub branches: Vec<BranchSpec>,
}

impl FromStr for Scene {
    type Err = SceneError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let scene: Scene = toml::from_str(content)?;
        scene.validate()?;
        Ok(scene)
    }
}

impl Scene {
    /// Load and validate a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&NodeSpec> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Direct children of `id`, in declaration order
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a NodeSpec> + 'a {
        self.nodes.iter().filter(move |n| n.parent() == Some(id))
    }

    /// Check the scene for problems the router cannot recover from
    pub fn validate(&self) -> Result<(), SceneError> {
        let mut defined = HashSet::new();
        for node in &self.nodes {
            if !defined.insert(node.id()) {
                return Err(SceneError::DuplicateNode {
                    id: node.id().to_string(),
                    span: node.id.span(),
                });
            }
            validate_box(node)?;
        }

        let check = |reference: &Spanned<String>| -> Result<(), SceneError> {
            let name = reference.get_ref();
            if defined.contains(name.as_str()) {
                Ok(())
            } else {
                Err(SceneError::undefined(
                    name.clone(),
                    reference.span(),
                    find_similar(&defined, name, 2),
                ))
            }
        };

        for node in &self.nodes {
            if let Some(parent) = &node.parent {
                check(parent)?;
            }
        }
        for edge in &self.edges {
            check(&edge.from)?;
            check(&edge.to)?;
        }

        let parents: HashMap<&str, Option<&str>> =
            self.nodes.iter().map(|n| (n.id(), n.parent())).collect();
        for branch in &self.branches {
            check(&branch.container)?;
            check(&branch.target)?;
            let container = branch.container.get_ref().as_str();
            if parents.get(branch.target.get_ref().as_str()) != Some(&Some(container)) {
                return Err(SceneError::InvalidBranch {
                    target: branch.target.get_ref().clone(),
                    container: container.to_string(),
                    span: branch.target.span(),
                });
            }
        }
        Ok(())
    }
}

fn validate_box(node: &NodeSpec) -> Result<(), SceneError> {
    let invalid = |reason: &str| SceneError::InvalidBox {
        id: node.id().to_string(),
        reason: reason.to_string(),
        span: node.id.span(),
    };

    if ![node.x, node.y, node.width, node.height]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(invalid("coordinates must be finite"));
    }
    if node.width < 0.0 || node.height < 0.0 {
        return Err(invalid("width and height must not be negative"));
    }
    Ok(())
}

/// Edit distance between two ids, computed over chars with a rolling row
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[b.len()]
}

/// Up to three declared ids within `max_distance` edits of `target`, closest first
fn find_similar(defined: &HashSet<&str>, target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(usize, &str)> = defined
        .iter()
        .map(|&name| (edit_distance(name, target), name))
        .filter(|&(d, _)| d > 0 && d <= max_distance)
        .collect();

    candidates.sort();
    candidates
        .into_iter()
        .take(3)
        .map(|(_, name)| name.to_string())
        .collect()
}
