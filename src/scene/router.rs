//! Scene router: turns a validated scene into routed edges

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::renderer::path::to_path;
use crate::routing::{
    anchor_point, branch_route, build_channels, count_bends, route_peer, BoundingBox,
    ChannelGrid, Point, RoutingConfig, Side,
};

use super::{BranchSpec, EdgeSpec, NodeSpec, Scene};

/// How an edge was routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Box to box, around obstacles
    Peer,
    /// Container hub to a child, through the container's lanes
    Branch,
}

/// A node ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    pub id: String,
    pub label: Option<String>,
    /// Whether any other node names this one as parent
    pub is_container: bool,
    pub bounds: BoundingBox,
}

/// A routed edge with its rendered descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    pub label: Option<String>,
    /// Orientation changes along `points`
    pub bends: usize,
    /// Rounded-corner path descriptor (`M`/`L`/`Q` commands)
    pub d: String,
    pub points: Vec<Point>,
}

/// The result of routing a scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedScene {
    pub name: Option<String>,
    /// Smallest box containing every node and every routed point
    pub bounds: BoundingBox,
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<RoutedEdge>,
}

impl RoutedScene {
    pub fn edge(&self, from: &str, to: &str) -> Option<&RoutedEdge> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }
}

/// Route every edge and branch of a validated scene
pub fn route_scene(scene: &Scene) -> RoutedScene {
    let config = &scene.routing;

    let mut children: HashMap<&str, Vec<&NodeSpec>> = HashMap::new();
    for node in &scene.nodes {
        if let Some(parent) = node.parent() {
            children.entry(parent).or_default().push(node);
        }
    }
    let nodes_by_id: HashMap<&str, &NodeSpec> =
        scene.nodes.iter().map(|n| (n.id(), n)).collect();

    let leaves: Vec<&NodeSpec> = scene
        .nodes
        .iter()
        .filter(|n| !children.contains_key(n.id()))
        .collect();

    let mut edges = Vec::with_capacity(scene.edges.len() + scene.branches.len());

    for edge in &scene.edges {
        let (Some(from), Some(to)) = (
            nodes_by_id.get(edge.from.get_ref().as_str()),
            nodes_by_id.get(edge.to.get_ref().as_str()),
        ) else {
            continue;
        };
        edges.push(route_scene_edge(edge, from, to, &leaves, config));
    }

    let mut grids: HashMap<&str, ChannelGrid> = HashMap::new();
    for branch in &scene.branches {
        let container_id = branch.container.get_ref().as_str();
        let (Some(container), Some(target)) = (
            nodes_by_id.get(container_id),
            nodes_by_id.get(branch.target.get_ref().as_str()),
        ) else {
            continue;
        };
        let siblings = children.get(container_id).map(Vec::as_slice).unwrap_or(&[]);
        let grid = grids.entry(container_id).or_insert_with(|| {
            let boxes: Vec<BoundingBox> = siblings.iter().map(|c| c.bounds()).collect();
            build_channels(&container.bounds(), &boxes)
        });
        edges.push(route_scene_branch(
            branch, container, target, siblings, grid, config,
        ));
    }

    let nodes: Vec<NodeLayout> = scene
        .nodes
        .iter()
        .map(|n| NodeLayout {
            id: n.id().to_string(),
            label: n.label.clone(),
            is_container: children.contains_key(n.id()),
            bounds: n.bounds(),
        })
        .collect();

    let bounds = scene_bounds(&nodes, &edges);
    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        containers = grids.len(),
        "routed scene"
    );

    RoutedScene {
        name: scene.metadata.as_ref().and_then(|m| m.name.clone()),
        bounds,
        nodes,
        edges,
    }
}

fn route_scene_edge(
    edge: &EdgeSpec,
    from: &NodeSpec,
    to: &NodeSpec,
    leaves: &[&NodeSpec],
    config: &RoutingConfig,
) -> RoutedEdge {
    let obstacles: Vec<BoundingBox> = leaves
        .iter()
        .filter(|n| n.id() != from.id() && n.id() != to.id())
        .map(|n| n.bounds())
        .collect();

    let points = route_peer(
        &from.bounds(),
        edge.from_side,
        &to.bounds(),
        edge.to_side,
        &obstacles,
        config,
    );
    debug!(
        from = from.id(),
        to = to.id(),
        points = points.len(),
        "routed peer edge"
    );

    finish_edge(from.id(), to.id(), EdgeKind::Peer, edge.label.clone(), points, config)
}

fn route_scene_branch(
    branch: &BranchSpec,
    container: &NodeSpec,
    target: &NodeSpec,
    siblings: &[&NodeSpec],
    grid: &ChannelGrid,
    config: &RoutingConfig,
) -> RoutedEdge {
    let container_box = container.bounds();
    let target_box = target.bounds();
    let hub = branch
        .hub
        .unwrap_or_else(|| Point::new(container_box.center().x, grid.top_lane()));
    let obstacles: Vec<BoundingBox> = siblings
        .iter()
        .filter(|n| n.id() != target.id())
        .map(|n| n.bounds())
        .collect();

    let points = branch_route(
        hub,
        anchor_point(&target_box, Side::Top),
        Some(grid),
        Some(&target_box),
        Some(&container_box),
        &obstacles,
    );
    debug!(
        container = container.id(),
        target = target.id(),
        points = points.len(),
        "routed branch"
    );

    finish_edge(
        container.id(),
        target.id(),
        EdgeKind::Branch,
        branch.label.clone(),
        points,
        config,
    )
}

fn finish_edge(
    from: &str,
    to: &str,
    kind: EdgeKind,
    label: Option<String>,
    points: Vec<Point>,
    config: &RoutingConfig,
) -> RoutedEdge {
    RoutedEdge {
        from: from.to_string(),
        to: to.to_string(),
        kind,
        label,
        bends: count_bends(&points),
        d: to_path(&points, config.corner_radius),
        points,
    }
}

fn scene_bounds(nodes: &[NodeLayout], edges: &[RoutedEdge]) -> BoundingBox {
    let mut boxes = nodes.iter().map(|n| n.bounds);
    let Some(first) = boxes.next() else {
        return edges
            .iter()
            .flat_map(|e| e.points.iter())
            .fold(None, |acc: Option<BoundingBox>, &p| {
                Some(match acc {
                    Some(b) => b.expand_to_include(p),
                    None => BoundingBox::new(p.x, p.y, 0.0, 0.0),
                })
            })
            .unwrap_or_default();
    };

    let bounds = boxes.fold(first, |acc, b| acc.union(&b));
    edges
        .iter()
        .flat_map(|e| e.points.iter())
        .fold(bounds, |acc, &p| acc.expand_to_include(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_bounds_cover_points() {
        let nodes = vec![NodeLayout {
            id: "a".to_string(),
            label: None,
            is_container: false,
            bounds: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
        }];
        let edges = vec![RoutedEdge {
            from: "a".to_string(),
            to: "a".to_string(),
            kind: EdgeKind::Peer,
            label: None,
            bends: 0,
            d: String::new(),
            points: vec![Point::new(-5.0, 0.0), Point::new(-5.0, 30.0)],
        }];
        assert_eq!(
            scene_bounds(&nodes, &edges),
            BoundingBox::new(-5.0, 0.0, 15.0, 30.0)
        );
    }

    #[test]
    fn test_empty_scene() {
        let routed = route_scene(&Scene::default());
        assert!(routed.edges.is_empty());
        assert_eq!(routed.bounds, BoundingBox::zero());
    }
}
