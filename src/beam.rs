//! Node chain describing the beam centreline.

use log::debug;
use petgraph::graph::{EdgeIndex, Graph, NodeIndex};

use crate::config::BeamConfig;
use crate::errors::{ConfigError, PickError};
use crate::geometry::{point, Color, Point};

/// Internal representation of a beam node.
#[derive(Clone, Debug)]
struct Node {
    /// Fixed position along the beam axis.
    base_x: f64,
    /// Deflection applied by the most recent tick.
    current_y: f64,
    /// Marker colour.
    color: Color,
}

impl Node {
    /// Create an undeflected node at `base_x`.
    fn new(base_x: f64, color: Color) -> Self {
        Self {
            base_x,
            current_y: 0.0,
            color,
        }
    }

    /// Centre of the node marker after translation.
    fn center(&self) -> Point {
        point(self.base_x, self.current_y, 0.0)
    }
}

/// Internal representation of the span between two neighbouring nodes.
#[derive(Clone, Debug)]
struct Segment {
    /// Undeflected length of the span.
    rest_length: f64,
}

/// A chain of nodes with strictly increasing base positions.
///
/// Nodes are created once and addressed by [`NodeIndex`] for the lifetime of
/// the beam; only their deflection and colour change afterwards.
#[derive(Debug)]
pub struct Beam {
    /// Nodes joined by segments in base position order.
    graph: Graph<Node, Segment>,
    /// Last deflection value written to any node.
    last_deflection: f64,
    /// Node drawn in the highlight colour.
    highlighted: Option<NodeIndex>,
    /// Colour used for the highlighted node.
    highlight_color: Color,
}

impl Beam {
    /// Lay out `config.node_count` nodes spaced `config.node_spacing` apart.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TooFewNodes`] for fewer than two nodes and
    /// [`ConfigError::NonPositive`] for a non-positive spacing.
    ///
    /// # Examples
    /// ```
    /// use beamx::{Beam, BeamConfig};
    ///
    /// let beam = Beam::new(&BeamConfig::default()).expect("valid beam");
    /// assert_eq!(beam.node_count(), 21);
    /// assert_eq!(beam.segment_count(), 20);
    /// ```
    pub fn new(config: &BeamConfig) -> Result<Self, ConfigError> {
        if config.node_count < 2 {
            return Err(ConfigError::TooFewNodes(config.node_count));
        }
        if !(config.node_spacing > 0.0 && config.node_spacing.is_finite()) {
            return Err(ConfigError::NonPositive {
                field: "node_spacing",
                value: config.node_spacing,
            });
        }
        let mut graph = Graph::with_capacity(config.node_count, config.node_count - 1);
        let mut previous: Option<NodeIndex> = None;
        for i in 0..config.node_count {
            let base_x = i as f64 * config.node_spacing;
            let node = graph.add_node(Node::new(base_x, config.node_color));
            if let Some(prev) = previous {
                graph.add_edge(
                    prev,
                    node,
                    Segment {
                        rest_length: config.node_spacing,
                    },
                );
            }
            previous = Some(node);
        }
        Ok(Self {
            graph,
            last_deflection: 0.0,
            highlighted: None,
            highlight_color: config.highlight_color,
        })
    }

    /// Return the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node handles in base position order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Whether `node` belongs to this beam.
    #[must_use]
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.graph.node_weight(node).is_some()
    }

    /// Centre of a node's marker.
    #[must_use]
    pub fn node_center(&self, node: NodeIndex) -> Option<Point> {
        self.graph.node_weight(node).map(Node::center)
    }

    /// Deflection currently applied to a node.
    #[must_use]
    pub fn node_deflection(&self, node: NodeIndex) -> Option<f64> {
        self.graph.node_weight(node).map(|node| node.current_y)
    }

    /// Colour a node is drawn with, taking the highlight into account.
    #[must_use]
    pub fn node_color(&self, node: NodeIndex) -> Option<Color> {
        let weight = self.graph.node_weight(node)?;
        if self.highlighted == Some(node) {
            Some(self.highlight_color)
        } else {
            Some(weight.color)
        }
    }

    /// Fixed base positions of all nodes in order.
    #[must_use]
    pub fn stations(&self) -> Vec<f64> {
        self.graph.node_weights().map(|node| node.base_x).collect()
    }

    /// Current deflection of all nodes in order.
    #[must_use]
    pub fn deflections(&self) -> Vec<f64> {
        self.graph.node_weights().map(|node| node.current_y).collect()
    }

    /// Segment handles in base position order.
    pub fn segment_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    /// Deflected end points of a segment.
    #[must_use]
    pub fn segment_points(&self, segment: EdgeIndex) -> Option<(Point, Point)> {
        let (start, end) = self.graph.edge_endpoints(segment)?;
        Some((self.graph[start].center(), self.graph[end].center()))
    }

    /// Undeflected length of a segment.
    #[must_use]
    pub fn segment_rest_length(&self, segment: EdgeIndex) -> Option<f64> {
        self.graph
            .edge_weight(segment)
            .map(|segment| segment.rest_length)
    }

    /// Write one deflection value per node, in node order.
    ///
    /// When fewer values than nodes are supplied, the remaining nodes reuse the
    /// last value written so the solid stays closed at the free end.
    pub fn apply_deflection(&mut self, values: &[f64]) {
        if values.len() < self.node_count() {
            debug!(
                "{} deflection values for {} nodes; padding with {}",
                values.len(),
                self.node_count(),
                values.last().copied().unwrap_or(self.last_deflection)
            );
        }
        let mut last = self.last_deflection;
        for (i, node) in self.graph.node_weights_mut().enumerate() {
            if let Some(value) = values.get(i) {
                last = *value;
            }
            node.current_y = last;
        }
        self.last_deflection = last;
    }

    /// Recolour every node.
    pub fn set_color(&mut self, color: Color) {
        for node in self.graph.node_weights_mut() {
            node.color = color;
        }
    }

    /// Draw `node` in the highlight colour, restoring any previous highlight.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::UnknownNode`] when `node` is not part of this beam.
    pub fn highlight(&mut self, node: NodeIndex) -> Result<(), PickError> {
        if !self.contains(node) {
            return Err(PickError::UnknownNode(node));
        }
        self.highlighted = Some(node);
        Ok(())
    }

    /// Node currently drawn in the highlight colour.
    #[must_use]
    pub fn highlighted(&self) -> Option<NodeIndex> {
        self.highlighted
    }

    /// Nearest node whose centre lies within `radius` of `target` in the XY plane.
    #[must_use]
    pub fn nearest_node(&self, target: Point, radius: f64) -> Option<NodeIndex> {
        let flat = point(target.x, target.y, 0.0);
        self.graph
            .node_indices()
            .map(|node| (node, self.graph[node].center().distance(flat)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(node, _)| node)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn beam(count: usize) -> Beam {
        Beam::new(&BeamConfig {
            node_count: count,
            ..BeamConfig::default()
        })
        .expect("valid beam")
    }

    #[test]
    fn stations_strictly_increase() {
        let beam = beam(6);
        let stations = beam.stations();
        assert_eq!(stations.len(), 6);
        assert!(stations.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(beam.segment_count(), 5);
    }

    #[test]
    fn too_few_nodes_are_rejected() {
        let error = Beam::new(&BeamConfig {
            node_count: 1,
            ..BeamConfig::default()
        })
        .expect_err("single node rejected");
        assert!(matches!(error, ConfigError::TooFewNodes(1)));
    }

    #[test]
    fn deflection_moves_node_centres() {
        let mut beam = beam(3);
        beam.apply_deflection(&[0.0, 0.5, -1.0]);
        let last = beam.node_indices().last().expect("last node");
        assert_eq!(beam.node_center(last), Some(point(2.0, -1.0, 0.0)));
        let (start, end) = beam
            .segment_indices()
            .next()
            .and_then(|segment| beam.segment_points(segment))
            .expect("first segment");
        assert_eq!(start, point(0.0, 0.0, 0.0));
        assert_eq!(end, point(1.0, 0.5, 0.0));
    }

    #[test]
    fn short_deflection_reuses_last_value() {
        let mut beam = beam(4);
        beam.apply_deflection(&[0.0, 0.25]);
        assert_eq!(beam.deflections(), vec![0.0, 0.25, 0.25, 0.25]);
        beam.apply_deflection(&[]);
        assert_eq!(beam.deflections(), vec![0.25; 4]);
    }

    #[test]
    fn highlight_replaces_previous_node() {
        let mut beam = beam(3);
        let nodes: Vec<_> = beam.node_indices().collect();
        beam.highlight(nodes[0]).expect("known node");
        beam.highlight(nodes[2]).expect("known node");
        assert_eq!(beam.node_color(nodes[0]), Some(Color::RED));
        assert_eq!(beam.node_color(nodes[2]), Some(Color::BLUE));
        let stray = NodeIndex::new(50);
        assert_eq!(beam.highlight(stray), Err(PickError::UnknownNode(stray)));
    }

    #[test]
    fn set_color_applies_to_every_node() {
        let mut beam = beam(3);
        let gray = Color::new(0.5, 0.5, 0.5);
        beam.set_color(gray);
        assert!(beam.node_indices().all(|node| beam.node_color(node) == Some(gray)));
    }

    #[test]
    fn nearest_node_respects_radius() {
        let mut beam = beam(5);
        beam.apply_deflection(&[0.0, 0.1, 0.2, 0.3, 0.4]);
        let hit = beam.nearest_node(point(2.05, 0.2, 7.0), 0.2);
        assert_eq!(hit.map(|node| node.index()), Some(2));
        assert_eq!(beam.nearest_node(point(2.5, 3.0, 0.0), 0.2), None);
    }

    #[test]
    fn segments_keep_rest_length() {
        let beam = beam(3);
        for segment in beam.segment_indices() {
            assert_relative_eq!(beam.segment_rest_length(segment).expect("segment"), 1.0);
        }
    }
}
