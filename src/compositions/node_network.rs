use crate::{
    animation::periodic::Pulse,
    compositions::{Composition, CompositionId},
    foundation::core::{Color, FrameContext, Point, Timeline},
    foundation::error::{FramewrightError, FramewrightResult},
    graph::proximity::{Edge, build_edges},
    procgen::entity::{Entity, EntityGenParams, generate_entities},
    procgen::kinematics::positions,
    scene::model::{Fill, SceneGraph, SceneNode, Stroke},
};

/// Edge building is O(n²) per frame, so node counts are capped.
pub const MAX_NODES: usize = 400;

/// Parameters of the `node-network` composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeNetworkConfig {
    /// Number of nodes, at most [`MAX_NODES`]; zero renders an empty scene.
    pub node_count: usize,
    /// Pixel distance below which two nodes are joined.
    pub distance_threshold: f64,
    /// Base core radius; each node scales it by 0.6 to 1.4.
    pub node_size: f64,
    /// Edges and half of the nodes.
    pub primary_color: Color,
    /// The other half of the nodes.
    pub secondary_color: Color,
    /// Canvas fill.
    pub background: Color,
    /// Layout seed.
    pub seed: i64,
    /// Edge stroke width.
    pub edge_width: f64,
}

impl Default for NodeNetworkConfig {
    fn default() -> Self {
        Self {
            node_count: 12,
            distance_threshold: 300.0,
            node_size: 8.0,
            primary_color: Color::rgb(0x3b, 0x82, 0xf6),
            secondary_color: Color::rgb(0xa8, 0x55, 0xf7),
            background: Color::rgb(0x0b, 0x10, 0x20),
            seed: 0,
            edge_width: 1.5,
        }
    }
}

impl NodeNetworkConfig {
    /// Node count within bounds; sizes and threshold positive.
    pub fn validate(&self) -> FramewrightResult<()> {
        if self.node_count > MAX_NODES {
            return Err(FramewrightError::config(format!(
                "node_count must be <= {MAX_NODES}, got {}",
                self.node_count
            )));
        }
        if !(self.distance_threshold.is_finite() && self.distance_threshold > 0.0) {
            return Err(FramewrightError::config("distance_threshold must be > 0"));
        }
        if !(self.node_size.is_finite() && self.node_size > 0.0) {
            return Err(FramewrightError::config("node_size must be > 0"));
        }
        if !(self.edge_width.is_finite() && self.edge_width > 0.0) {
            return Err(FramewrightError::config("edge_width must be > 0"));
        }
        Ok(())
    }

    fn palette(&self) -> [Color; 2] {
        [self.primary_color, self.secondary_color]
    }
}

/// Drifting nodes joined by distance-faded edges.
#[derive(Debug)]
pub struct NodeNetwork {
    config: NodeNetworkConfig,
    timeline: Timeline,
    entities: Vec<Entity>,
}

impl NodeNetwork {
    /// Generate the entities once for this canvas.
    pub fn new(config: NodeNetworkConfig, timeline: Timeline) -> FramewrightResult<Self> {
        config.validate()?;
        timeline.validate()?;
        let entities = generate_entities(EntityGenParams {
            count: config.node_count,
            canvas: timeline.canvas,
            node_size: config.node_size,
            palette_len: config.palette().len(),
            seed: config.seed,
        });
        tracing::debug!(nodes = entities.len(), "mounted node network");
        Ok(Self {
            config,
            timeline,
            entities,
        })
    }

    /// The mounted configuration.
    pub fn config(&self) -> &NodeNetworkConfig {
        &self.config
    }

    /// Static per-node attributes.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Node positions at `frame`.
    pub fn positions(&self, frame: u64) -> Vec<Point> {
        positions(&self.entities, frame, self.timeline.total_frames)
    }

    /// Proximity edges at `frame`.
    pub fn edges(&self, frame: u64) -> Vec<Edge> {
        build_edges(&self.positions(frame), self.config.distance_threshold)
    }
}

impl Composition for NodeNetwork {
    fn id(&self) -> CompositionId {
        CompositionId::NodeNetwork
    }

    fn timeline(&self) -> Timeline {
        self.timeline
    }

    fn render(&self, ctx: &FrameContext) -> SceneGraph {
        let mut scene = SceneGraph::new(ctx.canvas, self.config.background);
        let pts = self.positions(ctx.frame.0);
        let palette = self.config.palette();

        for e in build_edges(&pts, self.config.distance_threshold) {
            scene.push(SceneNode::Line {
                from: pts[e.from],
                to: pts[e.to],
                stroke: Stroke::new(self.config.primary_color, self.config.edge_width)
                    .opacity(e.opacity)
                    .round(),
            });
        }

        for (entity, &p) in self.entities.iter().zip(&pts) {
            let color = palette[entity.color_index % palette.len()];
            let pulse = Pulse::looping(2, 0.15, 1.0)
                .with_phase(entity.id as f64 * 0.7)
                .sample(ctx);
            let r = entity.size * pulse;
            scene.push(SceneNode::filled_circle(
                p,
                r * 2.5,
                Fill::with_opacity(color, 0.15),
            ));
            scene.push(SceneNode::filled_circle(p, r, Fill::solid(color)));
        }
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/node_network.rs"]
mod tests;
