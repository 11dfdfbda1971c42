//! Scene-graph collaborator interface
//!
//! The converter never talks to a host application directly. Everything it
//! needs (locator creation, world-space placement and keyframing) goes
//! through [`SceneGraph`], so a host binding only has to implement four
//! methods. [`RecordingScene`] is an in-memory implementation that keeps
//! every placement and keyframe for inspection.

use crate::decompose::MatrixDecomposer;
use crate::error::{NuCamError, Result};
use crate::matrix::AffineMatrix;
use crate::order::RotationOrder;
use crate::transform::TransformRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyable transform channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    TranslateX,
    TranslateY,
    TranslateZ,
    RotateX,
    RotateY,
    RotateZ,
    ScaleX,
    ScaleY,
    ScaleZ,
}

/// The nine channels keyed for every animated frame
pub const TRANSFORM_CHANNELS: [Channel; 9] = [
    Channel::TranslateX,
    Channel::TranslateY,
    Channel::TranslateZ,
    Channel::RotateX,
    Channel::RotateY,
    Channel::RotateZ,
    Channel::ScaleX,
    Channel::ScaleY,
    Channel::ScaleZ,
];

impl Channel {
    /// Attribute name as hosts usually spell it
    pub fn name(self) -> &'static str {
        match self {
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::TranslateZ => "translateZ",
            Self::RotateX => "rotateX",
            Self::RotateY => "rotateY",
            Self::RotateZ => "rotateZ",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::ScaleZ => "scaleZ",
        }
    }

    /// Read this channel out of a record (rotation channels map to the stored angle slots)
    pub fn value(self, record: &TransformRecord) -> f64 {
        match self {
            Self::TranslateX => record.translation.x,
            Self::TranslateY => record.translation.y,
            Self::TranslateZ => record.translation.z,
            Self::RotateX => record.rotation.a,
            Self::RotateY => record.rotation.b,
            Self::RotateZ => record.rotation.c,
            Self::ScaleX => record.scale.x,
            Self::ScaleY => record.scale.y,
            Self::ScaleZ => record.scale.z,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Host scene operations used by the importer
///
/// Implementations report their own failures as [`NuCamError::SceneGraph`].
pub trait SceneGraph {
    /// Handle to a node owned by the scene
    type Node: Clone + fmt::Debug;

    /// Create an empty transform node, optionally parented
    fn create_locator(&mut self, parent: Option<&Self::Node>, name: &str) -> Result<Self::Node>;

    /// Set the node's world-space matrix at `time`
    fn set_world_transform(&mut self, node: &Self::Node, matrix: &AffineMatrix, time: f64) -> Result<()>;

    /// Key the current value of `channels` at `time`
    fn insert_keyframe(&mut self, node: &Self::Node, channels: &[Channel], time: f64) -> Result<()>;

    /// Rotation order the host uses for this node's rotate channels
    fn rotation_order(&self, node: &Self::Node) -> Result<RotationOrder>;
}

/// Node handle of a [`RecordingScene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A keyed sample: the decomposed transform and the channels that were keyed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f64,
    pub channels: Vec<Channel>,
    pub transform: TransformRecord,
}

impl Keyframe {
    /// Keyed value of `channel`, `None` if it was not part of this key
    pub fn value(&self, channel: Channel) -> Option<f64> {
        self.channels
            .contains(&channel)
            .then(|| channel.value(&self.transform))
    }
}

/// A node as stored by [`RecordingScene`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub rotation_order: RotationOrder,
    /// Last world matrix set on the node
    pub world: AffineMatrix,
    /// Time of the last `set_world_transform` call
    pub world_time: Option<f64>,
    pub keyframes: Vec<Keyframe>,
}

/// In-memory [`SceneGraph`]
///
/// Keyframing decomposes the node's current world matrix with the node's
/// rotation order, so keyed values are exactly what a host would read back
/// from its transform channels.
#[derive(Debug, Clone, Default)]
pub struct RecordingScene {
    nodes: Vec<RecordedNode>,
    default_rotation_order: RotationOrder,
    keyframe_limit: Option<usize>,
    keyframes_inserted: usize,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotation order given to every node created afterwards
    pub fn with_rotation_order(mut self, order: RotationOrder) -> Self {
        self.default_rotation_order = order;
        self
    }

    /// Fail every keyframe insertion after the first `limit`
    pub fn with_keyframe_limit(mut self, limit: usize) -> Self {
        self.keyframe_limit = Some(limit);
        self
    }

    pub fn set_rotation_order(&mut self, node: NodeId, order: RotationOrder) -> Result<()> {
        self.node_mut(node)?.rotation_order = order;
        Ok(())
    }

    pub fn nodes(&self) -> &[RecordedNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&RecordedNode> {
        self.nodes.get(id.0)
    }

    /// First node with the given name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(NodeId)
    }

    /// Direct children of `parent`, in creation order
    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent == Some(parent))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    /// Keyframes of a node, empty for unknown ids
    pub fn keyframes(&self, id: NodeId) -> &[Keyframe] {
        match self.node(id) {
            Some(node) => &node.keyframes,
            None => &[],
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut RecordedNode> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| NuCamError::SceneGraph(format!("no node {id}")))
    }
}

impl SceneGraph for RecordingScene {
    type Node = NodeId;

    fn create_locator(&mut self, parent: Option<&NodeId>, name: &str) -> Result<NodeId> {
        if let Some(parent) = parent
            && self.node(*parent).is_none()
        {
            return Err(NuCamError::SceneGraph(format!(
                "cannot parent '{name}' under missing node {parent}"
            )));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(RecordedNode {
            name: name.to_string(),
            parent: parent.copied(),
            rotation_order: self.default_rotation_order,
            world: AffineMatrix::IDENTITY,
            world_time: None,
            keyframes: Vec::new(),
        });
        log::trace!("Created locator '{name}' {id}");
        Ok(id)
    }

    fn set_world_transform(&mut self, node: &NodeId, matrix: &AffineMatrix, time: f64) -> Result<()> {
        let node = self.node_mut(*node)?;
        node.world = *matrix;
        node.world_time = Some(time);
        Ok(())
    }

    fn insert_keyframe(&mut self, node: &NodeId, channels: &[Channel], time: f64) -> Result<()> {
        if let Some(limit) = self.keyframe_limit
            && self.keyframes_inserted >= limit
        {
            return Err(NuCamError::SceneGraph(format!(
                "keyframe limit of {limit} reached"
            )));
        }

        let target = self.node_mut(*node)?;
        let transform = MatrixDecomposer::new().decompose(&target.world, target.rotation_order)?;
        target.keyframes.push(Keyframe {
            time,
            channels: channels.to_vec(),
            transform,
        });
        self.keyframes_inserted += 1;
        Ok(())
    }

    fn rotation_order(&self, node: &NodeId) -> Result<RotationOrder> {
        self.node(*node)
            .map(|node| node.rotation_order)
            .ok_or_else(|| NuCamError::SceneGraph(format!("no node {node}")))
    }
}
