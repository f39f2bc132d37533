//! In-memory reference host
//!
//! A small scene graph that implements [`TweenHost`]. Nodes form a
//! translation/rotation hierarchy: a node's world position is its parent's
//! world position plus its local position, and the same additive rule holds
//! for Euler angles. Scale is local only.

use crate::color::Color;
use crate::math::Vec3;
use crate::target::TweenHost;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a node in a [`Scene`]
    pub struct NodeId;
    /// Handle to a color surface in a [`Scene`]
    pub struct SurfaceId;
}

/// A transform node
///
/// The parent link is fixed at spawn time and always points at an older
/// node, so the hierarchy stays acyclic.
#[derive(Clone, Debug)]
pub struct Node {
    parent: Option<NodeId>,
    pub local_position: Vec3,
    pub local_euler_angles: Vec3,
    pub local_scale: Vec3,
    surface: Option<SurfaceId>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            parent: None,
            local_position: Vec3::ZERO,
            local_euler_angles: Vec3::ZERO,
            local_scale: Vec3::ONE,
            surface: None,
        }
    }
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }
}

/// A color-bearing surface (material, sprite tint, ...)
#[derive(Clone, Copy, Debug, Default)]
pub struct Surface {
    pub color: Color,
}

/// Scene graph of nodes and surfaces
#[derive(Default)]
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    surfaces: SlotMap<SurfaceId, Surface>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root node at `position`
    pub fn spawn(&mut self, position: Vec3) -> NodeId {
        self.nodes.insert(Node {
            local_position: position,
            ..Default::default()
        })
    }

    /// Add a node parented to `parent`, at `local_position` relative to it.
    ///
    /// A stale `parent` handle spawns a root node instead.
    pub fn spawn_child(&mut self, parent: NodeId, local_position: Vec3) -> NodeId {
        let parent = self.nodes.contains_key(parent).then_some(parent);
        self.nodes.insert(Node {
            parent,
            local_position,
            ..Default::default()
        })
    }

    /// Give `node` a color surface, replacing any previous one
    pub fn attach_surface(&mut self, node: NodeId, color: Color) -> Option<SurfaceId> {
        let surface = self.surfaces.insert(Surface { color });
        let Some(entry) = self.nodes.get_mut(node) else {
            self.surfaces.remove(surface);
            return None;
        };
        if let Some(old) = entry.surface.replace(surface) {
            self.surfaces.remove(old);
        }
        Some(surface)
    }

    /// Remove `node`, its surface, and all of its descendants
    pub fn despawn(&mut self, node: NodeId) -> bool {
        let Some(removed) = self.nodes.remove(node) else {
            return false;
        };
        if let Some(surface) = removed.surface {
            self.surfaces.remove(surface);
        }

        let children: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(node))
            .map(|(id, _)| id)
            .collect();
        for child in children {
            self.despawn(child);
        }

        tracing::trace!(?node, "despawned scene node");
        true
    }

    /// Remove a surface without touching its node
    pub fn remove_surface(&mut self, surface: SurfaceId) -> bool {
        self.surfaces.remove(surface).is_some()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node)
    }

    pub fn node_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(node)
    }

    pub fn surface(&self, surface: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(surface)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sum of `field` over `node` and its ancestors
    fn accumulate(&self, node: NodeId, field: impl Fn(&Node) -> Vec3) -> Vec3 {
        let mut total = Vec3::ZERO;
        let mut current = self.nodes.get(node);
        while let Some(n) = current {
            total += field(n);
            current = n.parent.and_then(|p| self.nodes.get(p));
        }
        total
    }

    fn parent_accumulated(&self, node: NodeId, field: impl Fn(&Node) -> Vec3) -> Vec3 {
        match self.nodes.get(node).and_then(|n| n.parent) {
            Some(parent) => self.accumulate(parent, field),
            None => Vec3::ZERO,
        }
    }
}

impl TweenHost for Scene {
    type Handle = NodeId;
    type Surface = SurfaceId;

    fn is_valid(&self, target: NodeId) -> bool {
        self.nodes.contains_key(target)
    }

    fn position(&self, target: NodeId) -> Vec3 {
        self.accumulate(target, |n| n.local_position)
    }

    fn set_position(&mut self, target: NodeId, value: Vec3) {
        let offset = self.parent_accumulated(target, |n| n.local_position);
        if let Some(node) = self.nodes.get_mut(target) {
            node.local_position = value - offset;
        }
    }

    fn local_position(&self, target: NodeId) -> Vec3 {
        self.nodes
            .get(target)
            .map(|n| n.local_position)
            .unwrap_or_default()
    }

    fn set_local_position(&mut self, target: NodeId, value: Vec3) {
        if let Some(node) = self.nodes.get_mut(target) {
            node.local_position = value;
        }
    }

    fn euler_angles(&self, target: NodeId) -> Vec3 {
        self.accumulate(target, |n| n.local_euler_angles)
    }

    fn set_euler_angles(&mut self, target: NodeId, value: Vec3) {
        let offset = self.parent_accumulated(target, |n| n.local_euler_angles);
        if let Some(node) = self.nodes.get_mut(target) {
            node.local_euler_angles = value - offset;
        }
    }

    fn local_euler_angles(&self, target: NodeId) -> Vec3 {
        self.nodes
            .get(target)
            .map(|n| n.local_euler_angles)
            .unwrap_or_default()
    }

    fn set_local_euler_angles(&mut self, target: NodeId, value: Vec3) {
        if let Some(node) = self.nodes.get_mut(target) {
            node.local_euler_angles = value;
        }
    }

    fn local_scale(&self, target: NodeId) -> Vec3 {
        self.nodes
            .get(target)
            .map(|n| n.local_scale)
            .unwrap_or(Vec3::ONE)
    }

    fn set_local_scale(&mut self, target: NodeId, value: Vec3) {
        if let Some(node) = self.nodes.get_mut(target) {
            node.local_scale = value;
        }
    }

    fn color_surface(&self, target: NodeId) -> Option<SurfaceId> {
        self.nodes.get(target).and_then(|n| n.surface)
    }

    fn is_surface_valid(&self, surface: SurfaceId) -> bool {
        self.surfaces.contains_key(surface)
    }

    fn surface_color(&self, surface: SurfaceId) -> Color {
        self.surfaces
            .get(surface)
            .map(|s| s.color)
            .unwrap_or_default()
    }

    fn set_surface_color(&mut self, surface: SurfaceId, value: Color) {
        if let Some(s) = self.surfaces.get_mut(surface) {
            s.color = value;
        }
    }
}
