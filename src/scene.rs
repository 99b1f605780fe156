//! Scene graph: positioned nodes, view tagging and hit-testing
//!
//! The rendering collaborator consumes this scene as a positioned set of
//! content regions; the core consumes it for hit-testing. Nodes live in
//! an arena indexed by stable ids, with a side table mapping tagged node
//! ids to the view that owns them. Resolving "which view is under the
//! cursor" walks the parent chain up to the nearest tagged ancestor, so
//! generic nodes never carry owner pointers.

use std::collections::HashMap;
use std::fmt;

use crate::geometry::{Point, Size};
use crate::shell::SurfaceHandle;
use crate::view::ViewId;

/// Stable identifier for a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

#[derive(Debug)]
struct SceneNode {
    parent: Option<NodeId>,
    /// Children front-to-back; the first child draws (and hits) on top
    children: Vec<NodeId>,
    /// Position relative to the parent node
    position: Point,
    /// Content extent; `None` for pure grouping nodes
    size: Option<Size>,
    /// Surface backing a content node
    surface: Option<SurfaceHandle>,
    /// Disabled subtrees neither draw nor hit
    enabled: bool,
}

/// A successful hit test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub view: ViewId,
    pub surface: SurfaceHandle,
    /// Surface-local coordinates of the hit point
    pub sx: f64,
    pub sy: f64,
}

/// Arena of scene nodes plus the view-tag side table
#[derive(Debug)]
pub struct Scene {
    nodes: HashMap<NodeId, SceneNode>,
    owners: HashMap<NodeId, ViewId>,
    root: NodeId,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        let root = NodeId(1);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            SceneNode {
                parent: None,
                children: Vec::new(),
                position: Point::default(),
                size: None,
                surface: None,
                enabled: true,
            },
        );
        Self {
            nodes,
            owners: HashMap::new(),
            root,
            next_id: 2,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn alloc(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        if let Some(parent) = node.parent {
            if let Some(p) = self.nodes.get_mut(&parent) {
                // New nodes go on top of their siblings
                p.children.insert(0, id);
            }
        }
        self.nodes.insert(id, node);
        id
    }

    /// Create a grouping node under `parent`
    pub fn create_tree(&mut self, parent: NodeId) -> NodeId {
        self.alloc(SceneNode {
            parent: Some(parent),
            children: Vec::new(),
            position: Point::default(),
            size: None,
            surface: None,
            enabled: true,
        })
    }

    /// Create a content node carrying a surface region
    pub fn create_content(
        &mut self,
        parent: NodeId,
        position: Point,
        size: Size,
        surface: SurfaceHandle,
    ) -> NodeId {
        self.alloc(SceneNode {
            parent: Some(parent),
            children: Vec::new(),
            position,
            size: Some(size),
            surface: Some(surface),
            enabled: true,
        })
    }

    /// Tag a node as the root of a view's subtree
    pub fn tag(&mut self, node: NodeId, view: ViewId) {
        self.owners.insert(node, view);
    }

    pub fn set_position(&mut self, node: NodeId, position: Point) {
        match self.nodes.get_mut(&node) {
            Some(n) => n.position = position,
            None => tracing::warn!("set_position on missing node {node}"),
        }
    }

    pub fn position(&self, node: NodeId) -> Option<Point> {
        self.nodes.get(&node).map(|n| n.position)
    }

    pub fn set_content_region(&mut self, node: NodeId, position: Point, size: Size) {
        match self.nodes.get_mut(&node) {
            Some(n) => {
                n.position = position;
                n.size = Some(size);
            }
            None => tracing::warn!("set_content_region on missing node {node}"),
        }
    }

    pub fn set_enabled(&mut self, node: NodeId, enabled: bool) {
        match self.nodes.get_mut(&node) {
            Some(n) => n.enabled = enabled,
            None => tracing::warn!("set_enabled on missing node {node}"),
        }
    }

    /// Move a node in front of all its siblings. Idempotent when already
    /// at the front.
    pub fn raise_to_top(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(&node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(&parent) {
            if p.children.first() == Some(&node) {
                return;
            }
            p.children.retain(|c| *c != node);
            p.children.insert(0, node);
        }
    }

    /// Destroy a node and its whole subtree, clearing any view tags
    pub fn destroy(&mut self, node: NodeId) {
        let Some(n) = self.nodes.remove(&node) else {
            tracing::warn!("destroy on missing node {node}");
            return;
        };
        self.owners.remove(&node);
        if let Some(parent) = n.parent {
            if let Some(p) = self.nodes.get_mut(&parent) {
                p.children.retain(|c| *c != node);
            }
        }
        for child in n.children {
            self.destroy_subtree(child);
        }
    }

    fn destroy_subtree(&mut self, node: NodeId) {
        if let Some(n) = self.nodes.remove(&node) {
            self.owners.remove(&node);
            for child in n.children {
                self.destroy_subtree(child);
            }
        }
    }

    /// Topmost content node at a point, with node-local coordinates
    pub fn node_at(&self, x: f64, y: f64) -> Option<(NodeId, f64, f64)> {
        self.node_at_rec(self.root, x, y)
    }

    fn node_at_rec(&self, node: NodeId, x: f64, y: f64) -> Option<(NodeId, f64, f64)> {
        let n = self.nodes.get(&node)?;
        if !n.enabled {
            return None;
        }
        let lx = x - n.position.x as f64;
        let ly = y - n.position.y as f64;
        for child in &n.children {
            if let Some(hit) = self.node_at_rec(*child, lx, ly) {
                return Some(hit);
            }
        }
        if let Some(size) = n.size {
            if lx >= 0.0 && ly >= 0.0 && lx < size.w as f64 && ly < size.h as f64 {
                return Some((node, lx, ly));
            }
        }
        None
    }

    /// Hit test resolved to the owning view: find the topmost content
    /// node, then walk parent links until a tagged node is found.
    pub fn view_at(&self, x: f64, y: f64) -> Option<Hit> {
        let (node, sx, sy) = self.node_at(x, y)?;
        let surface = self.nodes.get(&node)?.surface?;
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if let Some(view) = self.owners.get(&id) {
                return Some(Hit {
                    view: *view,
                    surface,
                    sx,
                    sy,
                });
            }
            cursor = self.nodes.get(&id)?.parent;
        }
        None
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_view(scene: &mut Scene, view: ViewId, pos: Point, size: Size, surface: u64) -> NodeId {
        let tree = scene.create_tree(scene.root());
        scene.tag(tree, view);
        scene.set_position(tree, pos);
        scene.create_content(tree, Point::default(), size, SurfaceHandle(surface));
        tree
    }

    #[test]
    fn hit_resolves_owner_through_parent_chain() {
        let mut scene = Scene::new();
        let view = ViewId::next();
        content_view(&mut scene, view, Point::new(10, 10), Size::new(50, 40), 7);

        let hit = scene.view_at(20.0, 15.0).expect("hit");
        assert_eq!(hit.view, view);
        assert_eq!(hit.surface, SurfaceHandle(7));
        assert_eq!((hit.sx, hit.sy), (10.0, 5.0));
    }

    #[test]
    fn front_sibling_wins() {
        let mut scene = Scene::new();
        let below = ViewId::next();
        let above = ViewId::next();
        let below_node =
            content_view(&mut scene, below, Point::new(0, 0), Size::new(100, 100), 1);
        content_view(&mut scene, above, Point::new(0, 0), Size::new(100, 100), 2);

        // `above` was created later, so it sits on top
        assert_eq!(scene.view_at(50.0, 50.0).unwrap().view, above);

        scene.raise_to_top(below_node);
        assert_eq!(scene.view_at(50.0, 50.0).unwrap().view, below);
    }

    #[test]
    fn disabled_subtree_does_not_hit() {
        let mut scene = Scene::new();
        let view = ViewId::next();
        let node = content_view(&mut scene, view, Point::new(0, 0), Size::new(10, 10), 1);
        assert!(scene.view_at(5.0, 5.0).is_some());
        scene.set_enabled(node, false);
        assert!(scene.view_at(5.0, 5.0).is_none());
    }

    #[test]
    fn miss_returns_none() {
        let scene = Scene::new();
        assert!(scene.view_at(5.0, 5.0).is_none());
    }
}
