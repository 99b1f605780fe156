//! Views: mapped client windows and their stacking order

mod id;
mod registry;

pub use id::ViewId;
pub use registry::ViewRegistry;

use crate::geometry::{Point, Rect};
use crate::scene::NodeId;
use crate::shell::{ClientId, SurfaceHandle};

/// One client window managed by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    pub id: ViewId,
    pub surface: SurfaceHandle,
    pub client: ClientId,
    /// Top-left of the view's surface in global coordinates
    pub position: Point,
    /// Root of the view's scene subtree (the tagged node)
    pub node: NodeId,
    /// Content node inside the subtree, kept in sync with the client's
    /// last acknowledged geometry
    pub content: NodeId,
    /// Content geometry from the client's last commit. The origin is the
    /// content offset from the surface origin.
    pub geometry: Rect,
    pub mapped: bool,
}
