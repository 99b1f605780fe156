//! View registry: id/surface lookup plus the stacking order
//!
//! The stacking order holds exactly the mapped views, front-to-back,
//! each exactly once. Unmapping removes a view from the order
//! immediately; the record itself survives until the surface is
//! destroyed so a re-map keeps the same identity.

use std::collections::HashMap;

use crate::error::{CairnError, CairnResult};
use crate::shell::SurfaceHandle;

use super::{View, ViewId};

/// Central registry for all views in the compositor
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: HashMap<ViewId, View>,
    surface_to_id: HashMap<SurfaceHandle, ViewId>,
    /// Mapped views only, front-to-back
    stacking: Vec<ViewId>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view and place it at the front of the stacking order
    pub fn insert(&mut self, view: View) -> ViewId {
        let id = view.id;
        self.surface_to_id.insert(view.surface, id);
        debug_assert!(!self.stacking.contains(&id));
        if view.mapped {
            self.stacking.insert(0, id);
        }
        self.views.insert(id, view);
        id
    }

    /// Remove a view entirely, dropping its stacking entry and surface
    /// mapping
    pub fn remove(&mut self, id: ViewId) -> Option<View> {
        let view = self.views.remove(&id)?;
        self.surface_to_id.remove(&view.surface);
        self.stacking.retain(|v| *v != id);
        Some(view)
    }

    /// Take a mapped view out of the stacking order, keeping the record
    pub fn unmap(&mut self, id: ViewId) -> CairnResult<()> {
        let view = self
            .views
            .get_mut(&id)
            .ok_or(CairnError::ViewNotFound(id))?;
        view.mapped = false;
        self.stacking.retain(|v| *v != id);
        Ok(())
    }

    /// Put an unmapped view back at the front of the stacking order
    pub fn map(&mut self, id: ViewId) -> CairnResult<()> {
        let view = self
            .views
            .get_mut(&id)
            .ok_or(CairnError::ViewNotFound(id))?;
        if !view.mapped {
            view.mapped = true;
            self.stacking.insert(0, id);
        }
        Ok(())
    }

    /// Move a mapped view to the front. Idempotent when already at the
    /// front; does not touch focus.
    pub fn raise(&mut self, id: ViewId) -> CairnResult<()> {
        if !self.views.contains_key(&id) {
            return Err(CairnError::ViewNotFound(id));
        }
        if self.stacking.first() == Some(&id) {
            return Ok(());
        }
        if !self.stacking.contains(&id) {
            return Err(CairnError::ViewNotFound(id));
        }
        self.stacking.retain(|v| *v != id);
        self.stacking.insert(0, id);
        Ok(())
    }

    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.views.get(&id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(&id)
    }

    pub fn find_by_surface(&self, surface: SurfaceHandle) -> Option<ViewId> {
        self.surface_to_id.get(&surface).copied()
    }

    /// Stacking order, front-to-back; mapped views only
    pub fn stacking(&self) -> &[ViewId] {
        &self.stacking
    }

    /// The rearmost mapped view, target of focus cycling
    pub fn back(&self) -> Option<ViewId> {
        self.stacking.last().copied()
    }

    pub fn mapped_count(&self) -> usize {
        self.stacking.len()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewId, &View)> {
        self.views.iter().map(|(id, view)| (*id, view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rect};
    use crate::scene::Scene;
    use crate::shell::ClientId;

    fn view(surface: u64) -> View {
        let mut scene = Scene::new();
        let node = scene.create_tree(scene.root());
        View {
            id: ViewId::next(),
            surface: SurfaceHandle(surface),
            client: ClientId(1),
            position: Point::default(),
            node,
            content: node,
            geometry: Rect::new(0, 0, 100, 100),
            mapped: true,
        }
    }

    #[test]
    fn insert_places_at_front() {
        let mut reg = ViewRegistry::new();
        let a = reg.insert(view(1));
        let b = reg.insert(view(2));
        assert_eq!(reg.stacking(), &[b, a]);
    }

    #[test]
    fn raise_is_idempotent_at_front() {
        let mut reg = ViewRegistry::new();
        let a = reg.insert(view(1));
        let b = reg.insert(view(2));
        reg.raise(b).unwrap();
        assert_eq!(reg.stacking(), &[b, a]);
        reg.raise(a).unwrap();
        assert_eq!(reg.stacking(), &[a, b]);
    }

    #[test]
    fn raise_unknown_view_is_an_error() {
        let mut reg = ViewRegistry::new();
        assert!(reg.raise(ViewId::next()).is_err());
    }

    #[test]
    fn unmap_leaves_record_but_not_stacking() {
        let mut reg = ViewRegistry::new();
        let a = reg.insert(view(1));
        reg.unmap(a).unwrap();
        assert!(reg.stacking().is_empty());
        assert!(reg.get(a).is_some());
        assert!(!reg.get(a).unwrap().mapped);
        reg.map(a).unwrap();
        assert_eq!(reg.stacking(), &[a]);
    }
}
