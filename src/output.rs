//! Output set: physical displays placed in the global coordinate space
//!
//! Placement is chosen here, left-to-right in discovery order, the way
//! an auto-layout does it. Rendering frames for an output is entirely
//! the render collaborator's business; the core only keeps the
//! placement rectangles it needs for coordinate mapping.

use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::backend::{OutputHandle, OutputMode};
use crate::geometry::Rect;

/// Unique identifier for outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct OutputId(NonZeroU64);

static OUTPUT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

impl OutputId {
    /// Generate a new unique output ID
    pub fn next() -> Self {
        let id = OUTPUT_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        // Safety: we start at 1 and only increment, so this is never zero
        OutputId(NonZeroU64::new(id).expect("Output ID counter overflow"))
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Output({})", self.0)
    }
}

/// One physical display and its placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output {
    pub id: OutputId,
    pub handle: OutputHandle,
    pub rect: Rect,
}

/// All enabled outputs and their layout
#[derive(Debug, Default)]
pub struct OutputSet {
    outputs: Vec<Output>,
}

impl OutputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a newly enabled output to the right of the current layout
    pub fn add(&mut self, handle: OutputHandle, mode: OutputMode) -> OutputId {
        let x = self.outputs.iter().map(|o| o.rect.right()).max().unwrap_or(0);
        let output = Output {
            id: OutputId::next(),
            handle,
            rect: Rect::new(x, 0, mode.size.w, mode.size.h),
        };
        let id = output.id;
        self.outputs.push(output);
        id
    }

    /// Drop an output and its placement entry
    pub fn remove(&mut self, id: OutputId) -> Option<Output> {
        let idx = self.outputs.iter().position(|o| o.id == id)?;
        Some(self.outputs.remove(idx))
    }

    pub fn find_by_handle(&self, handle: OutputHandle) -> Option<OutputId> {
        self.outputs
            .iter()
            .find(|o| o.handle == handle)
            .map(|o| o.id)
    }

    pub fn get(&self, id: OutputId) -> Option<&Output> {
        self.outputs.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Output> {
        self.outputs.iter()
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Bounding box of every placement rectangle
    pub fn bounding_box(&self) -> Rect {
        let mut iter = self.outputs.iter();
        let Some(first) = iter.next() else {
            return Rect::default();
        };
        let mut x1 = first.rect.x;
        let mut y1 = first.rect.y;
        let mut x2 = first.rect.right();
        let mut y2 = first.rect.bottom();
        for o in iter {
            x1 = x1.min(o.rect.x);
            y1 = y1.min(o.rect.y);
            x2 = x2.max(o.rect.right());
            y2 = y2.max(o.rect.bottom());
        }
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Map a 0..1 normalized position onto the layout's bounding box
    pub fn map_absolute(&self, nx: f64, ny: f64) -> (f64, f64) {
        let bounds = self.bounding_box();
        (
            bounds.x as f64 + nx * bounds.w as f64,
            bounds.y as f64 + ny * bounds.h as f64,
        )
    }
}
