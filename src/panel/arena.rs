//! Panel storage
//!
//! Panels live in a map keyed by [`PanelId`]; a separate vector holds the
//! display order, which is also the focus and drawing order. Handles stay
//! valid across inserts and removals of other panels.

use super::{Model, Panel};
use crate::layout::{Pos, Tiling};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(u32);

#[derive(Debug, Default)]
pub struct PanelArena {
    order: Vec<PanelId>,
    slots: FxHashMap<PanelId, Panel>,
    next: u32,
}

impl PanelArena {
    pub fn new() -> Self {
        PanelArena::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn ids(&self) -> &[PanelId] {
        &self.order
    }

    pub fn index_of(&self, id: PanelId) -> Option<usize> {
        self.order.iter().position(|&p| p == id)
    }

    pub fn get(&self, index: usize) -> Option<&Panel> {
        self.order.get(index).and_then(|id| self.slots.get(id))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Panel> {
        let id = *self.order.get(index)?;
        self.slots.get_mut(&id)
    }

    pub fn by_id(&self, id: PanelId) -> Option<&Panel> {
        self.slots.get(&id)
    }

    pub fn by_id_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.slots.get_mut(&id)
    }

    /// Insert at `index` (clamped to the end) and return the new handle
    pub fn insert(&mut self, index: usize, panel: Panel) -> PanelId {
        let id = PanelId(self.next);
        self.next += 1;
        self.slots.insert(id, panel);
        let index = index.min(self.order.len());
        self.order.insert(index, id);
        id
    }

    pub fn push(&mut self, panel: Panel) -> PanelId {
        let len = self.order.len();
        self.insert(len, panel)
    }

    pub fn remove(&mut self, index: usize) -> Option<Panel> {
        if index >= self.order.len() {
            return None;
        }
        let id = self.order.remove(index);
        self.slots.remove(&id)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.slots.clear();
    }

    /// Panels in display order
    pub fn iter(&self) -> impl Iterator<Item = &Panel> + '_ {
        self.order.iter().filter_map(move |id| self.slots.get(id))
    }

    /// All panels in no particular order
    pub fn panels_mut(&mut self) -> impl Iterator<Item = &mut Panel> + '_ {
        self.slots.values_mut()
    }

    /// Exchange the models of two slots; geometry stays put
    pub fn swap_models(&mut self, a: usize, b: usize) {
        if a == b || a >= self.len() || b >= self.len() {
            return;
        }
        let taken = self.get_mut(a).map(|p| std::mem::take(&mut p.model));
        if let (Some(model_a), Some(panel_b)) = (taken, self.get_mut(b)) {
            let model_b = std::mem::replace(&mut panel_b.model, model_a);
            panel_b.view.refresh = true;
            if let Some(panel_a) = self.get_mut(a) {
                panel_a.model = model_b;
                panel_a.view.refresh = true;
            }
        }
    }

    /// Rotate every model one slot forward (or backward with `rev`)
    pub fn rotate_models(&mut self, rev: bool) {
        let n = self.len();
        if n < 2 {
            return;
        }
        let mut models: Vec<Model> = (0..n)
            .filter_map(|i| self.get_mut(i).map(|p| std::mem::take(&mut p.model)))
            .collect();
        if rev {
            models.rotate_left(1);
        } else {
            models.rotate_right(1);
        }
        for (i, model) in models.into_iter().enumerate() {
            if let Some(panel) = self.get_mut(i) {
                panel.model = model;
                panel.view.refresh = true;
            }
        }
    }
}

impl Tiling for PanelArena {
    fn tile_count(&self) -> usize {
        self.len()
    }

    fn tile(&self, index: usize) -> Pos {
        self.get(index).map(|p| p.view.pos).unwrap_or_default()
    }

    fn set_tile(&mut self, index: usize, pos: Pos) {
        if let Some(panel) = self.get_mut(index) {
            if panel.view.pos != pos {
                panel.view.pos = pos;
                panel.view.refresh = true;
            }
        }
    }
}
