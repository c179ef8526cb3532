//! The dashboard's in-memory state: the food collection, the editing draft
//! and the two modal surfaces.
//!
//! Readers get `&DashboardState` or a clone of it; only the synchronizer in
//! this crate can mutate it, through the named transitions below.

use crate::types::{Food, FoodId};

/// Visibility of one modal surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

impl ModalState {
    pub fn is_open(self) -> bool {
        self == ModalState::Open
    }

    fn toggled(self) -> Self {
        match self {
            ModalState::Closed => ModalState::Open,
            ModalState::Open => ModalState::Closed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    foods: Vec<Food>,
    editing: Option<Food>,
    add_modal: ModalState,
    edit_modal: ModalState,
}

impl DashboardState {
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// The food staged for the next update, if one was selected.
    pub fn editing_food(&self) -> Option<&Food> {
        self.editing.as_ref()
    }

    pub fn add_modal(&self) -> ModalState {
        self.add_modal
    }

    pub fn edit_modal(&self) -> ModalState {
        self.edit_modal
    }

    pub(crate) fn replace_all(&mut self, foods: Vec<Food>) {
        self.foods = foods;
    }

    pub(crate) fn append(&mut self, food: Food) {
        self.foods.push(food);
    }

    /// Swap in `food` at the position of the entry with the same id. Returns
    /// false and leaves the collection alone when no entry matches.
    pub(crate) fn replace_in_place(&mut self, food: Food) -> bool {
        match self.foods.iter_mut().find(|f| f.id == food.id) {
            Some(slot) => {
                *slot = food;
                true
            }
            None => false,
        }
    }

    /// Drop every entry with `id`, returning how many were removed.
    pub(crate) fn remove_by_id(&mut self, id: FoodId) -> usize {
        let before = self.foods.len();
        self.foods.retain(|f| f.id != id);
        before - self.foods.len()
    }

    pub(crate) fn select_for_edit(&mut self, food: Food) {
        self.editing = Some(food);
        self.edit_modal = ModalState::Open;
    }

    pub(crate) fn toggle_add_modal(&mut self) {
        self.add_modal = self.add_modal.toggled();
    }

    pub(crate) fn toggle_edit_modal(&mut self) {
        self.edit_modal = self.edit_modal.toggled();
    }
}
