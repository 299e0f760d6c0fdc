use serde::{Deserialize, Serialize};

use super::item::Item;

/// A named, ordered column of items.
///
/// Lanes come from the server's lane-definition list at load time; the client
/// only ever mutates the items they contain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub id: String,
    pub name: String,
    /// Left-to-right display rank of the column.
    pub rank: i32,
    pub items: Vec<Item>,
}

impl Lane {
    pub(crate) fn new(id: impl Into<String>, name: impl Into<String>, rank: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rank,
            items: Vec::new(),
        }
    }

    /// Index of the item with `item_id` in this lane's sequence.
    pub fn position_of(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rewrite position ranks to match array order, contiguous from zero.
    pub(crate) fn renumber(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.position = index as i32;
        }
    }
}
