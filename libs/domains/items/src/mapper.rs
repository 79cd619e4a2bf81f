//! Projection between the [`Item`] entity and its [`ItemView`].
//!
//! Field selection only; no business rules live here.

use crate::models::{Item, ItemView};

/// Entity → view. Drops `secret`.
pub fn to_view(item: &Item) -> ItemView {
    ItemView {
        id: item.id,
        name: item.name.clone(),
        size: item.size,
    }
}

pub fn to_views<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<ItemView> {
    items.into_iter().map(to_view).collect()
}

/// View → entity.
///
/// Fields the view does not carry are taken from `existing` when merging
/// into a stored record, and left unset for a fresh draft.
pub fn to_entity(view: ItemView, existing: Option<&Item>) -> Item {
    Item {
        id: view.id,
        name: view.name,
        size: view.size,
        secret: existing.and_then(|item| item.secret.clone()),
    }
}
