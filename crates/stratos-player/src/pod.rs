//! Pod customization: placing inventory items into the slots of the
//! player's home pod on the rooftop commune.
//!
//! Placing an item takes one unit out of the inventory. When a slot already
//! holds a different item, that item goes back into the inventory. Item data
//! for placed items is resolved from the inventory first and the static item
//! catalog second, so a slot keeps rendering after its last unit was placed.

use rust_decimal::Decimal;
use stratos_types::{ItemId, ItemStack, PlacedPodItem, PlayerState, PodSlot, SlotId};
use tracing::warn;

use crate::error::PlayerError;
use crate::inventory;

/// Outcome of a successful [`customize_pod`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodPlacement {
    /// The slot that was customized.
    pub slot: PodSlot,
    /// The item now in the slot (quantity 1).
    pub placed: ItemStack,
    /// The item that was in the slot before and went back to the inventory.
    pub returned: Option<ItemStack>,
}

/// Resolve full item data for an item id, with quantity 1.
///
/// Looks in the player's inventory first, then in the catalog.
pub fn resolve_item(player: &PlayerState, catalog: &[ItemStack], item: &ItemId) -> Option<ItemStack> {
    inventory::find_item(&player.inventory, item)
        .or_else(|| inventory::find_item(catalog, item))
        .map(|stack| stack.with_quantity(Decimal::ONE))
}

/// Place one unit of an inventory item into a pod slot.
///
/// # Errors
///
/// - [`PlayerError::UnknownSlot`] if the pod has no such slot
/// - [`PlayerError::ItemNotFound`] if the player does not hold the item
/// - [`PlayerError::NotPlaceable`] if the item is a crop or raw resource
///
/// The player is unchanged when an error is returned.
pub fn customize_pod(
    player: &mut PlayerState,
    slots: &[PodSlot],
    catalog: &[ItemStack],
    slot: &SlotId,
    item: &ItemId,
) -> Result<PodPlacement, PlayerError> {
    let target = slots
        .iter()
        .find(|s| s.id == *slot)
        .ok_or_else(|| PlayerError::UnknownSlot(slot.clone()))?;

    let held = inventory::find_item(&player.inventory, item)
        .filter(|stack| stack.quantity >= Decimal::ONE)
        .ok_or_else(|| PlayerError::ItemNotFound(item.clone()))?;
    if !held.kind.is_placeable() {
        return Err(PlayerError::NotPlaceable(item.clone()));
    }
    let placed = held.with_quantity(Decimal::ONE);

    let previous = player.pod.get(slot).cloned();
    if previous.as_ref() == Some(item) {
        return Ok(PodPlacement {
            slot: target.clone(),
            placed,
            returned: None,
        });
    }

    // Resolve the old item before the inventory changes underneath it.
    let returned = previous.and_then(|old| {
        let data = resolve_item(player, catalog, &old);
        if data.is_none() {
            warn!(slot = %slot, item = %old, "no item data for replaced pod item, not returned");
        }
        data
    });

    inventory::remove_item(&mut player.inventory, item, Decimal::ONE)?;
    if let Some(old) = &returned {
        inventory::add_item(&mut player.inventory, old)?;
    }
    player.pod.insert(slot.clone(), item.clone());

    Ok(PodPlacement {
        slot: target.clone(),
        placed,
        returned,
    })
}

/// Resolve every occupied slot into renderable placements, in slot order.
///
/// Slots whose item cannot be resolved are skipped with a warning.
pub fn pod_layout(player: &PlayerState, slots: &[PodSlot], catalog: &[ItemStack]) -> Vec<PlacedPodItem> {
    slots
        .iter()
        .filter_map(|slot| {
            let item_id = player.pod.get(&slot.id)?;
            let Some(item) = resolve_item(player, catalog, item_id) else {
                warn!(slot = %slot.id, item = %item_id, "pod item has no data, skipping");
                return None;
            };
            Some(PlacedPodItem {
                slot: slot.id.clone(),
                position: slot.position,
                item,
            })
        })
        .collect()
}
