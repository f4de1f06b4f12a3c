//! Inventory operations for the player.
//!
//! The inventory is an ordered list of [`ItemStack`]s with at most one
//! stack per item id. Stacks keep their insertion order so the UI lists
//! items the way the player acquired them. Quantities never go negative and
//! a stack that reaches zero is removed.

use rust_decimal::Decimal;
use stratos_types::{ItemId, ItemStack};

use crate::error::PlayerError;

/// Check an item record before it enters an inventory.
///
/// The id must be non-empty and the quantity non-negative.
pub fn validate_stack(stack: &ItemStack) -> Result<(), PlayerError> {
    if stack.id.is_empty() {
        return Err(PlayerError::InvalidItem {
            reason: String::from("item id is empty"),
        });
    }
    if stack.quantity < Decimal::ZERO {
        return Err(PlayerError::InvalidItem {
            reason: format!("negative quantity {} for {}", stack.quantity, stack.id),
        });
    }
    Ok(())
}

/// Look up the stack for an item id.
pub fn find_item<'a>(inventory: &'a [ItemStack], item: &ItemId) -> Option<&'a ItemStack> {
    inventory.iter().find(|stack| stack.id == *item)
}

/// Quantity held of an item (zero when absent).
pub fn quantity_of(inventory: &[ItemStack], item: &ItemId) -> Decimal {
    find_item(inventory, item).map_or(Decimal::ZERO, |stack| stack.quantity)
}

/// Check whether the inventory contains at least `quantity` of the item.
pub fn has_item(inventory: &[ItemStack], item: &ItemId, quantity: Decimal) -> bool {
    find_item(inventory, item).is_some_and(|stack| stack.quantity >= quantity)
}

/// Add a stack to the inventory.
///
/// If a stack with the same id exists its quantity grows by the incoming
/// quantity; otherwise a copy of the stack is appended. Adding a zero
/// quantity of an item the player does not hold leaves the inventory
/// unchanged.
pub fn add_item(inventory: &mut Vec<ItemStack>, stack: &ItemStack) -> Result<(), PlayerError> {
    validate_stack(stack)?;

    if let Some(existing) = inventory.iter_mut().find(|s| s.id == stack.id) {
        existing.quantity = existing.quantity.checked_add(stack.quantity).ok_or_else(|| {
            PlayerError::ArithmeticOverflow {
                context: format!("stack quantity overflow for {}", stack.id),
            }
        })?;
        return Ok(());
    }

    if !stack.quantity.is_zero() {
        inventory.push(stack.clone());
    }
    Ok(())
}

/// Remove `quantity` units of an item.
///
/// Fails if the item is absent or the player holds less than requested;
/// the inventory is unchanged on failure. Removes the stack entirely when
/// its quantity reaches exactly zero.
pub fn remove_item(
    inventory: &mut Vec<ItemStack>,
    item: &ItemId,
    quantity: Decimal,
) -> Result<(), PlayerError> {
    if quantity < Decimal::ZERO {
        return Err(PlayerError::InvalidItem {
            reason: format!("cannot remove a negative quantity {quantity} of {item}"),
        });
    }

    let index = inventory
        .iter()
        .position(|stack| stack.id == *item)
        .ok_or_else(|| PlayerError::ItemNotFound(item.clone()))?;

    let Some(stack) = inventory.get_mut(index) else {
        return Err(PlayerError::ItemNotFound(item.clone()));
    };

    if stack.quantity < quantity {
        return Err(PlayerError::InsufficientQuantity {
            item: item.clone(),
            requested: quantity,
            available: stack.quantity,
        });
    }

    let remaining = stack.quantity.checked_sub(quantity).ok_or_else(|| {
        PlayerError::ArithmeticOverflow {
            context: String::from("subtraction underflow in remove_item"),
        }
    })?;

    if remaining.is_zero() {
        inventory.remove(index);
    } else {
        stack.quantity = remaining;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use stratos_types::ItemKind;

    use super::*;

    fn lamp(quantity: Decimal) -> ItemStack {
        ItemStack::new(ItemId::new("eco_lamp"), "Eco Lamp", quantity, ItemKind::Furniture)
    }

    fn plant(quantity: Decimal) -> ItemStack {
        ItemStack::new(
            ItemId::new("hydro_plant_small"),
            "Small Hydroponic Plant",
            quantity,
            ItemKind::Plant,
        )
    }

    #[test]
    fn add_item_appends_new_stack() {
        let mut inv = Vec::new();
        assert!(add_item(&mut inv, &lamp(dec!(1))).is_ok());
        assert_eq!(inv.len(), 1);
        assert_eq!(quantity_of(&inv, &ItemId::new("eco_lamp")), dec!(1));
    }

    #[test]
    fn add_item_stacks_existing() {
        let mut inv = vec![lamp(dec!(1))];
        assert!(add_item(&mut inv, &lamp(dec!(2))).is_ok());
        assert_eq!(inv.len(), 1);
        assert_eq!(quantity_of(&inv, &ItemId::new("eco_lamp")), dec!(3));
    }

    #[test]
    fn add_item_preserves_insertion_order() {
        let mut inv = Vec::new();
        assert!(add_item(&mut inv, &plant(dec!(2))).is_ok());
        assert!(add_item(&mut inv, &lamp(dec!(1))).is_ok());
        assert!(add_item(&mut inv, &plant(dec!(1))).is_ok());
        let ids: Vec<&str> = inv.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["hydro_plant_small", "eco_lamp"]);
    }

    #[test]
    fn add_item_rejects_empty_id() {
        let mut inv = Vec::new();
        let bad = ItemStack::new(ItemId::new(""), "Nothing", dec!(1), ItemKind::Tech);
        assert!(matches!(
            add_item(&mut inv, &bad),
            Err(PlayerError::InvalidItem { .. })
        ));
        assert!(inv.is_empty());
    }

    #[test]
    fn add_item_rejects_negative_quantity() {
        let mut inv = vec![lamp(dec!(1))];
        assert!(add_item(&mut inv, &lamp(dec!(-1))).is_err());
        assert_eq!(quantity_of(&inv, &ItemId::new("eco_lamp")), dec!(1));
    }

    #[test]
    fn add_zero_of_new_item_is_noop() {
        let mut inv = Vec::new();
        assert!(add_item(&mut inv, &lamp(dec!(0))).is_ok());
        assert!(inv.is_empty());
    }

    #[test]
    fn has_item_checks_quantity() {
        let inv = vec![plant(dec!(2))];
        let id = ItemId::new("hydro_plant_small");
        assert!(has_item(&inv, &id, dec!(1)));
        assert!(has_item(&inv, &id, dec!(2)));
        assert!(!has_item(&inv, &id, dec!(3)));
        assert!(!has_item(&inv, &ItemId::new("eco_lamp"), dec!(1)));
    }

    #[test]
    fn remove_item_decrements() {
        let mut inv = vec![plant(dec!(2))];
        let id = ItemId::new("hydro_plant_small");
        assert!(remove_item(&mut inv, &id, dec!(1)).is_ok());
        assert_eq!(quantity_of(&inv, &id), dec!(1));
    }

    #[test]
    fn remove_item_exact_removes_stack() {
        let mut inv = vec![plant(dec!(2)), lamp(dec!(1))];
        let id = ItemId::new("hydro_plant_small");
        assert!(remove_item(&mut inv, &id, dec!(2)).is_ok());
        assert!(find_item(&inv, &id).is_none());
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn remove_item_insufficient_leaves_inventory() {
        let mut inv = vec![lamp(dec!(1))];
        let result = remove_item(&mut inv, &ItemId::new("eco_lamp"), dec!(2));
        assert!(matches!(
            result,
            Err(PlayerError::InsufficientQuantity { .. })
        ));
        assert_eq!(inv, vec![lamp(dec!(1))]);
    }

    #[test]
    fn remove_item_absent() {
        let mut inv = Vec::new();
        let result = remove_item(&mut inv, &ItemId::new("eco_lamp"), dec!(1));
        assert!(matches!(result, Err(PlayerError::ItemNotFound(_))));
    }

    #[test]
    fn add_then_remove_restores_inventory() {
        let original = vec![plant(dec!(2)), lamp(dec!(1))];

        // Existing stack.
        let mut inv = original.clone();
        assert!(add_item(&mut inv, &lamp(dec!(4))).is_ok());
        assert!(remove_item(&mut inv, &ItemId::new("eco_lamp"), dec!(4)).is_ok());
        assert_eq!(inv, original);

        // New stack.
        let grain = ItemStack::new(ItemId::new("super_grain"), "super grain", dec!(1.5), ItemKind::Crop);
        assert!(add_item(&mut inv, &grain).is_ok());
        assert!(remove_item(&mut inv, &ItemId::new("super_grain"), dec!(1.5)).is_ok());
        assert_eq!(inv, original);
    }
}
