//! Farm plot state tracking: planting, growth, and harvest.
//!
//! The vertical farm holds crops on named plots. This module tracks the
//! growth state of every planted plot and applies the harvest yield rules.
//!
//! - Planting creates a plot entry at progress 0
//! - Each tick every crop grows by its kind's rate times the weather's
//!   growth multiplier, capped at 100
//! - Harvesting a ready plot yields `base_yield`, multiplied by the bonus
//!   multiplier for the distinguished bonus crop, and deletes the entry

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stratos_types::{
    CROP_READY_PROGRESS, CropPlot, ItemId, ItemKind, ItemStack, PlotId, PlotView, Weather,
};
use tracing::info;

use crate::error::WorldError;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A plantable crop kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropKind {
    /// Item id of the crop; also the item produced on harvest.
    pub id: ItemId,
    /// Display name of the harvested item. Derived from the id when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Progress gained per tick under clear skies.
    pub growth_per_tick: Decimal,
}

impl CropKind {
    /// Display name of the harvested produce (`super_grain` -> "super grain").
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.id.as_str().replace('_', " "))
    }
}

/// Harvest yield rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestRules {
    /// Units produced by one harvest of an ordinary crop.
    pub base_yield: Decimal,
    /// The crop kind that earns the bonus multiplier.
    pub bonus_crop: ItemId,
    /// Multiplier applied to the bonus crop's yield.
    pub bonus_multiplier: Decimal,
}

impl HarvestRules {
    /// Yield of one harvest of the given crop kind.
    pub fn yield_for(&self, crop: &ItemId) -> Result<Decimal, WorldError> {
        if *crop == self.bonus_crop {
            self.base_yield
                .checked_mul(self.bonus_multiplier)
                .ok_or(WorldError::ArithmeticOverflow)
        } else {
            Ok(self.base_yield)
        }
    }
}

// ---------------------------------------------------------------------------
// FarmRegistry
// ---------------------------------------------------------------------------

/// Registry mapping plot ids to their crop growth state.
///
/// Plots without an entry in this registry are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmRegistry {
    crops: BTreeMap<PlotId, CropPlot>,
    kinds: Vec<CropKind>,
    rules: HarvestRules,
}

impl FarmRegistry {
    /// Create an empty farm with the given crop catalog and yield rules.
    pub const fn new(kinds: Vec<CropKind>, rules: HarvestRules) -> Self {
        Self {
            crops: BTreeMap::new(),
            kinds,
            rules,
        }
    }

    /// Look up a crop kind in the catalog.
    pub fn kind(&self, crop: &ItemId) -> Option<&CropKind> {
        self.kinds.iter().find(|k| k.id == *crop)
    }

    /// Plant a crop on a plot.
    ///
    /// # Errors
    ///
    /// - [`WorldError::UnknownCrop`] if the crop kind is not in the catalog
    /// - [`WorldError::PlotOccupied`] if the plot already has a crop
    pub fn plant(&mut self, plot: PlotId, crop: &ItemId, current_tick: u64) -> Result<(), WorldError> {
        if self.kind(crop).is_none() {
            return Err(WorldError::UnknownCrop(crop.clone()));
        }
        if self.crops.contains_key(&plot) {
            return Err(WorldError::PlotOccupied(plot));
        }

        info!(plot = %plot, crop = %crop, tick = current_tick, "crop planted");
        self.crops.insert(
            plot,
            CropPlot {
                crop: crop.clone(),
                progress: Decimal::ZERO,
                planted_at_tick: current_tick,
            },
        );
        Ok(())
    }

    /// Advance every crop by one tick of growth.
    ///
    /// Returns the plots whose crop became ready on this tick.
    pub fn grow(&mut self, weather: Weather) -> Vec<PlotId> {
        let multiplier = weather.growth_multiplier();
        let mut ready = Vec::new();

        for (plot, state) in &mut self.crops {
            if state.is_ready() {
                continue;
            }
            let rate = self
                .kinds
                .iter()
                .find(|k| k.id == state.crop)
                .map_or(Decimal::ZERO, |k| k.growth_per_tick.saturating_mul(multiplier));
            state.progress = state.progress.saturating_add(rate).min(CROP_READY_PROGRESS);
            if state.is_ready() {
                ready.push(plot.clone());
            }
        }

        ready
    }

    /// Force a plot's progress, clamped to `[0, 100]`.
    ///
    /// Returns `false` if the plot is empty.
    pub fn set_progress(&mut self, plot: &PlotId, progress: Decimal) -> bool {
        let Some(state) = self.crops.get_mut(plot) else {
            return false;
        };
        state.progress = progress.max(Decimal::ZERO).min(CROP_READY_PROGRESS);
        true
    }

    /// The produce a ready plot would yield, leaving the plot planted.
    ///
    /// An unready or empty plot yields `Ok(None)`.
    pub fn produce(&self, plot: &PlotId) -> Result<Option<ItemStack>, WorldError> {
        let Some(state) = self.crops.get(plot).filter(|s| s.is_ready()) else {
            return Ok(None);
        };

        let amount = self.rules.yield_for(&state.crop)?;
        let name = self
            .kind(&state.crop)
            .map_or_else(|| state.crop.as_str().replace('_', " "), CropKind::display_name);
        Ok(Some(ItemStack::new(state.crop.clone(), name, amount, ItemKind::Crop)))
    }

    /// Harvest a plot.
    ///
    /// Succeeds only when the crop is ready: the plot entry is removed and the
    /// produce is returned as an item stack. An unready or empty plot yields
    /// `Ok(None)` and the registry is unchanged.
    pub fn harvest(&mut self, plot: &PlotId) -> Result<Option<ItemStack>, WorldError> {
        let produce = self.produce(plot)?;
        if let Some(stack) = &produce {
            self.crops.remove(plot);
            info!(plot = %plot, crop = %stack.id, quantity = %stack.quantity, "crop harvested");
        }
        Ok(produce)
    }

    /// Return the crop state of a plot, if any.
    pub fn get(&self, plot: &PlotId) -> Option<&CropPlot> {
        self.crops.get(plot)
    }

    /// Check whether a plot has a crop planted (ready or not).
    pub fn has_crop(&self, plot: &PlotId) -> bool {
        self.crops.contains_key(plot)
    }

    /// Iterate over every planted plot in id order.
    pub fn planted(&self) -> impl Iterator<Item = (&PlotId, &CropPlot)> {
        self.crops.iter()
    }

    /// Return the number of planted plots.
    pub fn active_count(&self) -> usize {
        self.crops.len()
    }

    /// Views for the given plot layout, followed by any planted plot the
    /// layout does not list.
    pub fn views(&self, layout: &[PlotId]) -> Vec<PlotView> {
        let listed = layout.iter().map(|plot| PlotView {
            plot: plot.clone(),
            crop: self.crops.get(plot).cloned(),
        });
        let extra = self
            .crops
            .iter()
            .filter(|(plot, _)| !layout.contains(plot))
            .map(|(plot, crop)| PlotView {
                plot: plot.clone(),
                crop: Some(crop.clone()),
            });
        listed.chain(extra).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn registry() -> FarmRegistry {
        FarmRegistry::new(
            vec![
                CropKind {
                    id: ItemId::new("hydroponic_lettuce"),
                    name: Some(String::from("Hydroponic Lettuce")),
                    growth_per_tick: dec!(0.5),
                },
                CropKind {
                    id: ItemId::new("super_grain"),
                    name: None,
                    growth_per_tick: dec!(0.25),
                },
            ],
            HarvestRules {
                base_yield: dec!(1),
                bonus_crop: ItemId::new("super_grain"),
                bonus_multiplier: dec!(1.5),
            },
        )
    }

    #[test]
    fn plant_creates_entry_at_zero() {
        let mut farm = registry();
        farm.plant(PlotId::new("p1"), &ItemId::new("super_grain"), 12).unwrap();
        let state = farm.get(&PlotId::new("p1")).unwrap();
        assert_eq!(state.progress, dec!(0));
        assert_eq!(state.planted_at_tick, 12);
    }

    #[test]
    fn cannot_double_plant() {
        let mut farm = registry();
        let plot = PlotId::new("p1");
        farm.plant(plot.clone(), &ItemId::new("super_grain"), 0).unwrap();
        let result = farm.plant(plot.clone(), &ItemId::new("hydroponic_lettuce"), 5);
        assert!(matches!(result, Err(WorldError::PlotOccupied(_))));
        assert_eq!(farm.get(&plot).map(|s| s.crop.clone()), Some(ItemId::new("super_grain")));
    }

    #[test]
    fn unknown_crop_is_rejected() {
        let mut farm = registry();
        let result = farm.plant(PlotId::new("p1"), &ItemId::new("moon_melon"), 0);
        assert!(matches!(result, Err(WorldError::UnknownCrop(_))));
        assert_eq!(farm.active_count(), 0);
    }

    #[test]
    fn growth_follows_weather() {
        let mut farm = registry();
        let plot = PlotId::new("p1");
        farm.plant(plot.clone(), &ItemId::new("hydroponic_lettuce"), 0).unwrap();

        farm.grow(Weather::Clear);
        assert_eq!(farm.get(&plot).unwrap().progress, dec!(0.5));
        farm.grow(Weather::Rain);
        assert_eq!(farm.get(&plot).unwrap().progress, dec!(1.125));
        farm.grow(Weather::Smog);
        assert_eq!(farm.get(&plot).unwrap().progress, dec!(1.375));
    }

    #[test]
    fn growth_caps_at_one_hundred_and_reports_once() {
        let mut farm = registry();
        let plot = PlotId::new("p1");
        farm.plant(plot.clone(), &ItemId::new("hydroponic_lettuce"), 0).unwrap();
        assert!(farm.set_progress(&plot, dec!(99.8)));

        assert_eq!(farm.grow(Weather::Clear), vec![plot.clone()]);
        assert_eq!(farm.get(&plot).unwrap().progress, dec!(100));
        assert!(farm.grow(Weather::Clear).is_empty());
        assert_eq!(farm.get(&plot).unwrap().progress, dec!(100));
    }

    #[test]
    fn harvest_before_ready_is_noop() {
        let mut farm = registry();
        let plot = PlotId::new("p1");
        farm.plant(plot.clone(), &ItemId::new("super_grain"), 0).unwrap();
        assert!(farm.set_progress(&plot, dec!(99.99)));
        let before = farm.clone();

        assert_eq!(farm.harvest(&plot).unwrap(), None);
        assert_eq!(farm, before);
    }

    #[test]
    fn produce_leaves_the_plot_planted() {
        let mut farm = registry();
        let plot = PlotId::new("p1");
        farm.plant(plot.clone(), &ItemId::new("super_grain"), 0).unwrap();
        assert_eq!(farm.produce(&plot).unwrap(), None);
        assert!(farm.set_progress(&plot, dec!(100)));

        let preview = farm.produce(&plot).unwrap().unwrap();
        assert_eq!(preview.quantity, dec!(1.5));
        assert!(farm.has_crop(&plot));
        assert_eq!(farm.harvest(&plot).unwrap(), Some(preview));
        assert!(!farm.has_crop(&plot));
    }

    #[test]
    fn harvest_missing_plot_is_noop() {
        let mut farm = registry();
        assert_eq!(farm.harvest(&PlotId::new("nowhere")).unwrap(), None);
        assert_eq!(farm.active_count(), 0);
    }

    #[test]
    fn bonus_crop_yields_one_and_a_half() {
        let mut farm = registry();
        let plot = PlotId::new("p1");
        farm.plant(plot.clone(), &ItemId::new("super_grain"), 0).unwrap();
        assert!(farm.set_progress(&plot, dec!(100)));

        let produce = farm.harvest(&plot).unwrap().unwrap();
        assert_eq!(produce.id, ItemId::new("super_grain"));
        assert_eq!(produce.name, "super grain");
        assert_eq!(produce.quantity, dec!(1.5));
        assert_eq!(produce.kind, ItemKind::Crop);
        assert!(!farm.has_crop(&plot));
    }

    #[test]
    fn ordinary_crop_yields_base() {
        let mut farm = registry();
        let plot = PlotId::new("p2");
        farm.plant(plot.clone(), &ItemId::new("hydroponic_lettuce"), 0).unwrap();
        assert!(farm.set_progress(&plot, dec!(150)));
        let produce = farm.harvest(&plot).unwrap().unwrap();
        assert_eq!(produce.quantity, dec!(1));
        assert_eq!(produce.name, "Hydroponic Lettuce");
    }

    #[test]
    fn set_progress_on_empty_plot_fails() {
        let mut farm = registry();
        assert!(!farm.set_progress(&PlotId::new("p9"), dec!(50)));
    }

    #[test]
    fn views_follow_layout_then_extras() {
        let mut farm = registry();
        farm.plant(PlotId::new("plot_0_1"), &ItemId::new("super_grain"), 0).unwrap();
        farm.plant(PlotId::new("p1"), &ItemId::new("super_grain"), 0).unwrap();
        let layout = vec![PlotId::new("plot_0_0"), PlotId::new("plot_0_1")];

        let views = farm.views(&layout);
        let ids: Vec<&str> = views.iter().map(|v| v.plot.as_str()).collect();
        assert_eq!(ids, vec!["plot_0_0", "plot_0_1", "p1"]);
        assert!(views.first().unwrap().crop.is_none());
        assert!(views.get(1).unwrap().crop.is_some());
    }
}
