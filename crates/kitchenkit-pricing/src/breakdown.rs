//! Cost breakdown of a wall's instances for one quality tier.
//!
//! The breakdown is derived data: it is recomputed from scratch whenever the
//! instance list or the tier changes, and never stored.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use kitchenkit_core::{Catalog, CatalogEntry, QualityTier};
use kitchenkit_layout::ModuleInstance;

/// Money values carry two decimals.
const MONEY_DP: u32 = 2;

/// One row of the breakdown: all priced instances of one module type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownItem {
    #[serde(rename = "type")]
    pub module_type: String,
    pub title: String,
    pub count: u32,
    /// Shared unit price, or `None` when the instances differ in price.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub unit: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
}

/// Price of a single instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedInstance {
    #[serde(rename = "type")]
    pub module_type: String,
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub delta_pct: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit: Decimal,
}

/// Grouped cost summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Breakdown {
    /// One row per module type, in first-seen order.
    pub items: Vec<BreakdownItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// Every instance that received a price.
    pub instances: Vec<PricedInstance>,
}

impl Breakdown {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, module_type: &str) -> Option<&BreakdownItem> {
        self.items.iter().find(|i| i.module_type == module_type)
    }

    /// Number of priced instances.
    pub fn priced_count(&self) -> usize {
        self.instances.len()
    }
}

/// `base * (1 + delta/100)`, rounded half away from zero to two decimals.
///
/// A non-finite delta counts as 0. Returns `None` when the price does not
/// fit a `Decimal`.
pub fn unit_price(base: Decimal, delta_pct: f64) -> Option<Decimal> {
    let delta = Decimal::try_from(delta_pct).unwrap_or(Decimal::ZERO);
    let factor = delta
        .checked_div(Decimal::ONE_HUNDRED)?
        .checked_add(Decimal::ONE)?;
    base.checked_mul(factor).map(round_money)
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Price delta of an instance: its own value, else the catalog variant of
/// exactly its size, else 0.
pub fn delta_pct_for(instance: &ModuleInstance, entry: &CatalogEntry) -> f64 {
    instance.price_delta_pct.unwrap_or_else(|| {
        entry
            .find_size(instance.width, instance.height)
            .map(|s| s.delta_pct_or_zero())
            .unwrap_or(0.0)
    })
}

struct Group {
    item: BreakdownItem,
    mixed_units: bool,
}

/// Computes the breakdown of `instances` against `catalog` at `tier`.
///
/// Instances whose type is not in the catalog, whose entry has no price for
/// the tier, or whose price would overflow are left out of the money figures.
pub fn compute_breakdown(
    instances: &[ModuleInstance],
    catalog: &Catalog,
    tier: QualityTier,
) -> Breakdown {
    let mut groups: Vec<Group> = Vec::new();
    let mut priced = Vec::with_capacity(instances.len());
    let mut total = Decimal::ZERO;

    for instance in instances {
        let Some(entry) = catalog.get(&instance.module_type) else {
            tracing::debug!("No catalog entry for {}, not priced", instance.module_type);
            continue;
        };
        let Some(base) = entry.price(tier) else {
            tracing::debug!("No {} price for {}", tier.key(), instance.module_type);
            continue;
        };

        let delta_pct = delta_pct_for(instance, entry);
        let Some(unit) = unit_price(base, delta_pct) else {
            tracing::warn!(
                "Price of {} at {}% is out of range, not priced",
                instance.module_type,
                delta_pct
            );
            continue;
        };

        let group = groups
            .iter()
            .position(|g| g.item.module_type == instance.module_type);
        let subtotal = match group {
            Some(i) => groups[i].item.subtotal.checked_add(unit),
            None => Some(unit),
        };
        let (Some(subtotal), Some(next_total)) = (subtotal, total.checked_add(unit)) else {
            tracing::warn!("Total overflows with {}, not priced", instance.module_type);
            continue;
        };
        total = next_total;

        match group {
            Some(i) => {
                let group = &mut groups[i];
                group.item.count += 1;
                group.item.subtotal = round_money(subtotal);
                if group.item.unit != Some(unit) {
                    group.mixed_units = true;
                }
            }
            None => groups.push(Group {
                item: BreakdownItem {
                    module_type: instance.module_type.clone(),
                    title: group_title(entry),
                    count: 1,
                    unit: Some(unit),
                    subtotal: unit,
                },
                mixed_units: false,
            }),
        }

        priced.push(PricedInstance {
            module_type: instance.module_type.clone(),
            title: instance.title.clone(),
            width: instance.width,
            height: instance.height,
            delta_pct,
            unit,
        });
    }

    let items: Vec<BreakdownItem> = groups
        .into_iter()
        .map(|g| {
            let mut item = g.item;
            if g.mixed_units {
                item.unit = None;
            }
            item
        })
        .collect();

    Breakdown {
        items,
        total,
        instances: priced,
    }
}

fn group_title(entry: &CatalogEntry) -> String {
    let title = entry.title.trim();
    if title.is_empty() {
        entry.module_type.clone()
    } else {
        title.to_string()
    }
}
