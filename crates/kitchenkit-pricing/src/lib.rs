//! # KitchenKit Pricing
//!
//! Turns the instances placed on a wall into a cost estimate:
//!
//! - **Breakdown**: per-instance unit price (base price of the selected
//!   quality tier adjusted by the size variant's delta), grouped by module
//!   type with counts and subtotals, plus the grand total
//! - **Title summary**: a plain count of instances by title, including the
//!   ones the catalog cannot price
//!
//! Both are pure functions of their inputs; callers recompute them after
//! every change.

pub mod breakdown;
pub mod summary;

pub use breakdown::{
    compute_breakdown, delta_pct_for, unit_price, Breakdown, BreakdownItem, PricedInstance,
};
pub use summary::{summarize_titles, TitleCount, TitleSummary};
