//! # Softglass Pricing
//!
//! Turns a window and the customer's selections into an itemized quote
//! using an externally supplied [`PriceTable`], and collects quotes into an
//! [`Order`].

pub mod order;
pub mod price_table;
pub mod quote;

pub use order::Order;
pub use price_table::{
    EdgingColor, EdgingPrices, ExtrasPrices, HardwareItem, Material, PriceDefaults, PriceTable,
};
pub use quote::{
    compute_quote, fastener_cost_count, AccessoryCountPolicy, ExtrasSelection, FastenerCountPolicy,
    HardwareSelection, LineItem, MaterialSelection, Quote, QuoteCalculator, QuoteLine,
    QuoteSelection,
};
