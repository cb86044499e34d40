//! A running order of quoted windows.

use serde::{Deserialize, Serialize};

use crate::quote::Quote;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    items: Vec<Quote>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, quote: Quote) {
        self.items.push(quote);
    }

    pub fn remove(&mut self, index: usize) -> Option<Quote> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Quote] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.items.iter().map(|q| q.total).sum()
    }

    /// Plain-text order summary for pasting into a chat or an e-mail.
    pub fn format_summary(&self) -> String {
        if self.items.is_empty() {
            return "Order is empty.".to_string();
        }

        let mut out = String::from("Current order:\n\n");
        for (index, item) in self.items.iter().enumerate() {
            out.push_str(&format!("Window {}:\n", index + 1));
            out.push_str(&format!("  Shape: {}\n", item.shape_name));
            out.push_str(&format!("  Size: {} x {} cm\n", item.width_cm, item.height_cm));
            out.push_str(&format!("  Area: {:.2} m2\n", item.area_m2));
            out.push_str(&format!("  Material: {}\n", item.material_name));
            out.push_str(&format!("  Edging: {}\n", item.edging_color_label));
            if item.skirt_height_cm > 0.0 {
                out.push_str(&format!("  Skirt: {} cm\n", item.skirt_height_cm));
            }
            if item.patch_count > 0 {
                out.push_str(&format!("  Patches: {} pcs\n", item.patch_count));
            }
            if item.cutout_count > 0 {
                out.push_str(&format!("  Cutouts: {} pcs\n", item.cutout_count));
            }
            if item.has_zipper {
                out.push_str("  Zipper: yes\n");
            }
            if item.has_pocket {
                let size = item.pocket_size.as_deref().unwrap_or("yes");
                out.push_str(&format!("  Soft entry: {}\n", size));
            }
            out.push_str(&format!("  Price: {}\n\n", item.total));
        }
        out.push_str(&format!("Order total: {}", self.total()));
        out
    }
}
