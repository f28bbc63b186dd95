//! Order summary shown before a checkout is confirmed.

use crate::cart::{CartStore, CartTotals};
use crate::ids::LineKey;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One line of the order summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryLine {
    pub key: LineKey,
    pub name: String,
    pub quantity: i64,
    /// Unit price × quantity.
    pub line_total: Money,
    pub note: Option<String>,
}

impl SummaryLine {
    /// e.g. "Burger x2 - $10.00 (no onions)".
    pub fn describe(&self) -> String {
        let mut s = format!("{} x{} - {}", self.name, self.quantity, self.line_total.display());
        if let Some(note) = &self.note {
            s.push_str(&format!(" ({})", note));
        }
        s
    }
}

/// Snapshot of the cart taken at checkout.
///
/// Carries the cart revision it was taken at so a confirmation can be
/// matched against the cart it describes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    /// Cart revision at the time of the snapshot.
    pub revision: u64,
    pub lines: Vec<SummaryLine>,
    pub totals: CartTotals,
    /// Promo code in force, if any.
    pub promo_code: Option<String>,
}

impl OrderSummary {
    pub(crate) fn from_store(store: &CartStore) -> Self {
        let lines = store
            .lines()
            .iter()
            .map(|line| SummaryLine {
                key: line.key.clone(),
                name: line.name.clone(),
                quantity: line.quantity,
                line_total: line.line_total(),
                note: line.note.clone(),
            })
            .collect();

        Self {
            revision: store.revision(),
            lines,
            totals: store.compute_totals(),
            promo_code: store.applied_promo().map(str::to_string),
        }
    }

    pub fn grand_total(&self) -> Money {
        self.totals.grand_total
    }

    /// Multi-line confirmation text.
    pub fn describe(&self) -> String {
        let mut out: Vec<String> = self.lines.iter().map(SummaryLine::describe).collect();
        if let Some(code) = &self.promo_code {
            out.push(format!(
                "Promo {}: -{}",
                code,
                self.totals.discount.display()
            ));
        }
        out.push(format!("Total: {}", self.totals.grand_total.display()));
        out.join("\n")
    }
}
