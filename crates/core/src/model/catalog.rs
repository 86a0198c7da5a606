use std::collections::BTreeSet;

use serde::Deserialize;
use thiserror::Error;

use crate::model::item::{StudyItem, StudyItemError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog json is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog entry {index} is invalid: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: StudyItemError,
    },
}

//
// ─── BUILT-IN TERMS ────────────────────────────────────────────────────────────
//

// (term, definition, example, category)
const BUILTIN_TERMS: &[(&str, &str, &str, &str)] = &[
    (
        "Burn Rate",
        "The rate at which a company spends its cash reserves, typically monthly, to fund operations before generating positive cash flow.",
        "A startup with $500,000 in cash spending $50,000 monthly has a burn rate of $50,000/month.",
        "Financial Metrics",
    ),
    (
        "Cash Runway & Liquidity",
        "Cash runway is the time a company can operate before running out of cash; liquidity is the ability to meet short-term obligations with available assets.",
        "A company with $1M in cash and a $100,000 monthly burn rate has a 10-month runway; liquid assets like cash ensure it can pay immediate bills.",
        "Financial Metrics",
    ),
    (
        "DCF (Discounted Cash Flow)",
        "A valuation method that estimates a company's value by discounting its future cash flows to present value.",
        "A firm projects $100,000 annual cash flow for 5 years; at a 10% discount rate, its present value is approximately $379,000.",
        "Valuation",
    ),
    (
        "EBITDA",
        "Earnings Before Interest, Taxes, Depreciation, and Amortization. A measure of a company's operating performance, excluding non-operating expenses.",
        "A company with $10M revenue, $6M operating expenses, and $1M depreciation has an EBITDA of $3M.",
        "Financial Metrics",
    ),
    (
        "Insider Trends",
        "Patterns of buying or selling company stock by insiders (e.g., executives), indicating their confidence in the company's future.",
        "If a CEO buys 10,000 shares of their company at $50 each, it may signal positive insider sentiment.",
        "Market Analysis",
    ),
    (
        "M&A (Mergers and Acquisitions)",
        "Transactions where companies combine (merge) or one acquires another to enhance growth or market share.",
        "Company A buys Company B for $500M to expand its product line, forming a larger entity.",
        "Corporate Actions",
    ),
    (
        "MACD (Moving Average Convergence Divergence)",
        "A technical indicator using moving averages to identify momentum and potential trend reversals in stock prices.",
        "If a stock's 12-day EMA crosses above its 26-day EMA, the MACD signals a bullish trend.",
        "Technical Analysis",
    ),
    (
        "Resistance",
        "A price level where a stock faces selling pressure, preventing further price increases.",
        "A stock repeatedly fails to break above $100, indicating $100 as a resistance level.",
        "Technical Analysis",
    ),
    (
        "RSI (Relative Strength Index)",
        "A momentum indicator measuring price movement speed and magnitude to assess overbought or oversold conditions.",
        "A stock with an RSI of 75 is considered overbought, suggesting a potential price correction.",
        "Technical Analysis",
    ),
    (
        "Stop-Loss",
        "An order to sell a security when it reaches a specified price to limit potential losses.",
        "An investor buys a stock at $50 and sets a stop-loss at $45 to cap losses at 10%.",
        "Risk Management",
    ),
    (
        "Succession Plan",
        "A strategy to ensure leadership continuity by identifying and preparing successors for key roles.",
        "A company grooms a VP to replace the retiring CEO, ensuring a smooth transition.",
        "Corporate Governance",
    ),
    (
        "Support",
        "A price level where a stock tends to find buying interest, preventing further price declines.",
        "A stock consistently bounces back from $20, indicating $20 as a support level.",
        "Technical Analysis",
    ),
];

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Read-only reference list of study items, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<StudyItem>,
}

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    term: String,
    definition: String,
    #[serde(default)]
    example: String,
    #[serde(default)]
    category: String,
}

impl Catalog {
    /// The financial glossary shipped with the site.
    #[must_use]
    pub fn builtin() -> Self {
        let items: Vec<StudyItem> = BUILTIN_TERMS
            .iter()
            .filter_map(|(term, definition, example, category)| {
                StudyItem::new(*term, *definition, *example, *category).ok()
            })
            .collect();
        debug_assert_eq!(
            items.len(),
            BUILTIN_TERMS.len(),
            "every built-in term must pass validation"
        );
        Self { items }
    }

    #[must_use]
    pub fn from_items(items: Vec<StudyItem>) -> Self {
        Self { items }
    }

    /// Parse a JSON array of `{term, definition, example, category}` records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` for malformed input and
    /// `CatalogError::InvalidItem` for entries that fail validation.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let records: Vec<CatalogRecord> = serde_json::from_str(raw)?;
        let items = records
            .into_iter()
            .enumerate()
            .map(|(index, r)| {
                StudyItem::new(r.term, r.definition, r.example, r.category)
                    .map_err(|source| CatalogError::InvalidItem { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }

    #[must_use]
    pub fn items(&self) -> &[StudyItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items whose term or definition contains `search` (case-insensitive)
    /// and whose category equals `category` when one is given.
    ///
    /// Catalog order is preserved; nothing is mutated.
    #[must_use]
    pub fn filter(&self, search: &str, category: Option<&str>) -> Vec<StudyItem> {
        self.items
            .iter()
            .filter(|item| item.matches_text(search) && item.matches_category(category))
            .cloned()
            .collect()
    }

    /// Distinct categories in alphabetical order, for the category picker.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(StudyItem::category)
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
