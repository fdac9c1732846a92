//! View-only aggregates over a fetched investment list.
//!
//! Nothing here is stored; the dashboard recomputes these on every render.

use crate::models::{Investment, InvestmentType};

/// Category tab on the dashboard. `All` passes everything through, the
/// others are exact matches on the investment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Stock,
    Etf,
    Crypto,
}

impl CategoryFilter {
    pub const TABS: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Stock,
        CategoryFilter::Etf,
        CategoryFilter::Crypto,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(CategoryFilter::All),
            "stock" => Some(CategoryFilter::Stock),
            "etf" => Some(CategoryFilter::Etf),
            "crypto" => Some(CategoryFilter::Crypto),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Stock => "stock",
            CategoryFilter::Etf => "etf",
            CategoryFilter::Crypto => "crypto",
        }
    }

    pub fn tab_label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Assets",
            CategoryFilter::Stock => "Stocks",
            CategoryFilter::Etf => "ETFs",
            CategoryFilter::Crypto => "Crypto",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Investments",
            CategoryFilter::Stock => "Stocks",
            CategoryFilter::Etf => "ETFs",
            CategoryFilter::Crypto => "Cryptocurrencies",
        }
    }

    pub fn description(&self) -> String {
        let noun = match self {
            CategoryFilter::All => "investment",
            other => other.as_str(),
        };
        format!("Manage your {} assets", noun)
    }

    pub fn matches(&self, investment: &Investment) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Stock => investment.kind == InvestmentType::Stock,
            CategoryFilter::Etf => investment.kind == InvestmentType::Etf,
            CategoryFilter::Crypto => investment.kind == InvestmentType::Crypto,
        }
    }
}

/// Subset matching the filter, relative order preserved.
pub fn filter_investments(investments: &[Investment], filter: CategoryFilter) -> Vec<&Investment> {
    investments.iter().filter(|inv| filter.matches(inv)).collect()
}

/// Sum of stored `value` fields.
pub fn total_value(investments: &[Investment]) -> f64 {
    investments.iter().map(|inv| inv.value).sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeCounts {
    pub stock: usize,
    pub etf: usize,
    pub crypto: usize,
    pub bond: usize,
    pub other: usize,
}

impl TypeCounts {
    pub fn total(&self) -> usize {
        self.stock + self.etf + self.crypto + self.bond + self.other
    }

    /// Subtitle of the "Total Assets" card.
    pub fn summary(&self) -> String {
        format!("{} stocks, {} ETFs, {} crypto", self.stock, self.etf, self.crypto)
    }
}

pub fn type_counts(investments: &[Investment]) -> TypeCounts {
    investments.iter().fold(TypeCounts::default(), |mut counts, inv| {
        match inv.kind {
            InvestmentType::Stock => counts.stock += 1,
            InvestmentType::Etf => counts.etf += 1,
            InvestmentType::Crypto => counts.crypto += 1,
            InvestmentType::Bond => counts.bond += 1,
            InvestmentType::Other => counts.other += 1,
        }
        counts
    })
}

pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}
