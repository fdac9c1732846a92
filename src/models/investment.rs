use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentType {
    Stock,
    Etf,
    Crypto,
    Bond,
    Other,
}

impl InvestmentType {
    pub const ALL: [InvestmentType; 5] = [
        InvestmentType::Stock,
        InvestmentType::Etf,
        InvestmentType::Crypto,
        InvestmentType::Bond,
        InvestmentType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentType::Stock => "stock",
            InvestmentType::Etf => "etf",
            InvestmentType::Crypto => "crypto",
            InvestmentType::Bond => "bond",
            InvestmentType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvestmentType::Stock => "Stock",
            InvestmentType::Etf => "ETF",
            InvestmentType::Crypto => "Cryptocurrency",
            InvestmentType::Bond => "Bond",
            InvestmentType::Other => "Other",
        }
    }

    /// Tags written by older clients or by hand ("Stock", "ETF") still land
    /// in the right bucket; anything unknown is `Other`.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or(InvestmentType::Other)
    }
}

impl FromStr for InvestmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stock" => Ok(InvestmentType::Stock),
            "etf" => Ok(InvestmentType::Etf),
            "crypto" => Ok(InvestmentType::Crypto),
            "bond" => Ok(InvestmentType::Bond),
            "other" => Ok(InvestmentType::Other),
            other => Err(format!("Unknown investment type: {}", other)),
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InvestmentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(InvestmentType::from_tag(&tag))
    }
}

// A single holding as stored by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: InvestmentType,
    pub price: f64,
    pub quantity: f64,
    pub value: f64,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub purchase_date: Option<DateTime<Utc>>,
}

/// Accepts RFC 3339, an offset-less ISO datetime (taken as UTC) or a bare
/// date. Anything else reads as `None` so one record can't fail the list.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl Investment {
    /// Label used in toasts and confirmation prompts, e.g. "Apple Inc. (AAPL)".
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }
}

/// Create payload. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub name: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: InvestmentType,
    pub price: f64,
    pub quantity: f64,
    pub value: f64,
    pub purchase_date: DateTime<Utc>,
}

impl NewInvestment {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        kind: InvestmentType,
        price: f64,
        quantity: f64,
        purchase_date: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            kind,
            price,
            quantity,
            value: price * quantity,
            purchase_date,
        }
    }
}

/// Partial update payload; absent fields are left untouched by the store.
///
/// Price and quantity can only be set together through [`InvestmentUpdate::position`],
/// which also writes the derived `value`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<InvestmentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
}

impl InvestmentUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn kind(mut self, kind: InvestmentType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn position(mut self, price: f64, quantity: f64) -> Self {
        self.price = Some(price);
        self.quantity = Some(quantity);
        self.value = Some(price * quantity);
        self
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn quantity(&self) -> Option<f64> {
        self.quantity
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Every editable field set, the shape the edit screen sends.
    pub fn full(
        name: impl Into<String>,
        symbol: impl Into<String>,
        kind: InvestmentType,
        price: f64,
        quantity: f64,
    ) -> Self {
        InvestmentUpdate::default()
            .name(name)
            .symbol(symbol)
            .kind(kind)
            .position(price, quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.symbol.is_none() && self.kind.is_none() && self.price.is_none()
    }

    /// Apply to a stored record, the way the API merges a PUT body.
    pub fn apply_to(&self, investment: &mut Investment) {
        if let Some(name) = &self.name {
            investment.name = name.clone();
        }
        if let Some(symbol) = &self.symbol {
            investment.symbol = symbol.clone();
        }
        if let Some(kind) = self.kind {
            investment.kind = kind;
        }
        if let Some(price) = self.price {
            investment.price = price;
        }
        if let Some(quantity) = self.quantity {
            investment.quantity = quantity;
        }
        if let Some(value) = self.value {
            investment.value = value;
        }
    }
}
