use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::{Investment, InvestmentType, InvestmentUpdate, NewInvestment};

pub const FIELDS_REQUIRED: &str = "All fields are required";
const INVALID_NUMBER: &str = "Price and quantity must be non-negative numbers";

/// The five text inputs shared by the add and edit screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvestmentForm {
    pub name: String,
    pub symbol: String,
    pub kind: String,
    pub price: String,
    pub quantity: String,
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInvestment {
    pub name: String,
    pub symbol: String,
    pub kind: InvestmentType,
    pub price: f64,
    pub quantity: f64,
}

impl InvestmentForm {
    pub fn from_investment(investment: &Investment) -> Self {
        Self {
            name: investment.name.clone(),
            symbol: investment.symbol.clone(),
            kind: investment.kind.as_str().to_string(),
            price: investment.price.to_string(),
            quantity: investment.quantity.to_string(),
        }
    }

    pub fn validate(&self) -> Result<ParsedInvestment, AppError> {
        let fields = [&self.name, &self.symbol, &self.kind, &self.price, &self.quantity];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AppError::Validation(FIELDS_REQUIRED.to_string()));
        }

        // The type select only offers the five known tags
        let kind = self.kind.parse::<InvestmentType>().map_err(AppError::Validation)?;

        Ok(ParsedInvestment {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            kind,
            price: parse_magnitude(&self.price)?,
            quantity: parse_magnitude(&self.quantity)?,
        })
    }
}

fn parse_magnitude(input: &str) -> Result<f64, AppError> {
    match input.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(AppError::Validation(INVALID_NUMBER.to_string())),
    }
}

impl ParsedInvestment {
    pub fn value(&self) -> f64 {
        self.price * self.quantity
    }

    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }

    pub fn into_new(self, purchase_date: DateTime<Utc>) -> NewInvestment {
        NewInvestment::new(self.name, self.symbol, self.kind, self.price, self.quantity, purchase_date)
    }

    /// Full five-field update; the purchase date is never resent.
    pub fn into_update(self) -> InvestmentUpdate {
        InvestmentUpdate::full(self.name, self.symbol, self.kind, self.price, self.quantity)
    }
}
