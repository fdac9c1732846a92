mod investment;
mod user;

pub use investment::{Investment, InvestmentType, InvestmentUpdate, NewInvestment};
pub use user::{User, UserUpdate};
