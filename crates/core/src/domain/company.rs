use serde::{Deserialize, Serialize};

/// A fully resolved company page record. Built fresh per request and never
/// mutated afterwards; `symbol` always carries the normalized requested
/// ticker, including the unresolved case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub symbol: String,
    pub company_name: String,
    pub annual_revenue: String,
    pub annual_profit: String,
    #[serde(default)]
    pub error: bool,
    pub bond_info: Vec<BondRecord>,
    pub ratings: Vec<RatingRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondRecord {
    pub issuer: String,
    pub maturity: String,
    pub coupon: String,
    pub rating: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub agency: String,
    pub rating: String,
    pub outlook: String,
}
