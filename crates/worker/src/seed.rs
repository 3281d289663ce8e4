use desk_core::storage::basic_info::BasicInfoRecord;

/// Placeholder rows for org_basic_info, in whole currency units.
pub fn seed_records() -> Vec<BasicInfoRecord> {
    vec![
        BasicInfoRecord {
            symbol: "JPM".to_string(),
            company_name: "JP Morgan Chase & Co.".to_string(),
            currency: "USD".to_string(),
            annual_revenue: 78_900_000_000,
            annual_profit: 177_556_000_000,
        },
        BasicInfoRecord {
            symbol: "AAPL".to_string(),
            company_name: "Apple Inc.".to_string(),
            currency: "USD".to_string(),
            annual_revenue: 394_300_000_000,
            annual_profit: 995_800_000_000,
        },
        BasicInfoRecord {
            symbol: "GOOGL".to_string(),
            company_name: "Alphabet Inc.".to_string(),
            currency: "USD".to_string(),
            annual_revenue: 307_400_000_000,
            annual_profit: 738_000_000_000,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_uppercase_unique_and_usd() {
        let records = seed_records();
        assert!(!records.is_empty());

        let mut seen = std::collections::BTreeSet::new();
        for record in &records {
            assert_eq!(record.symbol, record.symbol.to_uppercase());
            assert!(seen.insert(record.symbol.clone()), "duplicate {}", record.symbol);
            assert_eq!(record.currency, "USD");
            assert!(record.annual_revenue > 0);
        }
    }
}
