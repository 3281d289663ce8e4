use crate::domain::company::{BondRecord, CompanyProfile, RatingRecord};
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const BUILTIN_DEFAULT_SYMBOL: &str = "JPM";

/// Read-only reference data backing the company page. Built once at startup
/// (compiled-in table or a JSON override file) and shared across requests.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    default_symbol: String,
    companies: BTreeMap<String, CompanyEntry>,
    competitors: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompanyEntry {
    pub symbol: String,
    pub company_name: String,
    pub annual_revenue: String,
    pub annual_profit: String,
}

/// On-disk shape of a reference data override file.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceFile {
    #[serde(default)]
    pub default_symbol: Option<String>,
    pub companies: Vec<CompanyEntry>,
    /// Peer symbols per ticker, in display order. Entries may name symbols
    /// absent from `companies`; no cross-check is performed.
    #[serde(default)]
    pub competitors: BTreeMap<String, Vec<String>>,
}

impl ReferenceFile {
    pub fn validate_and_into_reference(self) -> anyhow::Result<ReferenceData> {
        anyhow::ensure!(!self.companies.is_empty(), "companies must be non-empty");

        let mut companies = BTreeMap::new();
        for mut entry in self.companies {
            let symbol = entry.symbol.trim().to_uppercase();
            anyhow::ensure!(!symbol.is_empty(), "company symbol must be non-empty");
            anyhow::ensure!(
                !entry.company_name.trim().is_empty(),
                "company_name must be non-empty for {symbol}"
            );
            entry.symbol = symbol.clone();
            anyhow::ensure!(
                companies.insert(symbol.clone(), entry).is_none(),
                "duplicate company symbol: {symbol}"
            );
        }

        let default_symbol = self
            .default_symbol
            .map(|s| s.trim().to_uppercase())
            .unwrap_or_else(|| BUILTIN_DEFAULT_SYMBOL.to_string());
        anyhow::ensure!(
            companies.contains_key(&default_symbol),
            "default_symbol {default_symbol} is not in the company table"
        );

        let competitors = self
            .competitors
            .into_iter()
            .map(|(symbol, peers)| (symbol.trim().to_uppercase(), peers))
            .collect();

        Ok(ReferenceData {
            default_symbol,
            companies,
            competitors,
        })
    }
}

impl ReferenceData {
    /// Compiled-in placeholder table used until a real data feed exists.
    pub fn builtin() -> Self {
        let companies = [
            ("JPM", "JP Morgan Chase & Co.", "$278.9B", "$177.556B"),
            ("AAPL", "Apple Inc.", "$394.3B", "$99.8B"),
            ("GOOGL", "Alphabet Inc.", "$307.4B", "$73.8B"),
        ];
        let competitors: [(&str, &[&str]); 3] = [
            ("JPM", &["BAC", "C", "WFC"]),
            ("AAPL", &["MSFT", "GOOGL"]),
            ("GOOGL", &["MSFT", "META"]),
        ];

        Self {
            default_symbol: BUILTIN_DEFAULT_SYMBOL.to_string(),
            companies: companies
                .into_iter()
                .map(|(symbol, company_name, annual_revenue, annual_profit)| {
                    (
                        symbol.to_string(),
                        CompanyEntry {
                            symbol: symbol.to_string(),
                            company_name: company_name.to_string(),
                            annual_revenue: annual_revenue.to_string(),
                            annual_profit: annual_profit.to_string(),
                        },
                    )
                })
                .collect(),
            competitors: competitors
                .into_iter()
                .map(|(symbol, peers)| {
                    (
                        symbol.to_string(),
                        peers.iter().map(|p| p.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let file: ReferenceFile =
            serde_json::from_str(json).context("reference data is not valid JSON")?;
        file.validate_and_into_reference()
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read reference data file failed: {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn default_symbol(&self) -> &str {
        &self.default_symbol
    }

    /// Resolve a ticker to a full page record. Never fails: unknown symbols
    /// degrade to a "not found" record that still carries the normalized
    /// input symbol and the synthetic bond/rating lists.
    pub fn resolve(&self, symbol: &str) -> CompanyProfile {
        let trimmed = symbol.trim();
        let symbol = if trimmed.is_empty() {
            self.default_symbol.clone()
        } else {
            trimmed.to_uppercase()
        };

        match self.companies.get(&symbol) {
            Some(entry) => CompanyProfile {
                symbol: symbol.clone(),
                company_name: entry.company_name.clone(),
                annual_revenue: entry.annual_revenue.clone(),
                annual_profit: entry.annual_profit.clone(),
                error: false,
                bond_info: synthetic_bonds(&entry.company_name),
                ratings: agency_ratings(),
            },
            None => CompanyProfile {
                company_name: format!("Company information not found for {symbol}"),
                annual_revenue: "N/A".to_string(),
                annual_profit: "N/A".to_string(),
                error: true,
                // The issuer falls back to the raw symbol here, so an
                // unresolved ticker still renders a full bond table.
                bond_info: synthetic_bonds(&symbol),
                ratings: agency_ratings(),
                symbol,
            },
        }
    }

    pub fn competitors_for(&self, symbol: &str) -> &[String] {
        self.competitors
            .get(symbol)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn synthetic_bonds(issuer: &str) -> Vec<BondRecord> {
    vec![
        BondRecord {
            issuer: issuer.to_string(),
            maturity: "2025-01-15".to_string(),
            coupon: "3.5%".to_string(),
            rating: "A+".to_string(),
        },
        BondRecord {
            issuer: issuer.to_string(),
            maturity: "2027-06-30".to_string(),
            coupon: "4.2%".to_string(),
            rating: "A+".to_string(),
        },
    ]
}

fn agency_ratings() -> Vec<RatingRecord> {
    vec![
        RatingRecord {
            agency: "Moody's".to_string(),
            rating: "Aa3".to_string(),
            outlook: "Stable".to_string(),
        },
        RatingRecord {
            agency: "S&P".to_string(),
            rating: "A+".to_string(),
            outlook: "Positive".to_string(),
        },
        RatingRecord {
            agency: "Fitch".to_string(),
            rating: "AA-".to_string(),
            outlook: "Stable".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbols_resolve_from_the_table() {
        let reference = ReferenceData::builtin();
        for (symbol, name) in [
            ("JPM", "JP Morgan Chase & Co."),
            ("AAPL", "Apple Inc."),
            ("GOOGL", "Alphabet Inc."),
        ] {
            let profile = reference.resolve(symbol);
            assert!(!profile.error);
            assert_eq!(profile.symbol, symbol);
            assert_eq!(profile.company_name, name);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let reference = ReferenceData::builtin();
        let profile = reference.resolve("jpm");
        assert!(!profile.error);
        assert_eq!(profile.symbol, "JPM");
    }

    #[test]
    fn unknown_symbol_degrades_to_not_found() {
        let reference = ReferenceData::builtin();
        let profile = reference.resolve("zzz");
        assert!(profile.error);
        assert_eq!(profile.symbol, "ZZZ");
        assert_eq!(profile.annual_revenue, "N/A");
        assert_eq!(profile.annual_profit, "N/A");
        assert_eq!(profile.company_name, "Company information not found for ZZZ");
        // Bond issuer falls back to the input symbol verbatim.
        assert_eq!(profile.bond_info.len(), 2);
        assert!(profile.bond_info.iter().all(|b| b.issuer == "ZZZ"));
    }

    #[test]
    fn empty_symbol_falls_back_to_the_default() {
        let reference = ReferenceData::builtin();
        let profile = reference.resolve("  ");
        assert!(!profile.error);
        assert_eq!(profile.symbol, "JPM");
    }

    #[test]
    fn resolve_is_idempotent() {
        let reference = ReferenceData::builtin();
        assert_eq!(reference.resolve("AAPL"), reference.resolve("AAPL"));
        assert_eq!(reference.resolve("nope"), reference.resolve("nope"));
    }

    #[test]
    fn resolved_records_carry_synthetic_bonds_and_fixed_ratings() {
        let reference = ReferenceData::builtin();
        let profile = reference.resolve("JPM");
        assert_eq!(profile.bond_info.len(), 2);
        assert!(profile
            .bond_info
            .iter()
            .all(|b| b.issuer == "JP Morgan Chase & Co."));
        let agencies: Vec<_> = profile.ratings.iter().map(|r| r.agency.as_str()).collect();
        assert_eq!(agencies, ["Moody's", "S&P", "Fitch"]);
    }

    #[test]
    fn competitors_preserve_order_and_default_to_empty() {
        let reference = ReferenceData::builtin();
        assert_eq!(reference.competitors_for("JPM"), ["BAC", "C", "WFC"]);
        assert!(reference.competitors_for("ZZZ").is_empty());
    }

    #[test]
    fn override_file_parses_and_normalizes_symbols() {
        let reference = ReferenceData::from_json_str(
            r#"{
                "default_symbol": "tst",
                "companies": [
                    {
                        "symbol": "tst",
                        "company_name": "Test Corp",
                        "annual_revenue": "$1.0B",
                        "annual_profit": "$0.1B"
                    }
                ],
                "competitors": { "tst": ["OTHER"] }
            }"#,
        )
        .unwrap();

        assert_eq!(reference.default_symbol(), "TST");
        let profile = reference.resolve("tst");
        assert!(!profile.error);
        assert_eq!(profile.company_name, "Test Corp");
        assert_eq!(reference.competitors_for("TST"), ["OTHER"]);
    }

    #[test]
    fn override_file_rejects_duplicates_and_unknown_default() {
        let duplicate = r#"{
            "companies": [
                {"symbol": "A", "company_name": "A", "annual_revenue": "1", "annual_profit": "1"},
                {"symbol": "a", "company_name": "A again", "annual_revenue": "1", "annual_profit": "1"}
            ]
        }"#;
        assert!(ReferenceData::from_json_str(duplicate).is_err());

        let bad_default = r#"{
            "default_symbol": "MISSING",
            "companies": [
                {"symbol": "A", "company_name": "A", "annual_revenue": "1", "annual_profit": "1"}
            ]
        }"#;
        assert!(ReferenceData::from_json_str(bad_default).is_err());
    }
}
