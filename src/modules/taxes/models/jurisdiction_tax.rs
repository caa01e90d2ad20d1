use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Key of the mandatory fallback entry
pub const DEFAULT_JURISDICTION: &str = "DEFAULT";

/// Sales-tax rate per jurisdiction code (e.g. a state code)
///
/// Codes are stored uppercase. A `DEFAULT` entry is always present and is
/// used for any jurisdiction the table does not know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Decimal>", into = "BTreeMap<String, Decimal>")]
pub struct JurisdictionTaxTable {
    default_rate: Decimal,
    rates: BTreeMap<String, Decimal>,
}

impl JurisdictionTaxTable {
    /// Build a table from a default rate and per-jurisdiction overrides
    pub fn new<I, S>(default_rate: Decimal, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        Self::validate_tax_rate(DEFAULT_JURISDICTION, default_rate)?;

        let mut rates = BTreeMap::new();
        for (code, rate) in entries {
            let code = Self::normalize(code.as_ref());
            if code.is_empty() {
                return Err(AppError::configuration("Jurisdiction code cannot be empty"));
            }
            if code == DEFAULT_JURISDICTION {
                return Err(AppError::configuration(
                    "DEFAULT rate must be passed as the default, not as an entry",
                ));
            }
            Self::validate_tax_rate(&code, rate)?;
            rates.insert(code, rate);
        }

        Ok(Self {
            default_rate,
            rates,
        })
    }

    /// Rate for a jurisdiction, if the table knows it (case-insensitive)
    pub fn get(&self, jurisdiction: &str) -> Option<Decimal> {
        let code = Self::normalize(jurisdiction);
        if code == DEFAULT_JURISDICTION {
            return Some(self.default_rate);
        }
        self.rates.get(&code).copied()
    }

    pub fn default_rate(&self) -> Decimal {
        self.default_rate
    }

    /// Known jurisdiction codes, excluding `DEFAULT`
    pub fn jurisdictions(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// Tax rates must lie in `[0, 1)`
    pub fn validate_tax_rate(code: &str, rate: Decimal) -> Result<()> {
        if rate < Decimal::ZERO {
            return Err(AppError::configuration(format!(
                "Tax rate for {} cannot be negative, got {}",
                code, rate
            )));
        }

        if rate >= Decimal::ONE {
            return Err(AppError::configuration(format!(
                "Tax rate for {} must be below 1.0 (100%), got {}",
                code, rate
            )));
        }

        Ok(())
    }

    fn normalize(code: &str) -> String {
        code.to_uppercase()
    }
}

impl TryFrom<BTreeMap<String, Decimal>> for JurisdictionTaxTable {
    type Error = AppError;

    fn try_from(mut map: BTreeMap<String, Decimal>) -> Result<Self> {
        let default_key = map
            .keys()
            .find(|k| k.eq_ignore_ascii_case(DEFAULT_JURISDICTION))
            .cloned()
            .ok_or_else(|| {
                AppError::configuration("Tax rate table must contain a DEFAULT entry")
            })?;
        let default_rate = map.remove(&default_key).unwrap_or(Decimal::ZERO);

        Self::new(default_rate, map)
    }
}

impl From<JurisdictionTaxTable> for BTreeMap<String, Decimal> {
    fn from(table: JurisdictionTaxTable) -> Self {
        let mut map = table.rates;
        map.insert(DEFAULT_JURISDICTION.to_string(), table.default_rate);
        map
    }
}
