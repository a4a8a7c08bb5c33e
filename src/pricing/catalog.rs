use crate::error::PricingError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Optional extra offered with a tier, e.g. `{"label": "Social Kit", "price": "₱1,500"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    /// Display label, also the selection key
    pub label: String,
    /// Display price
    pub price: String,
}

impl Addon {
    /// Peso value parsed from the display price
    pub fn price_value(&self) -> Option<u64> {
        parse_peso_amount(&self.price)
    }
}

/// One selectable package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    /// Stable identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Display price, e.g. `₱8,000` or `Custom Quote`
    pub price_display: String,
    /// Fixed price in pesos, `None` when quoted on request
    #[serde(default)]
    pub price_value: Option<u64>,
    /// Highlighted in the selection grid
    #[serde(default)]
    pub recommended: bool,
    /// Number of initial concepts
    #[serde(default)]
    pub concepts: Option<String>,
    /// Revision rounds
    #[serde(default)]
    pub revisions: Option<String>,
    /// Delivery time
    #[serde(default)]
    pub turnaround: Option<String>,
    /// Included deliverables
    #[serde(default)]
    pub deliverables: Vec<String>,
    /// Optional extras
    #[serde(default)]
    pub addons: Vec<Addon>,
}

impl PricingTier {
    /// Concepts, revisions, turnaround, then each deliverable, skipping blanks
    pub fn features(&self) -> Vec<&str> {
        [&self.concepts, &self.revisions, &self.turnaround]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .chain(self.deliverables.iter().map(String::as_str))
            .filter(|v| !v.trim().is_empty())
            .collect()
    }

    /// Add-on by label
    pub fn addon(&self, label: &str) -> Option<&Addon> {
        self.addons.iter().find(|a| a.label == label)
    }
}

/// Tier catalog read from the questionnaire's `config.json`
///
/// Only `pricingTiers` is modelled; other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Tiers in display order
    #[serde(default)]
    pub pricing_tiers: Vec<PricingTier>,
}

impl Catalog {
    /// Parse a catalog from JSON text
    pub fn from_json(text: &str) -> Result<Self, PricingError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a catalog from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PricingError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Tier by id
    pub fn tier(&self, id: &str) -> Option<&PricingTier> {
        self.pricing_tiers.iter().find(|t| t.id == id)
    }
}

/// First `₱` followed by digits and thousands separators, as pesos
///
/// `"Brand Guide (₱2,500)"` gives `Some(2500)`.
pub fn parse_peso_amount(text: &str) -> Option<u64> {
    for (idx, sign) in text.match_indices('₱') {
        let run: String = text[idx + sign.len()..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ',')
            .collect();
        if run.is_empty() {
            continue;
        }
        let digits: String = run.chars().filter(char::is_ascii_digit).collect();
        return digits.parse().ok();
    }
    None
}

/// Group an integer in thousands with commas, `12500` -> `12,500`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "availabilityStatus": {"text": "Booking March", "badgeColor": "bg-emerald-500"},
        "pricingTiers": [
            {
                "id": "essential",
                "title": "Essential Start",
                "priceDisplay": "₱8,000",
                "priceValue": 8000,
                "concepts": "2 Concepts",
                "revisions": "",
                "turnaround": "7 Days",
                "deliverables": ["Primary Logo", "Color Palette"],
                "addons": [{"label": "Social Media Kit", "price": "₱1,500"}]
            },
            {
                "id": "enterprise",
                "title": "Enterprise",
                "priceDisplay": "Custom Quote",
                "priceValue": null,
                "recommended": true
            }
        ]
    }"#;

    #[test]
    fn test_catalog_ignores_unrelated_keys() {
        let catalog = Catalog::from_json(CONFIG).unwrap();
        assert_eq!(catalog.pricing_tiers.len(), 2);
        let enterprise = catalog.tier("enterprise").unwrap();
        assert_eq!(enterprise.price_value, None);
        assert!(enterprise.recommended);
        assert!(enterprise.addons.is_empty());
    }

    #[test]
    fn test_features_skip_blank_entries() {
        let catalog = Catalog::from_json(CONFIG).unwrap();
        assert_eq!(
            catalog.tier("essential").unwrap().features(),
            vec!["2 Concepts", "7 Days", "Primary Logo", "Color Palette"]
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Catalog::from_json("{\"pricingTiers\": 3}"),
            Err(PricingError::Json(_))
        ));
    }

    #[test]
    fn test_parse_peso_amount() {
        assert_eq!(parse_peso_amount("₱1,500"), Some(1500));
        assert_eq!(parse_peso_amount("Brand Guide (₱12,000)"), Some(12_000));
        assert_eq!(parse_peso_amount("₱TBD then ₱900"), Some(900));
        assert_eq!(parse_peso_amount("Free"), None);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(950), "950");
        assert_eq!(group_thousands(12_500), "12,500");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
