use super::catalog::{Addon, Catalog, group_thousands};
use crate::error::PricingError;
use crate::models::{Amount, PaymentRequest};
use tracing::debug;

/// Computed total of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Total {
    /// Fixed price in pesos, add-ons included
    Fixed(u64),
    /// Tier priced on request; carries its display text
    Quoted(String),
}

/// Pricing captured at the moment of submission
///
/// Built from the catalog once and handed to the payment step as a value,
/// so later catalog or selection changes cannot affect what is charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingSnapshot {
    tier_id: String,
    tier_title: String,
    base_price: String,
    addons: Vec<Addon>,
    total: Total,
}

impl PricingSnapshot {
    /// Price a tier plus the add-ons selected by label
    ///
    /// Add-on prices are read from their `₱` display text; an add-on whose
    /// price has no peso figure adds nothing.
    pub fn compute<S: AsRef<str>>(
        catalog: &Catalog,
        tier_id: &str,
        addon_labels: &[S],
    ) -> Result<Self, PricingError> {
        let tier = catalog
            .tier(tier_id)
            .ok_or_else(|| PricingError::UnknownTier(tier_id.to_string()))?;

        let addons = addon_labels
            .iter()
            .map(|label| {
                tier.addon(label.as_ref())
                    .cloned()
                    .ok_or_else(|| PricingError::UnknownAddon {
                        tier: tier.id.clone(),
                        addon: label.as_ref().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total = match tier.price_value {
            Some(base) => {
                let mut total = base;
                for addon in &addons {
                    total = total
                        .checked_add(addon.price_value().unwrap_or(0))
                        .ok_or_else(|| PricingError::Overflow(tier.id.clone()))?;
                }
                Total::Fixed(total)
            }
            None => Total::Quoted(tier.price_display.clone()),
        };

        debug!(tier = %tier.id, addons = addons.len(), ?total, "priced selection");
        Ok(Self {
            tier_id: tier.id.clone(),
            tier_title: tier.title.clone(),
            base_price: tier.price_display.clone(),
            addons,
            total,
        })
    }

    /// Selected tier id
    pub fn tier_id(&self) -> &str {
        &self.tier_id
    }

    /// Selected tier title
    pub fn tier_title(&self) -> &str {
        &self.tier_title
    }

    /// Tier display price before add-ons
    pub fn base_price(&self) -> &str {
        &self.base_price
    }

    /// Selected add-ons
    pub fn addons(&self) -> &[Addon] {
        &self.addons
    }

    /// Computed total
    pub fn total(&self) -> &Total {
        &self.total
    }

    /// Fixed total in pesos
    pub fn value(&self) -> Option<u64> {
        match self.total {
            Total::Fixed(v) => Some(v),
            Total::Quoted(_) => None,
        }
    }

    /// `₱12,500` for fixed totals, the tier's display text otherwise
    pub fn display(&self) -> String {
        match &self.total {
            Total::Fixed(v) => format!("₱{}", group_thousands(*v)),
            Total::Quoted(text) => text.clone(),
        }
    }

    /// Whether the total can be charged by QR
    pub fn is_payable(&self) -> bool {
        matches!(self.total, Total::Fixed(_))
    }

    /// Full total as an amount
    pub fn total_amount(&self) -> Result<Amount, PricingError> {
        let pesos = self
            .value()
            .ok_or_else(|| PricingError::NotPayable(self.tier_id.clone()))?;
        Amount::from_pesos(pesos).ok_or_else(|| PricingError::Overflow(self.tier_id.clone()))
    }

    /// 50% downpayment required to start the project
    pub fn downpayment(&self) -> Result<Amount, PricingError> {
        Ok(self.total_amount()?.half())
    }

    /// Payment request for the downpayment
    pub fn payment_request(
        &self,
        phone: impl Into<String>,
        merchant_name: impl Into<String>,
    ) -> Result<PaymentRequest, PricingError> {
        Ok(PaymentRequest::new(phone, merchant_name, self.downpayment()?))
    }
}
