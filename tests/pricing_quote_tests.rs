//! End-to-end tests from a tier catalog to a verified downpayment payload

use rust_qrph::pricing::Total;
use rust_qrph::{Catalog, PayloadEncoder, PricingError, PricingSnapshot, parse_payload};

const CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/config.json");

fn catalog() -> Catalog {
    Catalog::load(CATALOG).expect("fixture catalog should load")
}

#[test]
fn test_fixture_catalog_loads() {
    let catalog = catalog();
    let ids: Vec<&str> = catalog.pricing_tiers.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["essential", "signature", "bespoke"]);
    assert!(catalog.tier("signature").unwrap().recommended);
}

#[test]
fn test_essential_with_addons_quote_and_payload() {
    let snapshot = PricingSnapshot::compute(
        &catalog(),
        "essential",
        &["Social Media Kit", "Brand Guidelines PDF"],
    )
    .unwrap();
    assert_eq!(snapshot.total(), &Total::Fixed(12_000));
    assert_eq!(snapshot.display(), "₱12,000");

    let request = snapshot
        .payment_request("09171234567", "Studio Uno")
        .unwrap();
    let payload = PayloadEncoder::default().encode(&request).unwrap();

    let parsed = parse_payload(payload.as_str()).unwrap();
    assert_eq!(parsed.amount().unwrap().to_string(), "6000.00");
    assert_eq!(parsed.merchant_name(), "Studio Uno");
}

#[test]
fn test_snapshot_is_independent_of_later_catalog_changes() {
    let mut catalog = catalog();
    let snapshot = PricingSnapshot::compute::<&str>(&catalog, "signature", &[]).unwrap();

    catalog.pricing_tiers[1].price_value = Some(99_000);
    assert_eq!(snapshot.value(), Some(18_000));
    assert_eq!(snapshot.downpayment().unwrap().to_string(), "9000.00");
}

#[test]
fn test_quoted_tier_cannot_be_paid() {
    let snapshot = PricingSnapshot::compute::<&str>(&catalog(), "bespoke", &[]).unwrap();
    assert_eq!(snapshot.display(), "Let's Talk");
    assert!(matches!(
        snapshot.payment_request("09171234567", "Studio Uno"),
        Err(PricingError::NotPayable(_))
    ));
}

#[test]
fn test_addons_belong_to_their_tier() {
    assert!(matches!(
        PricingSnapshot::compute(&catalog(), "signature", &["Social Media Kit"]),
        Err(PricingError::UnknownAddon { ref tier, .. }) if tier == "signature"
    ));
}

#[test]
fn test_missing_catalog_file() {
    assert!(matches!(
        Catalog::load("tests/fixtures/does-not-exist.json"),
        Err(PricingError::Io(_))
    ));
}
