/// Supplier name constants to ensure consistency across the codebase.
/// The same names key the supplier endpoints and the bias factor tables in config.
pub const ACME_SUPPLIER: &str = "acme";
pub const PATAGONIA_SUPPLIER: &str = "patagonia";
pub const PAPERFLIES_SUPPLIER: &str = "paperflies";

/// Source tag carried by reconciliation output; never used by a real supplier
pub const MERGED_SOURCE: &str = "merged";

/// Bias factor configured out of the box
pub const CONFIDENCE_LEVEL_FACTOR: &str = "confidence_level";

pub const ACME_ENDPOINT: &str = "https://5f2be0b4ffc88500167b85a0.mockapi.io/suppliers/acme";
pub const PATAGONIA_ENDPOINT: &str = "https://5f2be0b4ffc88500167b85a0.mockapi.io/suppliers/patagonia";
pub const PAPERFLIES_ENDPOINT: &str = "https://5f2be0b4ffc88500167b85a0.mockapi.io/suppliers/paperflies";

/// Get all supported supplier names
pub fn get_supported_suppliers() -> Vec<&'static str> {
    vec![ACME_SUPPLIER, PATAGONIA_SUPPLIER, PAPERFLIES_SUPPLIER]
}
