pub mod acme;
pub mod base;
pub mod manager;
pub mod paperflies;
pub mod patagonia;

pub use acme::AcmeSupplier;
pub use base::Supplier;
pub use manager::SupplierManager;
pub use paperflies::PaperfliesSupplier;
pub use patagonia::PatagoniaSupplier;
