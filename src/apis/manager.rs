use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::base::Supplier;
use super::{AcmeSupplier, PaperfliesSupplier, PatagoniaSupplier};
use crate::app::ports::HttpClientPort;
use crate::config::SupplierConfig;
use crate::constants::{ACME_SUPPLIER, PAPERFLIES_SUPPLIER, PATAGONIA_SUPPLIER};
use crate::domain::Hotel;
use crate::observability::metrics;

/// Fetches from every registered supplier, in supplier-name order
pub struct SupplierManager {
    suppliers: BTreeMap<String, Box<dyn Supplier>>,
    http: Arc<dyn HttpClientPort>,
}

impl SupplierManager {
    pub fn new(http: Arc<dyn HttpClientPort>) -> Self {
        Self {
            suppliers: BTreeMap::new(),
            http,
        }
    }

    /// Build adapters for every configured supplier this crate knows how to read
    pub fn from_config(config: &SupplierConfig, http: Arc<dyn HttpClientPort>) -> Self {
        let mut manager = Self::new(http);
        for (name, endpoint) in &config.endpoints {
            let supplier: Box<dyn Supplier> = match name.as_str() {
                ACME_SUPPLIER => Box::new(AcmeSupplier::new(endpoint.clone())),
                PATAGONIA_SUPPLIER => Box::new(PatagoniaSupplier::new(endpoint.clone())),
                PAPERFLIES_SUPPLIER => Box::new(PaperfliesSupplier::new(endpoint.clone())),
                other => {
                    warn!("No adapter for configured supplier '{}', skipping", other);
                    continue;
                }
            };
            manager.register(supplier);
        }
        manager
    }

    pub fn register(&mut self, supplier: Box<dyn Supplier>) {
        self.suppliers.insert(supplier.name().to_string(), supplier);
    }

    pub fn get_supplier_names(&self) -> Vec<&str> {
        self.suppliers.keys().map(String::as_str).collect()
    }

    pub fn get_supplier(&self, name: &str) -> Option<&dyn Supplier> {
        self.suppliers.get(name).map(|s| s.as_ref())
    }

    /// Records from every supplier; a failing supplier contributes nothing
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Vec<Hotel> {
        let mut hotels = Vec::new();
        for (name, supplier) in &self.suppliers {
            info!("Fetching data from supplier '{}'", name);
            match supplier.fetch(self.http.as_ref()).await {
                Ok(fetched) if fetched.is_empty() => {
                    warn!("No data fetched from supplier '{}'", name);
                }
                Ok(fetched) => {
                    info!("Fetched {} records from supplier '{}'", fetched.len(), name);
                    metrics::suppliers::records_fetched(name, fetched.len());
                    hotels.extend(fetched);
                }
                Err(e) => {
                    metrics::suppliers::fetch_failed(name);
                    error!("Error fetching data from supplier '{}': {}", name, e);
                }
            }
        }
        hotels
    }
}
