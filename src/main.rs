use clap::Parser;
use std::sync::Arc;
use tracing::info;

use hotel_reconciler::api::{get_hotels, HotelsFilter};
use hotel_reconciler::apis::SupplierManager;
use hotel_reconciler::app::HotelService;
use hotel_reconciler::config::Config;
use hotel_reconciler::infra::ReqwestHttp;
use hotel_reconciler::logging;
use hotel_reconciler::observability;
use hotel_reconciler::pipeline::storage::{InMemoryHotelStore, InMemoryRawHotelStore, RawHotelStore};

#[derive(Parser)]
#[command(name = "hotel_reconciler")]
#[command(about = "Fetch hotel data from suppliers, merge it and query the result")]
#[command(version = "0.1.0")]
struct Cli {
    /// Comma-separated hotel ids, or 'none' for no filtering by hotel id
    hotel_ids: String,
    /// Comma-separated destination ids, or 'none' for no filtering by destination id
    destination_ids: String,
    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::load(cli.config.as_deref())?;
    let _log_guard = logging::init_logging(&config.logging)?;
    observability::init(&config.metrics)?;

    let filter = HotelsFilter::from_args(&cli.hotel_ids, &cli.destination_ids)?;

    let suppliers = SupplierManager::from_config(&config.suppliers, Arc::new(ReqwestHttp::new()));
    let raw_store = Arc::new(InMemoryRawHotelStore::new());
    let hotel_store = Arc::new(InMemoryHotelStore::new());
    let service = HotelService::from_config(&config, raw_store.clone(), hotel_store.clone());

    let fetched = suppliers.fetch_all().await;
    info!("Fetched {} records from {} suppliers", fetched.len(), suppliers.get_supplier_names().len());

    let summary = service.refresh(fetched).await?;
    info!(
        "Updated {} hotels ({} raw records)",
        summary.stored,
        raw_store.len()?
    );

    info!("Filtering hotels by {:?}", filter);
    let response = get_hotels(hotel_store.as_ref(), &filter)?;
    println!("{}", response.to_pretty_json()?);

    Ok(())
}
