use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database;
use sales::config::Settings;
use sales::routes;
use sales::service::AuthService;
use sales::state::AppState;
use sales::storage::mongo::{MongoSaleStore, MongoUserStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("starting sales service");

    let settings = Settings::load()?;

    // Connect to the document store and verify connectivity
    let db = database::init_database(&settings.mongo_config()).await?;
    if database::health_check(&db).await? {
        info!("document store connection successful");
    }

    let users = MongoUserStore::new(&db, &settings.mongo.user_collection);
    let sale_records = MongoSaleStore::new(&db, &settings.mongo.sale_collection);
    let service = AuthService::new(Arc::new(users), Arc::new(sale_records));

    let state = AppState {
        service: Arc::new(service),
    };

    let app = routes::create_router(state);
    info!("routing is registered");

    let addr = settings.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("server is listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
