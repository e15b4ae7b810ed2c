use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use transit_fleet::config::{DatabaseConfig, EnvironmentConfig, StorageBackend};
use transit_fleet::database::DatabaseConnection;
use transit_fleet::repositories::{FleetStorage, MemoryFleetRepository, PgFleetRepository};
use transit_fleet::{create_app_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let default_level = if config.is_development() { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("🚍 Transit Fleet API");
    info!("====================");
    info!("🌍 Entorno: {}", config.environment);

    let storage: Arc<dyn FleetStorage> = match config.storage_backend {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let db_connection = match DatabaseConnection::new(&db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            Arc::new(PgFleetRepository::new(db_connection.pool().clone()))
        }
        StorageBackend::Memory => {
            if config.is_production() {
                warn!("⚠️ Almacenamiento en memoria en producción: los datos no persisten");
            }
            info!("🧠 Usando almacenamiento en memoria");
            Arc::new(MemoryFleetRepository::new())
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app_router(AppState::new(storage, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚌 Vehicles:");
    info!("   GET|POST /api/vehicles");
    info!("   GET|PUT|DELETE /api/vehicles/:vehicle_id");
    info!("   GET|POST /api/vehicles/:vehicle_id/maintenance");
    info!("🛣️ Routes:");
    info!("   GET|POST /api/routes");
    info!("   GET|DELETE /api/routes/:route_number");
    info!("📋 Assignments:");
    info!("   POST /api/assignments");
    info!("   DELETE /api/assignments/:id");
    info!("📊 Reports:");
    info!("   GET  /api/reports/route-efficiency");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor detenido");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Error instalando el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ Error instalando el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Señal de apagado recibida");
}
