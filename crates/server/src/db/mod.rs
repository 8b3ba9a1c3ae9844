//! Database pool setup and repositories.
//!
//! One SQLite database, accessed through a shared pool. Every repository
//! that serves vendor traffic takes the session's `tienda_id` and filters
//! by it; rows from other stores are indistinguishable from missing rows.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

mod admins;
mod archivos;
mod categorias;
mod pedidos;
mod planes;
mod productos;
mod reset_tokens;
mod tiendas;
mod vendedores;

pub use admins::AdminRepository;
pub use archivos::{ArchivoRepository, NuevoArchivo};
pub use categorias::CategoriaRepository;
pub use pedidos::{NuevoPedido, NuevoPedidoItem, PedidoRechazado, PedidoRepository};
pub use planes::{NuevoPlan, PlanRepository};
pub use productos::{NuevoProducto, ProductoRepository};
pub use reset_tokens::ResetTokenRepository;
pub use tiendas::{NuevaTienda, PerfilTienda, TiendaRepository, TiendaResumen};
pub use vendedores::VendedorRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found")]
    NotFound,

    #[error("Data corruption detected: {0}")]
    DataCorruption(String),
}

/// Create a connection pool and run pending migrations.
///
/// WAL mode keeps readers from blocking the writer; the busy timeout
/// covers the brief writer lock held by order submission.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
