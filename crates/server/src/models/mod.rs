//! Database-backed entity models.
//!
//! All per-tenant rows carry a `tienda_id`; every vendor-side query filters
//! by the session's tenant. That convention, applied at each repository, is
//! what keeps tenants isolated.

mod catalogo;
mod cuentas;
mod pedido;
mod plan;
mod tienda;

pub use catalogo::{Archivo, ArchivoDatos, CategoriaProducto, Producto};
pub use cuentas::{Admin, PasswordResetToken, Vendedor};
pub use pedido::{ItemPedido, Pedido};
pub use plan::Plan;
pub use tienda::Tienda;
