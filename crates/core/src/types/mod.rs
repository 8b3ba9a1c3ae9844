//! Shared type definitions.

mod estado;
mod precio;
mod slug;

pub use estado::{CategoriaGeneral, EstadoPedido, Principal, TipoArchivo};
pub use precio::Precio;
pub use slug::{SlugError, validar_slug, slugify};
