//! Status and kind enums for the Mercadito entities.
//!
//! All variants serialize as `snake_case` strings, both in JSON and in the
//! database (TEXT columns via the `sqlite` feature).

use serde::{Deserialize, Serialize};

/// General category of a store, used to theme its public storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum CategoriaGeneral {
    Tecnologia,
    Moda,
    Comida,
    #[default]
    General,
}

/// Lifecycle state of an order.
///
/// Orders are created `Pendiente` by the public checkout and only the owning
/// vendedor moves them through the remaining states. Orders are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum EstadoPedido {
    #[default]
    Pendiente,
    EnProceso,
    Completado,
    Cancelado,
}

/// Kind of a stored asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum TipoArchivo {
    Imagen,
    Video,
}

impl TipoArchivo {
    /// Classify an asset from its MIME type.
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("video/") {
            Self::Video
        } else {
            Self::Imagen
        }
    }
}

/// Principal kind for sessions and password-reset tokens.
///
/// Admin and vendedor sessions are independent: each kind has its own cookie
/// so one browser can hold both at once without interference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum Principal {
    Admin,
    Vendedor,
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Vendedor => write!(f, "vendedor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_pedido_serializes_snake_case() {
        let json = serde_json::to_string(&EstadoPedido::EnProceso).unwrap();
        assert_eq!(json, "\"en_proceso\"");

        let parsed: EstadoPedido = serde_json::from_str("\"cancelado\"").unwrap();
        assert_eq!(parsed, EstadoPedido::Cancelado);
    }

    #[test]
    fn tipo_archivo_from_mime() {
        assert_eq!(TipoArchivo::from_mime("video/mp4"), TipoArchivo::Video);
        assert_eq!(TipoArchivo::from_mime("image/png"), TipoArchivo::Imagen);
        // Anything that is not a video is treated as an image
        assert_eq!(
            TipoArchivo::from_mime("application/octet-stream"),
            TipoArchivo::Imagen
        );
    }

    #[test]
    fn principal_display() {
        assert_eq!(Principal::Admin.to_string(), "admin");
        assert_eq!(Principal::Vendedor.to_string(), "vendedor");
    }
}
