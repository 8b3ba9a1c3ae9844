//! Store slug derivation and validation.
//!
//! Slugs are the tenant routing key (`/api/tienda/{slug}`): globally unique,
//! URL-safe, and immutable once a storefront depends on them.

use thiserror::Error;

/// Error validating a store slug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("el slug no puede estar vacío")]
    Empty,
    #[error("el slug solo puede contener minúsculas, dígitos y guiones")]
    InvalidChars,
    #[error("el slug no puede empezar ni terminar con guión")]
    EdgeHyphen,
}

/// Validate a slug supplied by the admin when creating a store.
///
/// # Errors
///
/// Returns a [`SlugError`] describing the first rule the slug breaks.
pub fn validar_slug(slug: &str) -> Result<(), SlugError> {
    if slug.is_empty() {
        return Err(SlugError::Empty);
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(SlugError::InvalidChars);
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(SlugError::EdgeHyphen);
    }
    Ok(())
}

/// Derive a URL-safe slug from a display name.
///
/// Lowercases, strips accents common in Spanish, and collapses everything
/// else into single hyphens.
#[must_use]
pub fn slugify(texto: &str) -> String {
    let mut out = String::with_capacity(texto.len());
    let mut last_hyphen = true; // suppress leading hyphen
    for c in texto.chars() {
        let mapped = match c.to_lowercase().next().unwrap_or(c) {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        };
        if mapped.is_ascii_lowercase() || mapped.is_ascii_digit() {
            out.push(mapped);
            last_hyphen = false;
        } else if !last_hyphen {
            out.push('-');
            last_hyphen = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_handles_accents_and_spaces() {
        assert_eq!(slugify("Café El Niño"), "cafe-el-nino");
        assert_eq!(slugify("  Tacos!! 3x1  "), "tacos-3x1");
    }

    #[test]
    fn validar_slug_accepts_url_safe() {
        assert_eq!(validar_slug("acme-store-2"), Ok(()));
    }

    #[test]
    fn validar_slug_rejects_bad_input() {
        assert_eq!(validar_slug(""), Err(SlugError::Empty));
        assert_eq!(validar_slug("Acme"), Err(SlugError::InvalidChars));
        assert_eq!(validar_slug("con espacio"), Err(SlugError::InvalidChars));
        assert_eq!(validar_slug("-acme"), Err(SlugError::EdgeHyphen));
        assert_eq!(validar_slug("acme-"), Err(SlugError::EdgeHyphen));
    }

    #[test]
    fn slugify_output_validates() {
        assert_eq!(validar_slug(&slugify("La Tiendita de Doña Mary")), Ok(()));
    }
}
