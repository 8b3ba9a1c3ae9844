//! WhatsApp order relay.
//!
//! Orders are handed to the vendor through a `wa.me` deep link carrying a
//! pre-composed message. This is a pure formatter: nothing here touches the
//! database and the link carries no invariants of its own.

use rust_decimal::Decimal;

/// One line of the composed order message.
#[derive(Debug, Clone)]
pub struct LineaMensaje {
    pub nombre: String,
    pub cantidad: i64,
    pub precio_unitario: Decimal,
}

/// Format an amount the way the storefront displays money (MXN).
#[must_use]
pub fn formatear_precio(monto: Decimal) -> String {
    format!("${:.2}", monto.round_dp(2))
}

/// Build the `wa.me` deep link for a phone number and message.
///
/// Non-digit characters in the phone number are stripped; the message is
/// percent-encoded.
#[must_use]
pub fn url_whatsapp(telefono: &str, mensaje: &str) -> String {
    let numero: String = telefono.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{numero}?text={}", urlencoding::encode(mensaje))
}

/// Compose the order message sent to the vendor.
#[must_use]
pub fn mensaje_pedido(
    numero_pedido: i64,
    cliente_nombre: &str,
    cliente_telefono: &str,
    lineas: &[LineaMensaje],
    total: Decimal,
    notas: Option<&str>,
) -> String {
    let items_texto = lineas
        .iter()
        .map(|l| {
            format!(
                "• {}x {} - {}",
                l.cantidad,
                l.nombre,
                formatear_precio(l.precio_unitario * Decimal::from(l.cantidad))
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut mensaje = format!(
        "🛒 *Nuevo Pedido #{numero_pedido:03}*\n\
         ━━━━━━━━━━━━━━━━━━━━\n\n\
         *Cliente:* {cliente_nombre}\n\
         *Teléfono:* {cliente_telefono}\n\n\
         *Productos:*\n{items_texto}\n\n\
         ━━━━━━━━━━━━━━━━━━━━\n\
         *Total: {}*",
        formatear_precio(total)
    );

    if let Some(notas) = notas.filter(|n| !n.is_empty()) {
        mensaje.push_str("\n\n📝 Notas: ");
        mensaje.push_str(notas);
    }

    mensaje
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn url_strips_phone_formatting() {
        let url = url_whatsapp("+52 (555) 123-4567", "hola");
        assert_eq!(url, "https://wa.me/525551234567?text=hola");
    }

    #[test]
    fn url_encodes_message() {
        let url = url_whatsapp("555", "dos tacos & una soda");
        assert!(url.ends_with("?text=dos%20tacos%20%26%20una%20soda"));
    }

    #[test]
    fn mensaje_includes_lines_and_total() {
        let lineas = vec![LineaMensaje {
            nombre: "Taco".to_owned(),
            cantidad: 2,
            precio_unitario: dec!(25),
        }];
        let mensaje = mensaje_pedido(7, "Ana", "555", &lineas, dec!(50), None);
        assert!(mensaje.contains("Pedido #007"));
        assert!(mensaje.contains("• 2x Taco - $50.00"));
        assert!(mensaje.contains("*Total: $50.00*"));
        assert!(!mensaje.contains("Notas"));
    }

    #[test]
    fn mensaje_appends_notes_when_present() {
        let mensaje = mensaje_pedido(1, "Ana", "555", &[], dec!(0), Some("sin cebolla"));
        assert!(mensaje.contains("📝 Notas: sin cebolla"));
    }
}
