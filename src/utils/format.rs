use crate::utils::constants::CURRENCY;

/// Formatea un precio al estilo `fr-FR`: `5000` -> `5 000`, `1234.5` -> `1 234,5`
pub fn format_price(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    if fraction > 0 {
        let decimals = format!("{:02}", fraction);
        grouped.push(',');
        grouped.push_str(decimals.trim_end_matches('0'));
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Precio con moneda, o guion si la fila no lo tiene
pub fn format_price_label(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{} {}", format_price(v), CURRENCY),
        None => format!("— {}", CURRENCY),
    }
}

/// Enlace WhatsApp del cliente (`https://wa.me/<digits>`)
pub fn whatsapp_link(phone: Option<&str>) -> Option<String> {
    let compact: String = phone?.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        None
    } else {
        Some(format!("https://wa.me/{}", compact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_thousands_grouping() {
        assert_eq!(format_price(5000.0), "5 000");
        assert_eq!(format_price(300.0), "300");
        assert_eq!(format_price(1_250_000.0), "1 250 000");
        assert_eq!(format_price(0.0), "0");
    }

    #[test]
    fn test_price_decimals_use_comma() {
        assert_eq!(format_price(1234.5), "1 234,5");
        assert_eq!(format_price(99.99), "99,99");
    }

    #[test]
    fn test_price_label() {
        assert_eq!(format_price_label(Some(3000.0)), "3 000 FCFA");
        assert_eq!(format_price_label(None), "— FCFA");
    }

    #[test]
    fn test_whatsapp_link_strips_spaces() {
        assert_eq!(
            whatsapp_link(Some("225 05 06 07 08 09")).as_deref(),
            Some("https://wa.me/2250506070809")
        );
        assert_eq!(whatsapp_link(Some("   ")), None);
        assert_eq!(whatsapp_link(None), None);
    }
}
