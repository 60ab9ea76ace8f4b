/// Normaliza un número de vendedor: quita espacios y `+`, y antepone el
/// indicativo al formato local de 10 dígitos (`0XXXXXXXXX`), conservando el `0`.
pub fn normalize_phone(raw: &str, country_code: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '+')
        .collect();

    if compact.chars().count() == 10 && compact.starts_with('0') {
        format!("{}{}", country_code, compact)
    } else {
        compact
    }
}

/// Solo dígitos (el número viaja tal cual en filtros PostgREST y en la URL)
pub fn is_valid_phone(phone: &str) -> bool {
    !phone.is_empty() && phone.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_number_gets_country_code() {
        assert_eq!(normalize_phone("07 01 02 03 04", "225"), "2250701020304");
        assert_eq!(normalize_phone("0701020304", "225"), "2250701020304");
    }

    #[test]
    fn test_international_number_passes_through() {
        assert_eq!(normalize_phone("+225 07 01 02 03 04", "225"), "2250701020304");
        assert_eq!(normalize_phone("2250701020304", "225"), "2250701020304");
    }

    #[test]
    fn test_only_ten_digit_local_numbers_are_rewritten() {
        // 9 dígitos con 0 inicial: se deja igual
        assert_eq!(normalize_phone("070102030", "225"), "070102030");
        // 10 dígitos sin 0 inicial
        assert_eq!(normalize_phone("7701020304", "225"), "7701020304");
    }

    #[test]
    fn test_tabs_and_newlines_are_stripped() {
        assert_eq!(normalize_phone("\t07 01\n02 03 04 ", "225"), "2250701020304");
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("2250701020304"));
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("225abc"));
        assert!(!is_valid_phone("225&select=*"));
    }
}
