// Claves de localStorage (compatibles con la versión web anterior)

/// Sesión activa: se borra en logout
pub const ACTIVE_PHONE_KEY: &str = "mava_persistent_phone";

/// Último número conocido: sobrevive al logout, pre-rellena el login
pub const LAST_PHONE_KEY: &str = "mava_last_phone";

pub const THEME_KEY: &str = "mava_theme";

/// Parámetro de URL que refleja la sesión (`?v=<phone>`)
pub const SESSION_QUERY_PARAM: &str = "v";

/// Valores de `order_statuts` en la tabla
pub const STATUS_DELIVERED: &str = "Livrée";
pub const STATUS_TO_DELIVER: &str = "À livrer";

pub const CURRENCY: &str = "FCFA";
