/// Permiso de notificaciones del navegador (tres estados)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    /// Aún no decidido: se muestra el banner de activación
    #[default]
    Default,
    Granted,
    /// Terminal para la app: solo los ajustes del navegador lo cambian
    Denied,
}

impl PermissionState {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "granted" => PermissionState::Granted,
            "denied" => PermissionState::Denied,
            _ => PermissionState::Default,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}
