use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: String,   // ⇔ employees.id (opaque, stable key)
    pub name: String, // ⇔ employees.name
    pub active: bool, // ⇔ employees.active (INT 0/1)
    pub created_at: String,
}

impl Employee {
    /// Name to show in CLI output, falling back to the raw id.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
