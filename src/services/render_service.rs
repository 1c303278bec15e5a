//! services/render_service.rs
//! Sustitución de placeholders en el cuerpo de un template.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::contact_model::Contact;

/// Único placeholder que se reemplaza al enviar.
pub const NAME_PLACEHOLDER: &str = "{{nome}}";

/// Reemplaza cada `{{nome}}` por el nombre del contacto. Cualquier otro
/// placeholder queda tal cual.
pub fn render_content(body: &str, contact: &Contact) -> String {
    body.replace(NAME_PLACEHOLDER, &contact.name)
}

/// Nombres de placeholder en orden de aparición, sin repetir.
pub fn extract_variables(body: &str) -> Vec<String> {
    static VAR_RE: OnceLock<Regex> = OnceLock::new();
    let re = VAR_RE.get_or_init(|| Regex::new(r"\{\{(.*?)\}\}").expect("static regex"));

    let mut vars: Vec<String> = Vec::new();
    for cap in re.captures_iter(body) {
        let name = cap[1].trim().to_string();
        if !vars.contains(&name) {
            vars.push(name);
        }
    }
    vars
}
