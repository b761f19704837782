// src/services/outreach.rs

// Destinatário e corpo das mensagens em lote. Nada aqui envia nada:
// o resultado vai para a fila `outbound_messages`.

use validator::ValidateEmail;

use crate::models::{bulk::Channel, lead::Lead};

// Menos que isso não é telefone, é lixo digitado no campo.
const MIN_PHONE_DIGITS: usize = 8;

/// Destinatário do lead no canal, ou `None` se o contato não serve.
pub fn recipient_for(channel: Channel, lead: &Lead, country_code: &str) -> Option<String> {
    match channel {
        Channel::Whatsapp => lead
            .phone
            .as_deref()
            .and_then(|phone| whatsapp_number(phone, country_code)),
        Channel::Email => lead
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| email.validate_email())
            .map(str::to_string),
    }
}

/// Número no formato internacional, só dígitos (o que o wa.me espera).
/// "054-1234567" -> "972541234567"; "+972 54 123 4567" -> "972541234567".
pub fn whatsapp_number(phone: &str, country_code: &str) -> Option<String> {
    let phone = phone.trim();
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();

    let international = if phone.starts_with('+') {
        digits
    } else if let Some(rest) = digits.strip_prefix("00") {
        rest.to_string()
    } else if let Some(rest) = digits.strip_prefix('0') {
        format!("{country_code}{rest}")
    } else {
        digits
    };

    (international.len() >= MIN_PHONE_DIGITS).then_some(international)
}

/// Substitui `{name}` e `{first_name}` pelo nome do lead.
pub fn render_template(template: &str, lead: &Lead) -> String {
    let name = lead.full_name.trim();
    let first_name = name.split_whitespace().next().unwrap_or(name);

    template
        .replace("{first_name}", first_name)
        .replace("{name}", name)
}
