//! # Confirmation Email
//!
//! Ticket code generation and the HTML body of the confirmation email.

use crate::catalog::format_amount;
use crate::notification::NotificationRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject line of every confirmation email
pub const CONFIRMATION_SUBJECT: &str = "🎫 Confirmación de Compra - Tu Boleto está Listo";

/// Human-readable ticket code: `TICKET-<seat>-<6 digits>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketCode(String);

impl TicketCode {
    /// Derive a code from the seat and the last six digits of the
    /// millisecond timestamp
    pub fn generate(seat: &str, now: DateTime<Utc>) -> Self {
        let suffix = now.timestamp_millis().rem_euclid(1_000_000);
        Self(format!("TICKET-{}-{:06}", seat, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed details of the event printed on every ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    pub name: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub address: String,
    pub support_email: String,
}

impl Default for EventDetails {
    fn default() -> Self {
        Self {
            name: "Concierto Especial 2024".to_string(),
            date: "Sábado, 15 de Junio 2024".to_string(),
            time: "8:00 PM".to_string(),
            venue: "Arena Principal".to_string(),
            address: "Av. Principal 123, Ciudad".to_string(),
            support_email: "soporte@concierto.com".to_string(),
        }
    }
}

/// Escape text for safe inclusion in HTML
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background: linear-gradient(135deg, #ff416c, #ff4b2b); color: white; padding: 30px; text-align: center; border-radius: 10px 10px 0 0; }
    .content { background: #f9f9f9; padding: 30px; border-radius: 0 0 10px 10px; }
    .ticket-info { background: white; padding: 20px; border-radius: 8px; margin: 20px 0; border-left: 4px solid #ff416c; }
    .qr-section { background: white; padding: 20px; border-radius: 8px; margin: 20px 0; text-align: center; border: 2px dashed #ff416c; }
    .highlight { color: #ff416c; font-weight: bold; }
    .footer { text-align: center; margin-top: 30px; color: #666; font-size: 14px; }
"#;

/// Render the confirmation email body
pub fn render_confirmation_html(
    request: &NotificationRequest,
    code: &TicketCode,
    event: &EventDetails,
) -> String {
    let name = escape_html(&request.customer_name);
    let to = escape_html(&request.to);
    let ticket_type = escape_html(&request.ticket_type);
    let seat = escape_html(&request.seat_number);
    let price = format_amount(request.ticket_price);
    let code = escape_html(code.as_str());
    let support = escape_html(&event.support_email);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>{style}</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>🎵 ¡Compra Confirmada! 🎵</h1>
      <p>Tu boleto para el concierto está listo</p>
    </div>
    <div class="content">
      <h2>Hola {name},</h2>
      <p>¡Gracias por tu compra! Tu boleto ha sido confirmado exitosamente.</p>

      <div class="ticket-info">
        <h3>📋 Detalles de tu Boleto</h3>
        <p><strong>Nombre:</strong> <span class="highlight">{name}</span></p>
        <p><strong>Email:</strong> {to}</p>
        <p><strong>Tipo de Boleto:</strong> <span class="highlight">{ticket_type}</span></p>
        <p><strong>Precio:</strong> <span class="highlight">{price}</span></p>
        <p><strong>Asiento:</strong> <span class="highlight">{seat}</span></p>
      </div>

      <div class="qr-section">
        <h3>🎫 Tu Boleto Digital</h3>
        <p><strong>Código de Boleto:</strong> <span class="highlight">{code}</span></p>
        <p style="font-size: 12px; color: #666;">Presenta este email en la entrada del evento</p>
      </div>

      <h3>📍 Información del Evento</h3>
      <p><strong>Evento:</strong> {event_name}</p>
      <p><strong>Fecha:</strong> {event_date}</p>
      <p><strong>Hora:</strong> {event_time}</p>
      <p><strong>Lugar:</strong> {event_venue}</p>
      <p><strong>Dirección:</strong> {event_address}</p>

      <h3>📝 Instrucciones Importantes</h3>
      <ul>
        <li>✅ Llega al menos 30 minutos antes del evento</li>
        <li>✅ Presenta este email junto con tu identificación</li>
        <li>✅ Guarda este email como comprobante</li>
        <li>❌ No se permiten reembolsos</li>
        <li>❌ Prohibido el ingreso de bebidas y alimentos externos</li>
      </ul>

      <div class="footer">
        <p>¡Nos vemos en el concierto! 🎤</p>
        <p>Si tienes alguna pregunta, contáctanos en: <a href="mailto:{support}">{support}</a></p>
        <hr style="margin: 20px 0; border: none; border-top: 1px solid #ddd;">
        <p style="font-size: 12px; color: #999;">Este es un email automático, por favor no respondas a este mensaje.</p>
      </div>
    </div>
  </div>
</body>
</html>
"#,
        style = STYLE,
        event_name = escape_html(&event.name),
        event_date = escape_html(&event.date),
        event_time = escape_html(&event.time),
        event_venue = escape_html(&event.venue),
        event_address = escape_html(&event.address),
    )
}
