//! # Ticket Catalog
//!
//! Ticket types, prices and the seating layout.
//! The catalog is loaded once at startup from `config/catalog.toml`
//! and never changes afterwards.

use crate::error::CatalogError;
use crate::seat::SeatLayout;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Price in cents (USD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price {
    cents: i64,
}

impl Price {
    /// Create a price from whole dollars
    pub fn from_whole(dollars: i64) -> Self {
        Self {
            cents: dollars * 100,
        }
    }

    /// Create a price from cents
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Format for display: `$80` for whole amounts, `$80.50` otherwise
    pub fn display(&self) -> String {
        format_amount(self.as_decimal())
    }
}

/// Format a decimal amount the way prices are shown to buyers
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${}", amount as i64)
    } else {
        format!("${:.2}", amount)
    }
}

impl TryFrom<f64> for Price {
    type Error = CatalogError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CatalogError::Invalid(format!(
                "price must be a positive number, got {amount}"
            )));
        }
        Ok(Self {
            cents: (amount * 100.0).round() as i64,
        })
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.as_decimal()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Ticket tiers on sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketType {
    #[serde(rename = "VIP")]
    Vip,
    #[serde(rename = "General")]
    General,
    #[serde(rename = "Balcón", alias = "Balcon")]
    Balcony,
}

impl TicketType {
    /// Display name, identical to the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Vip => "VIP",
            TicketType::General => "General",
            TicketType::Balcony => "Balcón",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vip" => Ok(TicketType::Vip),
            "general" => Ok(TicketType::General),
            "balcón" | "balcon" => Ok(TicketType::Balcony),
            _ => Err(CatalogError::InvalidTicketType(s.to_string())),
        }
    }
}

/// A purchasable ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub price: Price,
}

impl Ticket {
    pub fn new(ticket_type: TicketType, price: Price) -> Self {
        Self { ticket_type, price }
    }
}

/// Ticket catalog and seating (loaded from config)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    tickets: Vec<Ticket>,
    #[serde(default)]
    seating: SeatLayout,
}

impl Catalog {
    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(toml_str)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load from the first `config/catalog.toml` found, or fall back to the
    /// built-in catalog
    pub fn load() -> Result<Self, CatalogError> {
        let config_paths = [
            "config/catalog.toml",
            "../config/catalog.toml",
            "../../config/catalog.toml",
        ];

        for path in config_paths {
            if let Ok(content) = std::fs::read_to_string(path) {
                let catalog = Self::from_toml(&content)?;
                tracing::info!(
                    "Loaded {} ticket types and {} seats from {}",
                    catalog.tickets.len(),
                    catalog.seating.len(),
                    path
                );
                return Ok(catalog);
            }
        }

        tracing::warn!("No catalog found, using built-in catalog");
        Ok(Self::default())
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Find a ticket by type
    pub fn ticket(&self, ticket_type: TicketType) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.ticket_type == ticket_type)
    }

    pub fn seating(&self) -> &SeatLayout {
        &self.seating
    }

    /// Check tickets are unique and priced, and the seating is consistent
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.tickets.is_empty() {
            return Err(CatalogError::Invalid("catalog has no tickets".to_string()));
        }
        for (i, ticket) in self.tickets.iter().enumerate() {
            if ticket.price.cents() <= 0 {
                return Err(CatalogError::Invalid(format!(
                    "{} has a non-positive price",
                    ticket.ticket_type
                )));
            }
            if self.tickets[..i]
                .iter()
                .any(|t| t.ticket_type == ticket.ticket_type)
            {
                return Err(CatalogError::Invalid(format!(
                    "duplicate ticket type {}",
                    ticket.ticket_type
                )));
            }
        }
        self.seating.validate()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            tickets: vec![
                Ticket::new(TicketType::Vip, Price::from_whole(150)),
                Ticket::new(TicketType::General, Price::from_whole(80)),
                Ticket::new(TicketType::Balcony, Price::from_whole(100)),
            ],
            seating: SeatLayout::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::SeatId;

    const CATALOG_TOML: &str = r#"
[[tickets]]
type = "VIP"
price = 150

[[tickets]]
type = "General"
price = 80

[[tickets]]
type = "Balcón"
price = 100

[seating]
rows = "ABCDE"
columns = 5
unavailable = ["A3", "B2", "C4", "D1", "E5"]
"#;

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_whole(80).display(), "$80");
        assert_eq!(Price::from_cents(8050).display(), "$80.50");
        assert_eq!(format_amount(150.0), "$150");
    }

    #[test]
    fn test_price_rejects_non_positive() {
        assert!(Price::try_from(0.0).is_err());
        assert!(Price::try_from(-5.0).is_err());
        assert!(Price::try_from(f64::NAN).is_err());
        assert_eq!(Price::try_from(99.99).unwrap().cents(), 9999);
    }

    #[test]
    fn test_ticket_type_names() {
        assert_eq!("vip".parse::<TicketType>().unwrap(), TicketType::Vip);
        assert_eq!("Balcon".parse::<TicketType>().unwrap(), TicketType::Balcony);
        assert_eq!("BALCÓN".parse::<TicketType>().unwrap(), TicketType::Balcony);
        assert!("Pit".parse::<TicketType>().is_err());

        let json = serde_json::to_string(&TicketType::Balcony).unwrap();
        assert_eq!(json, "\"Balcón\"");
    }

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.tickets().len(), 3);
        assert_eq!(
            catalog.ticket(TicketType::General).map(|t| t.price),
            Some(Price::from_whole(80))
        );
        assert_eq!(catalog.seating().len(), 25);
    }

    #[test]
    fn test_from_toml_matches_default() {
        let catalog = Catalog::from_toml(CATALOG_TOML).unwrap();
        assert_eq!(catalog, Catalog::default());
        assert!(!catalog.seating().is_available(&SeatId::new('D', 1)));
    }

    #[test]
    fn test_shipped_catalog_matches_default() {
        let shipped = include_str!("../../../config/catalog.toml");
        assert_eq!(Catalog::from_toml(shipped).unwrap(), Catalog::default());
    }

    #[test]
    fn test_from_toml_rejects_bad_catalogs() {
        assert!(Catalog::from_toml("tickets = []").is_err());

        let duplicate = r#"
[[tickets]]
type = "VIP"
price = 150

[[tickets]]
type = "VIP"
price = 120
"#;
        assert!(Catalog::from_toml(duplicate).is_err());

        let free = r#"
[[tickets]]
type = "General"
price = 0
"#;
        assert!(Catalog::from_toml(free).is_err());
    }

    #[test]
    fn test_ticket_json_shape() {
        let ticket = Ticket::new(TicketType::Vip, Price::from_whole(150));
        let json = serde_json::to_value(ticket).unwrap();
        assert_eq!(json, serde_json::json!({"type": "VIP", "price": 150.0}));
    }
}
