//! # Seat Map
//!
//! Seat identifiers and the static seating layout.
//! Availability is fixed for the lifetime of the process.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A seat identifier: row letter plus column number (e.g. `A1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId {
    row: char,
    column: u8,
}

impl SeatId {
    /// Create a seat id; the row is normalised to upper case
    pub fn new(row: char, column: u8) -> Self {
        Self {
            row: row.to_ascii_uppercase(),
            column,
        }
    }

    pub fn row(&self) -> char {
        self.row
    }

    pub fn column(&self) -> u8 {
        self.column
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl FromStr for SeatId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let row = chars
            .next()
            .filter(|c| c.is_ascii_alphabetic())
            .ok_or_else(|| CatalogError::InvalidSeat(s.to_string()))?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CatalogError::InvalidSeat(s.to_string()));
        }
        let column: u8 = digits
            .parse()
            .map_err(|_| CatalogError::InvalidSeat(s.to_string()))?;
        if column == 0 {
            return Err(CatalogError::InvalidSeat(s.to_string()));
        }
        Ok(Self::new(row, column))
    }
}

impl TryFrom<String> for SeatId {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatId> for String {
    fn from(seat: SeatId) -> Self {
        seat.to_string()
    }
}

/// How a seat should be presented to the buyer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatState {
    Available,
    Selected,
    Unavailable,
}

/// Seating grid: rows × columns with a fixed set of unavailable seats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatLayout {
    /// Row letters in display order (e.g. "ABCDE")
    rows: String,
    /// Columns per row, numbered from 1
    columns: u8,
    /// Seats that can never be selected
    #[serde(default)]
    unavailable: Vec<SeatId>,
}

impl SeatLayout {
    pub fn new(rows: impl Into<String>, columns: u8, unavailable: Vec<SeatId>) -> Self {
        Self {
            rows: rows.into().to_ascii_uppercase(),
            columns,
            unavailable,
        }
    }

    /// Row letters in display order
    pub fn rows(&self) -> impl Iterator<Item = char> + '_ {
        self.rows.chars()
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Every seat in row-major order (`A1, A2, .., B1, ..`)
    pub fn seats(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.rows()
            .flat_map(move |row| (1..=self.columns).map(move |col| SeatId::new(row, col)))
    }

    /// Seats of a single row, left to right
    pub fn row_seats(&self, row: char) -> impl Iterator<Item = SeatId> {
        (1..=self.columns).map(move |col| SeatId::new(row, col))
    }

    /// Total number of seats in the grid
    pub fn len(&self) -> usize {
        self.rows.chars().count() * self.columns as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether a seat lies inside the grid
    pub fn contains(&self, seat: &SeatId) -> bool {
        self.rows.contains(seat.row()) && (1..=self.columns).contains(&seat.column())
    }

    /// Check whether a seat exists and can be selected
    pub fn is_available(&self, seat: &SeatId) -> bool {
        self.contains(seat) && !self.unavailable.contains(seat)
    }

    pub fn available_count(&self) -> usize {
        self.seats().filter(|s| self.is_available(s)).count()
    }

    pub fn unavailable_count(&self) -> usize {
        self.seats().filter(|s| !self.is_available(s)).count()
    }

    /// Check the layout is well formed
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.rows.is_empty() || self.columns == 0 {
            return Err(CatalogError::Invalid("seating grid is empty".to_string()));
        }
        if let Some(bad) = self.rows.chars().find(|c| !c.is_ascii_uppercase()) {
            return Err(CatalogError::Invalid(format!("invalid row letter {bad:?}")));
        }
        let mut seen = Vec::new();
        for row in self.rows.chars() {
            if seen.contains(&row) {
                return Err(CatalogError::Invalid(format!("duplicate row {row}")));
            }
            seen.push(row);
        }
        if let Some(seat) = self.unavailable.iter().find(|s| !self.contains(s)) {
            return Err(CatalogError::Invalid(format!(
                "unavailable seat {seat} is outside the grid"
            )));
        }
        Ok(())
    }
}

impl Default for SeatLayout {
    fn default() -> Self {
        Self::new(
            "ABCDE",
            5,
            vec![
                SeatId::new('A', 3),
                SeatId::new('B', 2),
                SeatId::new('C', 4),
                SeatId::new('D', 1),
                SeatId::new('E', 5),
            ],
        )
    }
}
