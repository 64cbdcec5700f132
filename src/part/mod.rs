mod repository;

pub use repository::*;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CoreError, Result};
use crate::store::Record;

/// Inventory category of a [`Part`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum PartKind {
    #[default]
    Mechanical,
    Electrical,
    Hydraulic,
}

impl std::fmt::Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PartKind::Mechanical => write!(f, "Mechanical"),
            PartKind::Electrical => write!(f, "Electrical"),
            PartKind::Hydraulic => write!(f, "Hydraulic"),
        }
    }
}

impl std::str::FromStr for PartKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("mechanical") {
            Ok(PartKind::Mechanical)
        } else if s.eq_ignore_ascii_case("electrical") {
            Ok(PartKind::Electrical)
        } else if s.eq_ignore_ascii_case("hydraulic") {
            Ok(PartKind::Hydraulic)
        } else {
            Err(CoreError::Parse {
                what: "part kind",
                value: s.to_owned(),
            })
        }
    }
}

/// Inventory part as saved on the parts file.
///
/// The name is the natural key, unique case-insensitively.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Part {
    #[validate(length(min = 1, message = "Part name must not be empty."))]
    pub name: String,
    pub kind: PartKind,
    /// Required for machine operation; drives budget-confirmation
    /// warnings in the UI layer.
    pub is_essential: bool,
    #[validate(range(min = 0.0, message = "Price must not be negative."))]
    pub price: f64,
    #[validate(range(min = 1, message = "Quantity must be at least 1."))]
    pub quantity: u32,
}

impl Record for Part {
    const FIELDS: usize = 5;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.kind.to_string(),
            self.is_essential.to_string(),
            self.price.to_string(),
            self.quantity.to_string(),
        ]
    }

    fn from_fields(fields: &[String]) -> Result<Self> {
        let is_essential =
            fields[2].parse().map_err(|_| CoreError::Parse {
                what: "essential flag",
                value: fields[2].clone(),
            })?;
        let price = fields[3].parse().map_err(|_| CoreError::Parse {
            what: "price",
            value: fields[3].clone(),
        })?;
        let quantity = fields[4].parse().map_err(|_| CoreError::Parse {
            what: "quantity",
            value: fields[4].clone(),
        })?;

        Ok(Self {
            name: fields[0].clone(),
            kind: fields[1].parse()?,
            is_essential,
            price,
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels_round_trip() {
        for kind in
            [PartKind::Mechanical, PartKind::Electrical, PartKind::Hydraulic]
        {
            assert_eq!(kind.to_string().parse::<PartKind>().unwrap(), kind);
        }
        assert!("pneumatic".parse::<PartKind>().is_err());
    }

    #[test]
    fn test_fields_round_trip() {
        let part = Part {
            name: "O-Ring".into(),
            kind: PartKind::Hydraulic,
            is_essential: true,
            price: 12.5,
            quantity: 40,
        };
        assert_eq!(Part::from_fields(&part.to_fields()).unwrap(), part);
    }
}
