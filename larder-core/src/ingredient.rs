//! Ingredient names, quantities and units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::slug::slugify;

/// Maximum length of an ingredient name.
pub const MAX_NAME_LEN: usize = 155;

/// Largest quantity that fits in six digits with two decimal places.
const MAX_QUANTITY_HUNDREDTHS: i64 = 999_999;

/// Unit of measurement for an ingredient quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "ml")]
    Millilitres,
    #[serde(rename = "mg")]
    Milligrams,
    #[serde(rename = "oz")]
    Ounces,
    #[serde(rename = "l")]
    Litres,
    #[serde(rename = "gm")]
    Grams,
}

impl Unit {
    pub const ALL: &'static [Unit] = &[
        Unit::Millilitres,
        Unit::Milligrams,
        Unit::Ounces,
        Unit::Litres,
        Unit::Grams,
    ];

    /// Short code stored in the database and used on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Unit::Millilitres => "ml",
            Unit::Milligrams => "mg",
            Unit::Ounces => "oz",
            Unit::Litres => "l",
            Unit::Grams => "gm",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Unit::Millilitres => "millilitres",
            Unit::Milligrams => "milligrams",
            Unit::Ounces => "ounces",
            Unit::Litres => "litres",
            Unit::Grams => "grams",
        }
    }
}

impl FromStr for Unit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .iter()
            .copied()
            .find(|unit| unit.code() == s)
            .ok_or_else(|| ValidationError::UnknownUnit(s.to_string()))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A positive decimal quantity with at most six digits, two of them after
/// the decimal point. Stored as an integer number of hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(i32);

impl Quantity {
    pub fn from_hundredths(hundredths: i32) -> Result<Self, ValidationError> {
        if hundredths <= 0 {
            return Err(ValidationError::InvalidQuantity(
                "quantity must be greater than zero".to_string(),
            ));
        }
        if i64::from(hundredths) > MAX_QUANTITY_HUNDREDTHS {
            return Err(ValidationError::InvalidQuantity(
                "no more than 4 digits before the decimal point".to_string(),
            ));
        }
        Ok(Quantity(hundredths))
    }

    pub fn hundredths(self) -> i32 {
        self.0
    }
}

impl FromStr for Quantity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ValidationError::InvalidQuantity(format!("'{}' is not a number", s));

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };
        let whole = whole.strip_prefix('+').unwrap_or(whole);

        if whole.starts_with('-') {
            return Err(ValidationError::InvalidQuantity(
                "quantity must be greater than zero".to_string(),
            ));
        }
        if (whole.is_empty() && frac.is_empty())
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        // Trailing zeros do not count against the two decimal places
        let frac = frac.trim_end_matches('0');
        if frac.len() > 2 {
            return Err(ValidationError::InvalidQuantity(
                "no more than 2 decimal places".to_string(),
            ));
        }

        let whole = whole.trim_start_matches('0');
        if whole.len() > 4 {
            return Err(ValidationError::InvalidQuantity(
                "no more than 4 digits before the decimal point".to_string(),
            ));
        }

        let whole_value: i32 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac_value: i32 = format!("{:0<2}", frac).parse().map_err(|_| invalid())?;

        Quantity::from_hundredths(whole_value * 100 + frac_value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(n) => n.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Name and slug as stored for an ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientName {
    pub name: String,
    pub slug: String,
}

/// Normalize a user-supplied ingredient name: trimmed, lowercased, with a
/// slug derived from it. Names compare case-insensitively within a recipe,
/// so the lowercased form is what gets stored and checked for duplicates.
pub fn normalize_name(raw: &str) -> Result<IngredientName, ValidationError> {
    let name = raw.trim().to_lowercase();
    if name.is_empty() {
        return Err(ValidationError::Blank("Ingredient name"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "Ingredient name",
            max: MAX_NAME_LEN,
        });
    }
    let slug = slugify(&name);
    Ok(IngredientName { name, slug })
}

/// Human readable line such as `100.00 gm of cheese` or `2.00 eggs`.
pub fn describe(quantity: Quantity, unit: Option<Unit>, name: &str) -> String {
    match unit {
        Some(unit) => format!("{} {} of {}", quantity, unit, name),
        None => format!("{} {}", quantity, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!("2".parse::<Quantity>().unwrap().hundredths(), 200);
        assert_eq!("2.5".parse::<Quantity>().unwrap().hundredths(), 250);
        assert_eq!("100.00".parse::<Quantity>().unwrap().hundredths(), 10000);
        assert_eq!(".75".parse::<Quantity>().unwrap().hundredths(), 75);
        assert_eq!("0.250".parse::<Quantity>().unwrap().hundredths(), 25);
        assert_eq!("9999.99".parse::<Quantity>().unwrap().hundredths(), 999_999);
    }

    #[test]
    fn test_reject_bad_quantities() {
        assert!("0".parse::<Quantity>().is_err());
        assert!("0.00".parse::<Quantity>().is_err());
        assert!("-1".parse::<Quantity>().is_err());
        assert!("1.234".parse::<Quantity>().is_err());
        assert!("10000".parse::<Quantity>().is_err());
        assert!("abc".parse::<Quantity>().is_err());
        assert!("".parse::<Quantity>().is_err());
        assert!("1.2.3".parse::<Quantity>().is_err());
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::from_hundredths(200).unwrap().to_string(), "2.00");
        assert_eq!(Quantity::from_hundredths(5).unwrap().to_string(), "0.05");
    }

    #[test]
    fn test_quantity_json() {
        let q: Quantity = serde_json::from_str("2.5").unwrap();
        assert_eq!(q.hundredths(), 250);
        let q: Quantity = serde_json::from_str("\"100.00\"").unwrap();
        assert_eq!(q.hundredths(), 10000);
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"100.00\"");
        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }

    #[test]
    fn test_unit_codes() {
        assert_eq!("gm".parse::<Unit>().unwrap(), Unit::Grams);
        assert_eq!(Unit::Litres.code(), "l");
        assert!("kg".parse::<Unit>().is_err());
        let unit: Unit = serde_json::from_str("\"oz\"").unwrap();
        assert_eq!(unit, Unit::Ounces);
    }

    #[test]
    fn test_normalize_name() {
        let n = normalize_name("  Olive Oil ").unwrap();
        assert_eq!(n.name, "olive oil");
        assert_eq!(n.slug, "olive-oil");
        assert_eq!(normalize_name("   "), Err(ValidationError::Blank("Ingredient name")));
    }

    #[test]
    fn test_describe() {
        let q = Quantity::from_hundredths(10000).unwrap();
        assert_eq!(describe(q, Some(Unit::Grams), "cheese"), "100.00 gm of cheese");
        let q = Quantity::from_hundredths(200).unwrap();
        assert_eq!(describe(q, None, "eggs"), "2.00 eggs");
    }
}
