use std::fmt::Display;

use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

const CENTS_PER_UNIT: i64 = 100;
const MIN_WHOLE_UNITS: i64 = i64::MIN / CENTS_PER_UNIT;
const MAX_WHOLE_UNITS: i64 = i64::MAX / CENTS_PER_UNIT;

/// Monetary value held as an integer number of cents. The JSON
/// representation is a plain number with at most two decimal places; other
/// shapes are rejected rather than rounded.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount {
    cents: i64,
}

impl Amount {
    pub fn from_cents(cents: i64) -> Amount {
        Amount { cents }
    }

    pub fn as_cents(&self) -> i64 {
        self.cents
    }

    pub fn is_positive_nonzero(&self) -> bool {
        self.cents > 0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-")?;
        }
        write!(
            f,
            "{}.{:02}",
            (self.cents / CENTS_PER_UNIT).abs(),
            (self.cents % CENTS_PER_UNIT).abs()
        )
    }
}

/// Turns the literal text of a JSON number into a cent count. `123` and
/// `123.45` are accepted; one or three decimal places, exponent notation,
/// and values whose cent count would not fit an i64 are not.
fn cents_from_literal(literal: &str) -> Result<i64, &'static str> {
    let shape = Regex::new(r"^(-?[0-9]+)(?:\.([0-9]{2}))?$").unwrap();
    let captures = shape.captures(literal).ok_or("Failed to parse")?;

    let whole = captures[1].parse::<i64>().map_err(|_| "Invalid amount")?;
    if whole <= MIN_WHOLE_UNITS || whole >= MAX_WHOLE_UNITS {
        return Err("Invalid amount");
    }

    let mut fraction = match captures.get(2) {
        Some(digits) => digits.as_str().parse::<i64>().map_err(|_| "Failed to parse")?,
        None => 0,
    };
    if literal.starts_with('-') {
        fraction = -fraction;
    }

    Ok(whole * CENTS_PER_UNIT + fraction)
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let number = self.to_string().parse::<Number>().unwrap();
        Number::serialize(&number, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Amount, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = Number::deserialize(deserializer)?;

        match cents_from_literal(number.as_str()) {
            Ok(cents) => Ok(Amount::from_cents(cents)),
            Err(reason) => Err(de::Error::custom(reason)),
        }
    }
}
