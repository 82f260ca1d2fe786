//! Currency Formatting

use serde::{Deserialize, Serialize};

/// Where the currency symbol goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPosition {
    /// `$27,450.00`
    Prefix,
    /// `27.450,00 €`
    Suffix,
}

/// Currency display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub position: SymbolPosition,
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub decimals: u8,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            position: SymbolPosition::Prefix,
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            decimals: 2,
        }
    }
}

impl CurrencyFormat {
    /// Euro, continental style
    pub fn euro() -> Self {
        Self {
            symbol: "€".to_string(),
            position: SymbolPosition::Suffix,
            thousands_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            decimals: 2,
        }
    }

    /// Format an amount
    pub fn format(&self, amount: f64) -> String {
        let fixed = format!("{:.*}", usize::from(self.decimals), amount.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (fixed.as_str(), None),
        };

        let mut number = String::with_capacity(fixed.len() + int_part.len() / 3);
        let digits = int_part.len();
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                number.push_str(&self.thousands_separator);
            }
            number.push(ch);
        }
        if let Some(frac_part) = frac_part {
            number.push_str(&self.decimal_separator);
            number.push_str(frac_part);
        }

        // No "-$0.00" for amounts that round to zero
        let negative = amount < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));
        let sign = if negative { "-" } else { "" };

        match self.position {
            SymbolPosition::Prefix => format!("{}{}{}", sign, self.symbol, number),
            SymbolPosition::Suffix => format!("{}{} {}", sign, number, self.symbol),
        }
    }
}
