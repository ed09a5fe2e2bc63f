// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::ConversionError;
use crate::models::{Currencies, RateTable};

/// Convert an amount between two currencies via their EUR-based cross rates.
///
/// `amount * rates[to] / rates[from]`, rounded to 2 decimal places. A code
/// missing from the rate table is a [`ConversionError`], never a silent NaN.
pub fn convert(
    amount: f64,
    rates: &RateTable,
    from: &str,
    to: &str,
) -> Result<f64, ConversionError> {
    let from_rate = rate_for(rates, from)?;
    let to_rate = rate_for(rates, to)?;
    Ok(round2(amount * to_rate / from_rate))
}

fn rate_for(rates: &RateTable, code: &str) -> Result<f64, ConversionError> {
    rates
        .get(code)
        .copied()
        .ok_or_else(|| ConversionError::MissingRate {
            code: code.to_string(),
        })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Empty or non-numeric input counts as zero.
pub fn parse_amount(input: &str) -> f64 {
    input.trim().parse().unwrap_or(0.0)
}

/// Codes offered for selection: a currency needs both a name and a rate,
/// anything else is excluded. Sorted for stable presentation.
pub fn selectable_currencies(currencies: &Currencies, rates: &RateTable) -> Vec<String> {
    let mut codes: Vec<String> = currencies
        .keys()
        .filter(|code| rates.contains_key(*code))
        .cloned()
        .collect();
    codes.sort();
    codes
}
