// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// EUR-based exchange rates keyed by three-letter currency code.
pub type RateTable = HashMap<String, f64>;

/// Currency metadata keyed by three-letter currency code.
pub type Currencies = HashMap<String, CurrencyInfo>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// Payload of the `rates` endpoint. All rates are expressed against `base`
/// (EUR per the upstream API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesResponse {
    pub base: String,
    pub date: String,
    pub rates: RateTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub capital: String,
    #[serde(rename = "currency")]
    pub currency_code: String,
    pub iso3: String,
}

/// Flatten the `countries` payload (a map keyed by ISO2 code) into a list
/// sorted by country name.
pub fn into_country_list(by_iso2: HashMap<String, Country>) -> Vec<Country> {
    let mut countries: Vec<Country> = by_iso2.into_values().collect();
    countries.sort_by(|a, b| a.name.cmp(&b.name));
    countries
}
