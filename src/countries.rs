// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::models::Country;

/// Currencies shared by several territories map to one canonical country,
/// picked by ISO3 code.
fn preferred_iso3(currency: &str) -> Option<&'static str> {
    match currency {
        "AUD" => Some("AUS"),
        "CAD" => Some("CAN"),
        "CHF" => Some("CHE"),
        "DKK" => Some("DNK"),
        "GBP" => Some("GBR"),
        "INR" => Some("IND"),
        "NOK" => Some("NOR"),
        "NZD" => Some("NZL"),
        "USD" => Some("USA"),
        _ => None,
    }
}

/// The Euro is held by ~20 territories; showing all of them drowns the
/// useful answer. A fixed five-country list replaces the remote entries.
fn euro_zone() -> Vec<Country> {
    let entries = [
        ("Germany", "🇩🇪", "Berlin", "DEU"),
        ("France", "🇫🇷", "Paris", "FRA"),
        ("Italy", "🇮🇹", "Rome", "ITA"),
        ("Spain", "🇪🇸", "Madrid", "ESP"),
        ("Netherlands", "🇳🇱", "Amsterdam", "NLD"),
    ];
    entries
        .into_iter()
        .map(|(name, emoji, capital, iso3)| Country {
            name: name.to_string(),
            emoji: emoji.to_string(),
            capital: capital.to_string(),
            currency_code: "EUR".to_string(),
            iso3: iso3.to_string(),
        })
        .collect()
}

/// Resolve the representative countries for a currency code.
///
/// EUR always gets the fixed Euro-zone list. Currencies with a preferred
/// country return that single entry when it is present in `all`; when it is
/// not, the lookup falls through to every country using the currency rather
/// than returning nothing.
pub fn lookup_countries(currency: &str, all: &[Country]) -> Vec<Country> {
    if currency == "EUR" {
        return euro_zone();
    }

    if let Some(iso3) = preferred_iso3(currency) {
        if let Some(country) = all
            .iter()
            .find(|c| c.currency_code == currency && c.iso3 == iso3)
        {
            return vec![country.clone()];
        }
    }

    all.iter()
        .filter(|c| c.currency_code == currency)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str, currency: &str, iso3: &str) -> Country {
        Country {
            name: name.to_string(),
            emoji: String::new(),
            capital: String::new(),
            currency_code: currency.to_string(),
            iso3: iso3.to_string(),
        }
    }

    #[test]
    fn test_eur_always_returns_fixed_list() {
        // Remote data for EUR is ignored entirely.
        let all = vec![
            country("Austria", "EUR", "AUT"),
            country("Finland", "EUR", "FIN"),
        ];

        let found = lookup_countries("EUR", &all);
        assert_eq!(found.len(), 5);
        assert!(found.iter().all(|c| c.currency_code == "EUR"));
        assert_eq!(found[0].name, "Germany");
        assert!(found.iter().any(|c| c.iso3 == "NLD"));

        // Same answer with no remote data at all.
        assert_eq!(lookup_countries("EUR", &[]), found);
    }

    #[test]
    fn test_preferred_country_wins_when_present() {
        let all = vec![
            country("Canada", "CAD", "CAN"),
            country("Ecuador", "USD", "ECU"),
            country("United States", "USD", "USA"),
        ];

        let found = lookup_countries("CAD", &all);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].iso3, "CAN");

        let found = lookup_countries("USD", &all);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].iso3, "USA");
    }

    #[test]
    fn test_missing_preferred_country_falls_through() {
        // No USA entry: every USD country is returned instead of nothing.
        let all = vec![
            country("Ecuador", "USD", "ECU"),
            country("El Salvador", "USD", "SLV"),
            country("Canada", "CAD", "CAN"),
        ];

        let found = lookup_countries("USD", &all);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|c| c.currency_code == "USD"));
    }

    #[test]
    fn test_currency_without_override_matches_all() {
        let all = vec![
            country("Norway", "NOK", "NOR"),
            country("Japan", "JPY", "JPN"),
        ];

        let found = lookup_countries("JPY", &all);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Japan");
    }

    #[test]
    fn test_unknown_currency_returns_empty() {
        let all = vec![country("Japan", "JPY", "JPN")];
        assert!(lookup_countries("XXX", &all).is_empty());
    }
}
