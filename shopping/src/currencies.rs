use detection::currency::{Currency, CurrencyError, CurrencyTable};

const fn currency(
    code: &'static str,
    symbol: &'static str,
    name: &'static str,
    countries: &'static [&'static str],
) -> Currency {
    Currency {
        code,
        symbol,
        name,
        countries,
    }
}

/// Selectable currencies. The first entry is the default.
pub static CURRENCIES: [Currency; 18] = [
    currency("USD", "$", "US Dollar", &["US", "USA"]),
    currency("EUR", "€", "Euro", &["DE", "FR", "IT", "ES", "NL"]),
    currency("GBP", "£", "British Pound", &["GB", "UK"]),
    currency("INR", "₹", "Indian Rupee", &["IN", "IND"]),
    currency("JPY", "¥", "Japanese Yen", &["JP", "JPN"]),
    currency("CNY", "¥", "Chinese Yuan", &["CN", "CHN"]),
    currency("AUD", "A$", "Australian Dollar", &["AU", "AUS"]),
    currency("CAD", "C$", "Canadian Dollar", &["CA", "CAN"]),
    currency("CHF", "CHF", "Swiss Franc", &["CH", "CHE"]),
    currency("BRL", "R$", "Brazilian Real", &["BR", "BRA"]),
    currency("MXN", "MX$", "Mexican Peso", &["MX", "MEX"]),
    currency("ZAR", "R", "South African Rand", &["ZA", "ZAF"]),
    currency("SGD", "S$", "Singapore Dollar", &["SG", "SGP"]),
    currency("HKD", "HK$", "Hong Kong Dollar", &["HK", "HKG"]),
    currency("KRW", "₩", "South Korean Won", &["KR", "KOR"]),
    currency("SEK", "kr", "Swedish Krona", &["SE", "SWE"]),
    currency("NOK", "kr", "Norwegian Krone", &["NO", "NOR"]),
    currency("NZD", "NZ$", "New Zealand Dollar", &["NZ", "NZL"]),
];

pub fn currency_table() -> Result<CurrencyTable, CurrencyError> {
    CurrencyTable::new(CURRENCIES.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_us_dollar() {
        let table = currency_table().unwrap();
        assert_eq!(table.len(), 18);
        assert_eq!(table.default_currency().code, "USD");
    }

    #[test]
    fn test_country_lookup() {
        let table = currency_table().unwrap();
        assert_eq!(table.find_by_country("NL").map(|c| c.code), Some("EUR"));
        assert_eq!(table.find_by_country("UK").map(|c| c.code), Some("GBP"));
        assert_eq!(table.find_by_country("IND").map(|c| c.code), Some("INR"));
        assert_eq!(table.find_by_country("AR"), None);
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = CURRENCIES.iter().map(|c| c.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), CURRENCIES.len());
    }
}
