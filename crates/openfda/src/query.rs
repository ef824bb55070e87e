//! Construction of the drugs@fda `search` query value.

/// Builds the value of the `search` parameter for the drugs@fda endpoint.
///
/// The manufacturer clause is always present; the brand clause is appended
/// only when a brand name is supplied and is not blank. A brand name that is
/// empty or all-whitespace is treated as absent. Clauses are joined with a
/// literal ` AND ` (one space on each side); percent-encoding of the result
/// is the URL layer's concern, not this function's.
///
/// Values are embedded verbatim between the quotes. Embedded `"` characters
/// are not escaped.
///
/// Callers are expected to have already rejected manufacturer names that are
/// empty after trimming.
///
/// # Arguments
///
/// * `manufacturer_name` - The manufacturer name to search for
/// * `brand_name` - The brand name to search for, if any
pub fn build_search_query(manufacturer_name: &str, brand_name: Option<&str>) -> String {
    let mut query = String::new();

    query.push_str("openfda.manufacturer_name:\"");
    query.push_str(manufacturer_name);
    query.push('"');

    if let Some(brand) = brand_name.filter(|b| !b.trim().is_empty()) {
        query.push_str(" AND openfda.brand_name:\"");
        query.push_str(brand);
        query.push('"');
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manufacturer_only_query() {
        assert_eq!(
            build_search_query("TARO", None),
            "openfda.manufacturer_name:\"TARO\""
        );
    }

    #[test]
    fn test_manufacturer_and_brand_query() {
        assert_eq!(
            build_search_query("TARO", Some("LORATADINE")),
            "openfda.manufacturer_name:\"TARO\" AND openfda.brand_name:\"LORATADINE\""
        );
    }

    #[test]
    fn test_and_token_has_single_spaces() {
        let query = build_search_query("TARO", Some("LORATADINE"));

        assert!(query.contains("\" AND openfda.brand_name"));
        assert!(!query.contains("  AND"));
        assert!(!query.contains("AND  "));
        assert!(!query.contains("+AND+"));
    }

    #[test]
    fn test_blank_brand_is_treated_as_absent() {
        let expected = "openfda.manufacturer_name:\"TARO\"";

        assert_eq!(build_search_query("TARO", Some("")), expected);
        assert_eq!(build_search_query("TARO", Some("   ")), expected);
        assert_eq!(build_search_query("TARO", Some("\t")), expected);
    }

    #[test]
    fn test_query_is_deterministic() {
        let first = build_search_query("TARO", Some("LORATADINE"));
        let second = build_search_query("TARO", Some("LORATADINE"));

        assert_eq!(first, second);
    }

    #[test]
    fn test_embedded_quotes_pass_through_unescaped() {
        // Pins current behavior: values are not escaped before embedding.
        assert_eq!(
            build_search_query("TA\"RO", None),
            "openfda.manufacturer_name:\"TA\"RO\""
        );
    }
}
