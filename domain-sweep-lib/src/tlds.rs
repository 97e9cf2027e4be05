//! Built-in TLD categories.
//!
//! These are the groups offered by `--category` and `--list-tlds`. Lookups
//! are case-insensitive.

/// Get the TLDs of a built-in category.
///
/// # Examples
///
/// ```rust
/// use domain_sweep_lib::get_category_tlds;
///
/// let europe = get_category_tlds("Europe").unwrap();
/// assert!(europe.contains(&"de".to_string()));
/// assert!(get_category_tlds("mars").is_none());
/// ```
pub fn get_category_tlds(category: &str) -> Option<Vec<String>> {
    let tlds: Option<&[&str]> = match category.trim().to_lowercase().as_str() {
        "popular" => Some(&[
            "com", "net", "org", "io", "co", "me", "tv", "cc", "ws", "info",
        ]),
        "generic" => Some(&["biz", "name", "pro", "travel", "museum", "aero", "coop"]),
        "americas" => Some(&["us", "ca", "mx", "ar", "cl", "pe", "co", "ve", "ec", "uy"]),
        "europe" => Some(&["uk", "de", "fr", "it", "es", "nl", "be", "at", "ch", "se"]),
        "asia" => Some(&["jp", "cn", "kr", "in", "sg", "hk", "tw", "th", "ph", "my"]),
        "government" => Some(&["gov", "edu", "mil"]),
        _ => None,
    };
    tlds.map(|v| v.iter().map(|s| s.to_string()).collect())
}

/// Category names in display order.
pub fn get_available_categories() -> Vec<&'static str> {
    vec![
        "popular",
        "generic",
        "americas",
        "europe",
        "asia",
        "government",
    ]
}

/// Every TLD of every category, in category order, without duplicates.
pub fn get_all_catalog_tlds() -> Vec<String> {
    let mut all: Vec<String> = Vec::new();
    for category in get_available_categories() {
        for tld in get_category_tlds(category).unwrap_or_default() {
            if !all.contains(&tld) {
                all.push(tld);
            }
        }
    }
    all
}
