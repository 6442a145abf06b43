use std::cmp::Ordering;

/// Locale used when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Normalize locale identifiers to a canonical-ish form for lookup.
///
/// - Converts `_` to `-` (Android often reports `en_US`).
/// - Trims whitespace.
pub fn normalize_locale(s: &str) -> String {
    s.trim().replace('_', "-")
}

/// Create a fallback chain for string lookup.
///
/// Example:
/// - `ko-KR` -> `["ko-KR", "ko", "en-US"]`
/// - `en-US` -> `["en-US", "en", "en-US"]` (deduped to `["en-US", "en"]`)
pub fn locale_fallback_chain(locale: &str) -> Vec<String> {
    let l = normalize_locale(locale);
    let mut chain = Vec::new();

    if !l.is_empty() {
        chain.push(l.clone());
        if let Some(lang) = l.split('-').next() {
            if !lang.is_empty() {
                chain.push(lang.to_string());
            }
        }
    }

    chain.push(DEFAULT_LOCALE.to_string());

    // Dedup, preserve order.
    let mut out = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for x in chain {
        if seen.insert(x.clone()) {
            out.push(x);
        }
    }
    out
}

/// Order two language codes the way a language list should read.
///
/// Codes are compared subtag by subtag after normalization, ignoring ASCII
/// case, so `en` < `en-GB` < `en-us` < `es`. Codes equal under that rule fall
/// back to a byte comparison to keep the order total.
pub fn compare_codes(a: &str, b: &str) -> Ordering {
    let na = normalize_locale(a);
    let nb = normalize_locale(b);

    let mut sa = na.split('-');
    let mut sb = nb.split('-');
    loop {
        match (sa.next(), sb.next()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = x
                    .bytes()
                    .map(|c| c.to_ascii_lowercase())
                    .cmp(y.bytes().map(|c| c.to_ascii_lowercase()));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }

    a.cmp(b)
}
