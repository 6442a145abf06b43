//! Lingo internationalization (i18n)
//!
//! Goals:
//! - A typed, read-only [`LocaleCatalog`] describing the languages an app offers
//! - Numeric-key [`StringTable`]s for UI labels (`Save`, `Cancel`, ...)
//! - [`LocaleTables`] to merge per-locale tables along a fallback chain
//!
//! Everything here is a plain value; the current language is always passed in.

mod catalog;
mod error;
mod label;
mod locale;
mod strings;
mod tables;

pub use catalog::{CatalogParseError, CatalogRecord, LanguageEntry, LocaleCatalog};
pub use error::I18nError;
pub use label::{ArgValue, Label, Message, StringKey};
pub use locale::{compare_codes, locale_fallback_chain, normalize_locale, DEFAULT_LOCALE};
pub use strings::{keys, StringTable, StringTableParseError};
pub use tables::LocaleTables;

/// Convenience macro for building a string-table key + args as a [`Label`].
///
/// Examples:
/// - `t!(keys::SAVE)`
/// - `t!(keys::SAVE_FAILED_DETAIL, { error: err.to_string() })`
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::Label::msg($crate::Message::new($key))
    };
    ($key:expr, { $($name:ident : $value:expr),* $(,)? }) => {{
        let mut m = $crate::Message::new($key);
        $(
            m = m.arg(stringify!($name), $value);
        )*
        $crate::Label::msg(m)
    }};
}
