use thiserror::Error;

use crate::catalog::CatalogParseError;
use crate::strings::StringTableParseError;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error(transparent)]
    Catalog(#[from] CatalogParseError),

    #[error(transparent)]
    Strings(#[from] StringTableParseError),
}
