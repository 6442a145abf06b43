//! Lingo language sheet
//!
//! A language picker built from three pieces:
//!
//! - [`SelectionController`]: the single-selection list state
//! - [`LanguageDialog`]: presents the list as a sheet with Save/Cancel and
//!   forwards the saved language to a [`PersistenceService`]
//! - [`PresentationHost`]: whatever actually draws sheets and toasts
//!
//! Rendering is headless: the dialog emits [`Node`] trees and the host
//! turns them into pixels (or terminal lines, or test assertions).

pub mod dialog;
pub mod host;
pub mod node;
pub mod persist;
pub mod selection;
pub mod sheet;
pub mod toast;

pub use dialog::{DialogError, LanguageDialog, SaveOutcome, DIALOG_CLASS};
pub use host::PresentationHost;
pub use node::{ButtonNode, ButtonVariant, ClickHandler, ListItemNode, Node};
pub use persist::{PersistenceError, PersistenceService};
pub use selection::{
    ListItem, SelectOutcome, SelectionController, SelectionError, SelectionState, SkipReason,
    SkippedEntry,
};
pub use sheet::{SheetBuilder, SheetConfig, SheetSide};
pub use toast::{Toast, ToastBuilder, ToastVariant};
