//! Language selection dialog
//!
//! Wires a [`SelectionController`] into a sheet: one row per language,
//! and a footer with Save and Cancel. Saving commits the pending selection
//! and closes the sheet. A selection that differs from the one the dialog
//! opened with goes to the [`PersistenceService`]; on success the host
//! reloads, on failure the user gets a toast.
//!
//! # Example
//!
//! ```ignore
//! let dialog = LanguageDialog::new(host, store, strings);
//! dialog.open(&catalog, &current_language);
//! // ... user clicks a row, then Save
//! ```

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use lingo_i18n::{keys, t, LocaleCatalog, StringTable};
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

use crate::host::PresentationHost;
use crate::node::{button, ButtonVariant, ListItemNode, Node};
use crate::persist::{PersistenceError, PersistenceService};
use crate::selection::{SelectOutcome, SelectionController, SelectionError, SkippedEntry};
use crate::sheet::{sheet, SheetConfig, SheetSide};
use crate::toast::{toast, ToastVariant};

/// Styling namespace applied to the host while the dialog is open.
pub const DIALOG_CLASS: &str = "language-dialog";

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("language dialog is not open")]
    NotOpen,

    #[error("no language selected")]
    NothingSelected,

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("failed to save language `{code}`: {source}")]
    Persistence {
        code: String,
        #[source]
        source: PersistenceError,
    },
}

/// What `save` did with the pending selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Persisted and the host was asked to reload.
    Saved(String),
    /// Same as the language the dialog opened with; nothing was persisted.
    Unchanged(String),
}

impl SaveOutcome {
    pub fn language(&self) -> &str {
        match self {
            SaveOutcome::Saved(code) | SaveOutcome::Unchanged(code) => code,
        }
    }
}

/// State that lives from `open` until save, cancel or dismissal.
struct Session {
    list: SelectionController,
    /// Pending selection right after `open`.
    initial: Option<String>,
    runtime: Option<Handle>,
}

struct DialogInner {
    host: Arc<dyn PresentationHost>,
    persistence: Arc<dyn PersistenceService>,
    strings: StringTable,
    session: Mutex<Option<Session>>,
}

impl DialogInner {
    fn session(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Language picker presented as a sheet. Cheap to clone; clones share the session.
#[derive(Clone)]
pub struct LanguageDialog {
    inner: Arc<DialogInner>,
}

impl LanguageDialog {
    /// `strings` supplies the title and button labels; keys missing from it
    /// fall back to the built-in English strings.
    pub fn new(
        host: Arc<dyn PresentationHost>,
        persistence: Arc<dyn PersistenceService>,
        strings: StringTable,
    ) -> Self {
        let mut strings = strings;
        strings.merge_missing(StringTable::builtin_en());
        Self {
            inner: Arc::new(DialogInner {
                host,
                persistence,
                strings,
                session: Mutex::new(None),
            }),
        }
    }

    /// Show the dialog for `catalog` with `current_language` preselected.
    ///
    /// Opening while already open starts a fresh session. Returns the
    /// catalog entries that were left out of the list.
    pub fn open(&self, catalog: &LocaleCatalog, current_language: &str) -> Vec<SkippedEntry> {
        let mut list = SelectionController::new();
        list.initialize(catalog.sorted_entries(), current_language);
        let skipped = list.warnings().to_vec();

        let config = self.render(&list);
        let initial = list.commit().map(str::to_owned);
        *self.inner.session() = Some(Session {
            list,
            initial,
            runtime: Handle::try_current().ok(),
        });

        debug!(
            language = %current_language,
            entries = catalog.len(),
            skipped = skipped.len(),
            "opening language dialog"
        );
        self.inner.host.add_class(DIALOG_CLASS);
        self.inner.host.show_sheet(config);
        skipped
    }

    pub fn is_open(&self) -> bool {
        self.inner.session().is_some()
    }

    /// The pending selection of the open session.
    pub fn pending_language(&self) -> Option<String> {
        self.inner
            .session()
            .as_ref()
            .and_then(|s| s.list.commit().map(str::to_owned))
    }

    /// Select a row by code and redraw the sheet when the selection moved.
    pub fn select(&self, code: &str) -> Result<SelectOutcome, DialogError> {
        let (outcome, config) = {
            let mut guard = self.inner.session();
            let session = guard.as_mut().ok_or(DialogError::NotOpen)?;
            let outcome = session.list.select(code)?;
            let config = match outcome {
                SelectOutcome::Changed { .. } => Some(self.render(&session.list)),
                SelectOutcome::Unchanged => None,
            };
            (outcome, config)
        };

        if let Some(config) = config {
            self.inner.host.show_sheet(config);
        }
        Ok(outcome)
    }

    /// Close without saving. Returns false when nothing was open.
    pub fn cancel(&self) -> bool {
        if self.inner.session().take().is_none() {
            return false;
        }
        debug!("language dialog cancelled");
        self.inner.host.hide_sheet();
        self.inner.host.remove_class(DIALOG_CLASS);
        true
    }

    /// Commit the pending selection and persist it if it changed.
    ///
    /// The sheet is closed before the persistence call starts; the session
    /// is gone by then, so later clicks cannot change what is being saved.
    pub async fn save(&self) -> Result<SaveOutcome, DialogError> {
        let (code, initial) = {
            let session = self.inner.session().take().ok_or(DialogError::NotOpen)?;
            (session.list.commit().map(str::to_owned), session.initial)
        };

        self.inner.host.hide_sheet();
        self.inner.host.remove_class(DIALOG_CLASS);

        let code = code.ok_or(DialogError::NothingSelected)?;
        if initial.as_deref() == Some(code.as_str()) {
            debug!(language = %code, "language unchanged, not saving");
            return Ok(SaveOutcome::Unchanged(code));
        }

        match self.inner.persistence.apply_language(&code).await {
            Ok(()) => {
                info!(language = %code, "language saved");
                self.inner.host.reload();
                Ok(SaveOutcome::Saved(code))
            }
            Err(e) => {
                error!(language = %code, error = %e, "failed to save language");
                let strings = &self.inner.strings;
                toast(strings.resolve(&t!(keys::SAVE_FAILED)))
                    .variant(ToastVariant::Destructive)
                    .description(strings.resolve(
                        &t!(keys::SAVE_FAILED_DETAIL, { error: e.to_string() }),
                    ))
                    .show(self.inner.host.as_ref());
                Err(DialogError::Persistence { code, source: e })
            }
        }
    }

    /// The host dismissed the sheet on its own (escape, backdrop).
    fn dismissed(&self) {
        if self.inner.session().take().is_some() {
            debug!("language dialog dismissed");
            self.inner.host.remove_class(DIALOG_CLASS);
        }
    }

    /// Save from a click handler: runs `save` on the runtime captured at `open`.
    fn spawn_save(&self) {
        let runtime = self
            .inner
            .session()
            .as_ref()
            .and_then(|s| s.runtime.clone());
        let Some(runtime) = runtime else {
            warn!("no async runtime available, language not saved");
            return;
        };

        let dialog = self.clone();
        runtime.spawn(async move {
            // Failures are already logged and shown by `save`.
            let _ = dialog.save().await;
        });
    }

    fn render(&self, list: &SelectionController) -> SheetConfig {
        let weak = Arc::downgrade(&self.inner);
        let strings = &self.inner.strings;

        let rows: Vec<Node> = list
            .items()
            .iter()
            .map(|item| {
                let w = weak.clone();
                let code = item.code.clone();
                let mut row = ListItemNode::new(item.code.clone(), item.native_name.clone())
                    .active(item.is_active())
                    .on_click(move || {
                        if let Some(dialog) = upgrade(&w) {
                            if let Err(e) = dialog.select(&code) {
                                warn!(code = %code, error = %e, "language row click ignored");
                            }
                        }
                    });
                if item.english_name != item.native_name {
                    row = row.subtitle(item.english_name.clone());
                }
                Node::from(row)
            })
            .collect();

        let save_weak = weak.clone();
        let cancel_weak = weak.clone();
        let footer = Node::Row(vec![
            button(strings.resolve(&t!(keys::SAVE)))
                .variant(ButtonVariant::Primary)
                .on_click(move || {
                    if let Some(dialog) = upgrade(&save_weak) {
                        dialog.spawn_save();
                    }
                })
                .into(),
            button(strings.resolve(&t!(keys::CANCEL)))
                .variant(ButtonVariant::Secondary)
                .on_click(move || {
                    if let Some(dialog) = upgrade(&cancel_weak) {
                        dialog.cancel();
                    }
                })
                .into(),
        ]);

        let close_weak = weak;
        sheet()
            .side(SheetSide::Right)
            .title(strings.resolve(&t!(keys::DIALOG_TITLE)))
            .show_close(true)
            .class(DIALOG_CLASS)
            .children(rows)
            .footer(footer)
            .on_close(move || {
                if let Some(dialog) = upgrade(&close_weak) {
                    dialog.dismissed();
                }
            })
            .build()
    }
}

fn upgrade(weak: &Weak<DialogInner>) -> Option<LanguageDialog> {
    weak.upgrade().map(|inner| LanguageDialog { inner })
}
