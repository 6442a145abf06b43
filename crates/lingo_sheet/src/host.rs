//! Presentation host boundary
//!
//! Whatever actually draws sheets (a GPU window, a terminal, a test
//! recorder) implements [`PresentationHost`]. Calls arrive on the thread
//! that dispatches user input; hosts that render elsewhere must hand the
//! work over themselves.

use crate::sheet::SheetConfig;
use crate::toast::Toast;

pub trait PresentationHost: Send + Sync {
    /// Display a sheet, replacing the one currently shown.
    fn show_sheet(&self, config: SheetConfig);

    /// Remove the current sheet, if any. Does not fire its `on_close`.
    fn hide_sheet(&self);

    /// Tag the host surface with a styling namespace class.
    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    fn show_toast(&self, toast: Toast);

    /// Rebuild the environment after a persisted language change.
    fn reload(&self);
}
