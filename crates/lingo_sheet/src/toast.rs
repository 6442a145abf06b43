//! Toast notifications
//!
//! Short-lived messages shown by the host in a corner of the screen.
//!
//! ```ignore
//! toast("Language not saved")
//!     .variant(ToastVariant::Destructive)
//!     .description("Please try again later.")
//!     .show(&host);
//! ```

use crate::host::PresentationHost;

/// Toast visual variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Default,
    /// Destructive/error toast - red accent
    Destructive,
}

/// A toast ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
    pub duration_ms: u32,
}

/// Builder for creating and showing toast notifications
#[derive(Clone, Debug)]
pub struct ToastBuilder {
    toast: Toast,
}

impl ToastBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            toast: Toast {
                title: title.into(),
                description: None,
                variant: ToastVariant::Default,
                duration_ms: 5000, // 5 seconds default
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.toast.description = Some(description.into());
        self
    }

    pub fn variant(mut self, variant: ToastVariant) -> Self {
        self.toast.variant = variant;
        self
    }

    pub fn build(self) -> Toast {
        self.toast
    }

    pub fn show(self, host: &dyn PresentationHost) {
        host.show_toast(self.toast);
    }
}

/// Create a toast builder with a title
pub fn toast(title: impl Into<String>) -> ToastBuilder {
    ToastBuilder::new(title)
}
