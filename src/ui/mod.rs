pub mod dialogs;
pub mod form_field;
pub(crate) mod panels;
pub mod steps;
mod terminal_guard;

pub use dialogs::{PriceDialog, PriceDialogAction, SuccessDialog, SuccessDialogResult};
pub use steps::{StepAction, StepView};
pub use terminal_guard::{install_panic_hook, TerminalGuard};
