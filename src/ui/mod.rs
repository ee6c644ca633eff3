//! Page-wide helpers shared by every panel: alerts, formatting, validation
//! and the loading toggle.

mod alert;
pub mod format;
mod loading;
mod validate;

pub use alert::{AlertBanner, AlertId, AlertStack, AlertTiming, Severity};
pub use format::{format_currency, format_date, format_date_str};
pub use loading::{Button, set_loading};
pub use validate::{validate_email, validate_required};
