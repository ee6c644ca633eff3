use regex::Regex;
use std::sync::LazyLock;

use super::{AlertStack, Severity};
use crate::form::FormField;

/// Shape check only: something, an `@`, something, a dot, something.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Checks fields in order and stops at the first blank one: raises an error
/// alert naming it, hands it to `focus` and returns `false`.
pub fn validate_required<'a, I, F>(fields: I, alerts: &AlertStack, mut focus: F) -> bool
where
    I: IntoIterator<Item = &'a FormField>,
    F: FnMut(&FormField),
{
    match fields.into_iter().find(|field| field.is_blank()) {
        Some(field) => {
            alerts.show(format!("{} is required", field.name), Severity::Error);
            focus(field);
            false
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(validate_email("someone@example.org"));
        assert!(validate_email("a.b+c@sub.domain.io"));
        assert!(!validate_email("no-at-sign.org"));
        assert!(!validate_email("two@@example.org"));
        assert!(!validate_email("space in@example.org"));
        assert!(!validate_email("nodot@example"));
    }

    #[test]
    fn first_blank_field_is_reported_and_focused() {
        let alerts = AlertStack::default();
        let fields = [
            FormField::new("name", "Acme"),
            FormField::new("email", "   "),
            FormField::new("phone", ""),
        ];
        let mut focused = Vec::new();

        let ok = validate_required(&fields, &alerts, |f| focused.push(f.name.clone()));

        assert!(!ok);
        assert_eq!(focused, vec!["email".to_string()]);
        assert_eq!(
            alerts.messages(),
            vec![(Severity::Error, "email is required".to_string())]
        );
    }

    #[test]
    fn all_filled_passes_silently() {
        let alerts = AlertStack::default();
        let fields = [FormField::new("name", "Acme")];

        assert!(validate_required(&fields, &alerts, |_| panic!("nothing to focus")));
        assert!(alerts.is_empty());
    }
}
