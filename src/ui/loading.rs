use crate::view::{Element, Node};

const FALLBACK_LABEL: &str = "Submit";

/// A clickable control whose label can be swapped for a spinner.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: Node,
    pub disabled: bool,
    /// Label restored after loading; the host stores it up front.
    pub original_label: Option<Node>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        let label = Node::text(label);
        Self {
            original_label: Some(label.clone()),
            label,
            disabled: false,
        }
    }
}

fn spinner_label() -> Node {
    Element::new("span")
        .child(
            Element::new("i")
                .class("fas")
                .class("fa-spinner")
                .class("fa-spin"),
        )
        .text(" Loading...")
        .into()
}

pub fn set_loading(button: &mut Button, is_loading: bool) {
    if is_loading {
        button.disabled = true;
        button.label = spinner_label();
    } else {
        button.disabled = false;
        button.label = button
            .original_label
            .clone()
            .unwrap_or_else(|| Node::text(FALLBACK_LABEL));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_disables_and_restores_original_label() {
        let mut button = Button::new("Add Vendor");

        set_loading(&mut button, true);
        assert!(button.disabled);
        assert_eq!(button.label.text_content(), "Loading...");
        assert!(button.label.to_html().contains("fa-spinner"));

        set_loading(&mut button, false);
        assert!(!button.disabled);
        assert_eq!(button.label.text_content(), "Add Vendor");
    }

    #[test]
    fn restores_fallback_without_stored_label() {
        let mut button = Button {
            label: Node::text("Go"),
            disabled: false,
            original_label: None,
        };

        set_loading(&mut button, true);
        set_loading(&mut button, false);
        assert_eq!(button.label, Node::text("Submit"));
    }
}
