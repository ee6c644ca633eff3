use super::page::ElementId;
use crate::view::Action;

/// DOM-level event kinds a host listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Submit,
    KeyPress,
    Click,
}

/// One listener the host must register for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub target: ElementId,
    pub kind: EventKind,
}

/// Listeners installed on page load: form submit and search-on-Enter.
/// Card and alert buttons are found through the actions on rendered nodes.
pub const BINDINGS: [Binding; 2] = [
    Binding {
        target: ElementId::AddForm,
        kind: EventKind::Submit,
    },
    Binding {
        target: ElementId::SearchInput,
        kind: EventKind::KeyPress,
    },
];

/// Everything a host can feed into [`super::EntityPanel::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Loaded,
    SubmitAddForm,
    /// A key pressed in the search input, by its `key` name.
    SearchKeyPress(String),
    SearchClicked,
    ClearSearch,
    LoadAll,
    Click(Action),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn dom_ids_are_distinct() {
        let ids: HashSet<_> = ElementId::ALL.iter().map(|id| id.dom_id()).collect();
        assert_eq!(ids.len(), ElementId::ALL.len());
    }

    #[test]
    fn load_binds_form_submit_and_search_keys() {
        let bound: Vec<_> = BINDINGS.iter().map(|b| (b.target.dom_id(), b.kind)).collect();
        assert_eq!(
            bound,
            vec![
                ("addEntityForm", EventKind::Submit),
                ("searchInput", EventKind::KeyPress),
            ]
        );
    }
}
