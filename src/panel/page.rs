use crate::form::FormField;
use crate::ui::Button;
use crate::view::Node;

/// Element identifiers the host page must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    CountDisplay,
    SearchInput,
    SearchResults,
    AddForm,
    EntitiesList,
}

impl ElementId {
    pub const ALL: [ElementId; 5] = [
        ElementId::CountDisplay,
        ElementId::SearchInput,
        ElementId::SearchResults,
        ElementId::AddForm,
        ElementId::EntitiesList,
    ];

    /// DOM id used by the directory templates.
    pub fn dom_id(self) -> &'static str {
        match self {
            ElementId::CountDisplay => "entity-count",
            ElementId::SearchInput => "searchInput",
            ElementId::SearchResults => "searchResults",
            ElementId::AddForm => "addEntityForm",
            ElementId::EntitiesList => "entitiesList",
        }
    }
}

/// The surface a panel renders into.
///
/// A browser binding maps these onto DOM elements; the terminal host and the
/// tests keep them in memory.
pub trait Page {
    fn set_count(&mut self, count: u64);

    /// Raw (untrimmed) value of the search input.
    fn search_term(&self) -> String;

    fn set_search_term(&mut self, value: &str);

    /// `None` empties the results area.
    fn render_search_results(&mut self, fragment: Option<Node>);

    fn render_entities_list(&mut self, fragment: Node);

    /// Named controls of the add form, in document order.
    fn form_fields(&self) -> Vec<FormField>;

    fn reset_form(&mut self);

    fn focus_field(&mut self, name: &str);

    /// Blocking yes/no prompt.
    fn confirm(&mut self, message: &str) -> bool;

    fn submit_button(&mut self) -> Option<&mut Button> {
        None
    }
}
