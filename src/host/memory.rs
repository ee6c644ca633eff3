use crate::form::FormField;
use crate::panel::Page;
use crate::ui::Button;
use crate::view::Node;

/// A page kept entirely in memory. Prompts are answered with
/// `confirm_answer` and recorded in `prompts`.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    pub count: Option<u64>,
    pub search_input: String,
    pub search_results: Option<Node>,
    pub entities_list: Option<Node>,
    pub form: Vec<FormField>,
    pub submit: Button,
    pub focused: Vec<String>,
    pub prompts: Vec<String>,
    pub confirm_answer: bool,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self {
            count: None,
            search_input: String::new(),
            search_results: None,
            entities_list: None,
            form: Vec::new(),
            submit: Button::new("Submit"),
            focused: Vec::new(),
            prompts: Vec::new(),
            confirm_answer: true,
        }
    }
}

impl MemoryPage {
    /// Sets (or appends) a form control value.
    pub fn fill(&mut self, name: &str, value: &str) {
        match self.form.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value = value.to_string(),
            None => self.form.push(FormField::new(name, value)),
        }
    }
}

impl Page for MemoryPage {
    fn set_count(&mut self, count: u64) {
        self.count = Some(count);
    }

    fn search_term(&self) -> String {
        self.search_input.clone()
    }

    fn set_search_term(&mut self, value: &str) {
        self.search_input = value.to_string();
    }

    fn render_search_results(&mut self, fragment: Option<Node>) {
        self.search_results = fragment;
    }

    fn render_entities_list(&mut self, fragment: Node) {
        self.entities_list = Some(fragment);
    }

    fn form_fields(&self) -> Vec<FormField> {
        self.form.clone()
    }

    fn reset_form(&mut self) {
        for field in &mut self.form {
            field.value.clear();
        }
    }

    fn focus_field(&mut self, name: &str) {
        self.focused.push(name.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.confirm_answer
    }

    fn submit_button(&mut self) -> Option<&mut Button> {
        Some(&mut self.submit)
    }
}
