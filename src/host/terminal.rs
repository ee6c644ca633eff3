use std::io::{self, BufRead, Write};

use super::MemoryPage;
use crate::form::FormField;
use crate::panel::Page;
use crate::ui::{AlertId, AlertStack, Button};
use crate::view::Node;

/// Page host for a terminal: fragments are printed as HTML on stdout,
/// prompts are answered on stdin.
#[derive(Debug, Default)]
pub struct TerminalPage {
    state: MemoryPage,
    last_alert: AlertId,
}

impl TerminalPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the add form with the fields typed on the command line.
    pub fn set_form(&mut self, fields: Vec<FormField>) {
        self.state.form = fields;
    }

    pub fn count(&self) -> Option<u64> {
        self.state.count
    }

    /// Prints banners raised since the last call, oldest first, to stderr.
    pub fn flush_alerts(&mut self, alerts: &AlertStack) {
        let mut fresh: Vec<_> = alerts
            .banners()
            .into_iter()
            .filter(|b| b.id > self.last_alert)
            .collect();
        fresh.reverse();
        for banner in fresh {
            eprintln!("[{}] {}", banner.severity, banner.message);
            self.last_alert = banner.id;
        }
    }
}

impl Page for TerminalPage {
    fn set_count(&mut self, count: u64) {
        self.state.set_count(count);
        println!("count: {count}");
    }

    fn search_term(&self) -> String {
        self.state.search_term()
    }

    fn set_search_term(&mut self, value: &str) {
        self.state.set_search_term(value);
    }

    fn render_search_results(&mut self, fragment: Option<Node>) {
        if let Some(node) = &fragment {
            println!("{node}");
        }
        self.state.render_search_results(fragment);
    }

    fn render_entities_list(&mut self, fragment: Node) {
        println!("{fragment}");
        self.state.render_entities_list(fragment);
    }

    fn form_fields(&self) -> Vec<FormField> {
        self.state.form_fields()
    }

    fn reset_form(&mut self) {
        self.state.form.clear();
    }

    fn focus_field(&mut self, name: &str) {
        eprintln!("-> {name}");
        self.state.focus_field(name);
    }

    fn confirm(&mut self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        io::stderr().flush().ok();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn submit_button(&mut self) -> Option<&mut Button> {
        self.state.submit_button()
    }
}
