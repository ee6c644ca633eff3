//! Structured view fragments.
//!
//! Hosts receive a [`Node`] tree instead of markup strings. Text is escaped
//! when rendered, and click handlers are carried as typed [`Action`]s rather
//! than inline script, so a host binds them explicitly.

mod card;
mod fragments;

pub use card::entity_card;
pub use fragments::{entities_list, search_results};

use crate::ui::AlertId;
use std::fmt::{self, Write as _};

/// A click target carried by an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Delete the entity with this identifier.
    Delete(String),
    /// Close the alert banner with this id.
    CloseAlert(AlertId),
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Delete(_) => "delete",
            Action::CloseAlert(_) => "close-alert",
        }
    }

    fn target(&self) -> String {
        match self {
            Action::Delete(id) => id.clone(),
            Action::CloseAlert(id) => id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
    action: Option<Action>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
            action: None,
        }
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    #[must_use]
    pub fn on_click(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// `<i class="fas fa-{name}"></i>`
    pub fn icon(name: &str) -> Self {
        Element::new("i").class("fas").class(format!("fa-{name}")).into()
    }

    /// Concatenated text of the subtree, one space between sibling elements.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                out.push(' ');
                el.children.iter().for_each(|c| c.collect_text(out));
                out.push(' ');
            }
        }
    }

    /// Every action bound inside this subtree, in document order.
    pub fn actions(&self) -> Vec<&Action> {
        let mut found = Vec::new();
        self.collect_actions(&mut found);
        found
    }

    fn collect_actions<'a>(&'a self, out: &mut Vec<&'a Action>) {
        if let Node::Element(el) = self {
            out.extend(el.action.as_ref());
            for child in &el.children {
                child.collect_actions(out);
            }
        }
    }

    /// Visits every element in document order.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        if let Node::Element(el) = self {
            visit(el);
            for child in &el.children {
                child.walk(visit);
            }
        }
    }

    /// Text lines of every `<p>` in the subtree.
    pub fn paragraphs(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.walk(&mut |el: &Element| {
            if el.tag == "p" {
                lines.push(Node::Element(el.clone()).text_content());
            }
        });
        lines
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) => write_escaped(f, text),
            Node::Element(el) => {
                write!(f, "<{}", el.tag)?;
                if !el.classes.is_empty() {
                    f.write_str(" class=\"")?;
                    write_escaped(f, &el.classes.join(" "))?;
                    f.write_char('"')?;
                }
                for (name, value) in &el.attrs {
                    write!(f, " {name}=\"")?;
                    write_escaped(f, value)?;
                    f.write_char('"')?;
                }
                if let Some(action) = &el.action {
                    write!(f, " data-action=\"{}\" data-target=\"", action.name())?;
                    write_escaped(f, &action.target())?;
                    f.write_char('"')?;
                }
                f.write_char('>')?;
                for child in &el.children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{}>", el.tag)
            }
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' => f.write_str("&quot;")?,
            '\'' => f.write_str("&#39;")?,
            other => f.write_char(other)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_escaped_markup() {
        let node: Node = Element::new("p")
            .class("note")
            .attr("title", "a \"quoted\" title")
            .child(Node::icon("user"))
            .text(" <script>alert(1)</script>")
            .into();

        assert_eq!(
            node.to_html(),
            "<p class=\"note\" title=\"a &quot;quoted&quot; title\"><i class=\"fas fa-user\"></i> &lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn actions_render_as_data_attributes() {
        let node: Node = Element::new("button")
            .on_click(Action::Delete("x'1".to_string()))
            .text("Delete")
            .into();

        assert_eq!(
            node.to_html(),
            "<button data-action=\"delete\" data-target=\"x&#39;1\">Delete</button>"
        );
        assert_eq!(node.actions(), vec![&Action::Delete("x'1".to_string())]);
    }

    #[test]
    fn text_content_collapses_whitespace() {
        let node: Node = Element::new("div")
            .child(Element::new("h5").text("Acme"))
            .child(Element::new("p").child(Node::icon("phone")).text(" 555"))
            .into();

        assert_eq!(node.text_content(), "Acme 555");
        assert_eq!(node.paragraphs(), vec!["555".to_string()]);
    }

    #[test]
    fn builder_exposes_structure_for_hosts() {
        let node: Node = Element::new("div")
            .class("result-card")
            .child(Element::new("h5").text("Acme"))
            .child(Element::new("button").on_click(Action::CloseAlert(3)))
            .into();

        let mut seen = Vec::new();
        node.walk(&mut |el: &Element| {
            seen.push((el.tag(), el.classes().to_vec(), el.children().len()));
        });
        assert_eq!(
            seen,
            vec![
                ("div", vec!["result-card".to_string()], 2),
                ("h5", Vec::new(), 1),
                ("button", Vec::new(), 0),
            ]
        );

        let Node::Element(root) = &node else {
            panic!("expected an element");
        };
        assert_eq!(root.children()[0], Node::Element(Element::new("h5").text("Acme")));
    }
}
