use dirdesk_schema::{EntityRecord, display_value};

use super::{Action, Element, Node};
use crate::ui::format::{format_currency, format_date_str, numeric_value};

/// Optional plain lines of a card, in display order, with their icon.
const DETAIL_LINES: [(&str, &str); 6] = [
    (EntityRecord::COMPANY, "building"),
    (EntityRecord::ORGANIZATION, "university"),
    (EntityRecord::PHONE, "phone"),
    (EntityRecord::PARTNERSHIP_TYPE, "handshake"),
    (EntityRecord::SERVICE_TYPE, "cogs"),
    (EntityRecord::PARTICIPANT_TYPE, "user-tag"),
];

const MONEY_LINES: [(&str, &str); 2] = [
    (EntityRecord::COST_ESTIMATE, "Cost: "),
    (EntityRecord::REGISTRATION_FEE, "Fee: "),
];

/// Builds the display card for one record.
///
/// Name, email and the creation line are always present; every other line
/// appears only when its field holds a truthy value. Type-specific fields are
/// not mutually exclusive here: whatever the payload carries is shown.
pub fn entity_card(entity: &EntityRecord, show_created_by: bool) -> Node {
    let field = |name: &str| entity.get(name).map(display_value).unwrap_or_default();

    let mut card = Element::new("div")
        .class("result-card")
        .child(Element::new("h5").text(field(EntityRecord::NAME)))
        .child(line("envelope", field(EntityRecord::EMAIL)));

    for (name, icon) in DETAIL_LINES {
        if let Some(text) = entity.text(name) {
            card = card.child(line(icon, text));
        }
    }

    for (name, prefix) in MONEY_LINES {
        if let Some(value) = entity.present(name) {
            let amount = numeric_value(value)
                .map(|amount| format_currency(Some(amount)))
                .filter(|formatted| !formatted.is_empty())
                .unwrap_or_else(|| format!("${}", display_value(value)));
            card = card.child(line("dollar-sign", format!("{prefix}{amount}")));
        }
    }

    let added = entity
        .get(EntityRecord::CREATED_AT)
        .map(|raw| {
            let text = display_value(raw);
            format_date_str(&text).unwrap_or(text)
        })
        .unwrap_or_default();
    card = card.child(line("calendar", format!("Added: {added}")));

    if show_created_by && let Some(by) = entity.text(EntityRecord::CREATED_BY) {
        card = card.child(line("user", format!("By: {by}")));
    }

    card.child(delete_button(entity.id())).into()
}

fn line(icon: &str, text: String) -> Element {
    Element::new("p").child(Node::icon(icon)).text(format!(" {text}"))
}

fn delete_button(id: Option<String>) -> Element {
    let button = Element::new("button")
        .class("btn")
        .class("btn-danger")
        .class("btn-sm");
    let button = match id {
        Some(id) => button.on_click(Action::Delete(id)),
        None => button.attr("disabled", "disabled"),
    };
    button.child(Node::icon("trash")).text(" Delete")
}
