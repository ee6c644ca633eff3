use dirdesk_schema::EntityRecord;

use super::{Element, Node, entity_card};
use crate::panel::EntityContext;

/// Content of the search results area.
pub fn search_results(ctx: &EntityContext, entities: &[EntityRecord]) -> Node {
    if entities.is_empty() {
        return no_results(format!(
            "No {} found matching your search.",
            ctx.token()
        ));
    }
    results_block("Search Results:".to_string(), entities, false)
}

/// Content of the full-list area; cards carry their creator.
pub fn entities_list(ctx: &EntityContext, entities: &[EntityRecord]) -> Node {
    if entities.is_empty() {
        return no_results(format!("No {} found.", ctx.token()));
    }
    results_block(format!("All {}:", ctx.plural_name()), entities, true)
}

fn no_results(message: String) -> Node {
    Element::new("p").class("no-results").text(message).into()
}

fn results_block(heading: String, entities: &[EntityRecord], show_created_by: bool) -> Node {
    let grid = entities
        .iter()
        .map(|entity| entity_card(entity, show_created_by))
        .fold(Element::new("div").class("results-grid"), |grid, card| {
            grid.child(card)
        });

    Element::new("div")
        .child(Element::new("h4").text(heading))
        .child(grid)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Action;
    use serde_json::json;

    fn ctx() -> EntityContext {
        EntityContext::new("vendors", "Vendor").unwrap()
    }

    #[test]
    fn empty_search_shows_no_results_message() {
        let node = search_results(&ctx(), &[]);
        assert_eq!(
            node.to_html(),
            "<p class=\"no-results\">No vendors found matching your search.</p>"
        );
    }

    #[test]
    fn empty_list_shows_none_found() {
        let node = entities_list(&ctx(), &[]);
        assert_eq!(node.text_content(), "No vendors found.");
    }

    #[test]
    fn list_renders_heading_and_one_card_per_entity() {
        let entities: Vec<EntityRecord> = serde_json::from_value(json!([
            {"_id": "a", "name": "A", "email": "a@x.test", "created_by": "root"},
            {"_id": "b", "name": "B", "email": "b@x.test"}
        ]))
        .unwrap();

        let node = entities_list(&ctx(), &entities);
        let text = node.text_content();
        assert!(text.starts_with("All Vendors:"));
        assert!(text.contains("By: root"));
        assert_eq!(
            node.actions(),
            vec![
                &Action::Delete("a".to_string()),
                &Action::Delete("b".to_string())
            ]
        );

        let search = search_results(&ctx(), &entities);
        assert!(search.text_content().starts_with("Search Results:"));
        assert!(!search.text_content().contains("By: root"));
    }
}
