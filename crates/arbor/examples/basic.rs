//! Example: parse a page, query it and rewrite part of it

use arbor::{Document, Position};

fn main() -> arbor::Result<()> {
    // Initialize logging, RUST_LOG=arbor=debug for parse details
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut doc = Document::parse(
        r#"<!DOCTYPE html>
<title>Inventory</title>
<ul id="stock">
  <li class="item" data-qty="3">apples</li>
  <li class="item" data-qty="0">pears</li>
</ul>"#,
    )?;

    println!("Arbor v{}: {:?}", arbor::VERSION, doc.title());

    for item in doc.query_selector_all("li.item[data-qty='0']")? {
        doc.insert_adjacent_html(Position::BeforeEnd, item, " <em>(sold out)</em>")?;
    }

    if let Some(list) = doc.get_element_by_id("stock") {
        println!("{}", doc.outer_html(list));
    }
    Ok(())
}
