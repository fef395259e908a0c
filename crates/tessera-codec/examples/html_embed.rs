use tessera_codec::{html_encode, Element, Node, Object};

fn main() {
    let payload: Node = Object::new()
        .with_field("title", "Fish & Chips <special>")
        .with_field(
            "menu",
            Element::new("menu")
                .with_attribute("lang", "en")
                .with_child(Element::new("item").with_text("cod"))
                .with_child(Element::new("item").with_text("haddock")),
        )
        .into();

    match html_encode(&payload) {
        Ok(json) => {
            println!("<script>var data = {};</script>", json);
        }
        Err(err) => {
            eprintln!("encoding failed: {} (code {})", err, err.code());
            std::process::exit(1);
        }
    }
}
