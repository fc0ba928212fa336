mod common;

use og_serial::adapter::SpecialAdapter;
use og_serial::{
    Composite, Declared, Element, Fault, FormatType, Frame, Graph, Markup, MarkupNode, SerialError,
    Serializer, Value,
};

use common::*;

const ORDER: &str = concat!(
    r#"<order xmlns:x="urn:extra" id="7">"#,
    r#"<item sku="a&amp;b" x:gift="yes">two &lt; three</item>"#,
    "<!-- rush -->",
    "<note/>",
    "</order>",
);

#[derive(Debug, thiserror::Error)]
#[error("could not save order")]
struct SaveError(#[source] std::io::Error);

#[test]
fn markup_round_trips_byte_for_byte() {
    let markup: Markup = ORDER.parse().unwrap();
    assert_eq!(markup.to_string(), ORDER);

    let graph = Graph::new();
    let root = Value::from(markup.clone());

    for serializer in [json(), ron()] {
        let bytes = serializer.serialize(&graph, &root, Declared::Markup).unwrap();
        let decoded = serializer.deserialize(&bytes, Declared::Markup).unwrap();

        let back = decoded.root.as_markup().unwrap();
        assert_eq!(back, &markup);
        assert_eq!(back.to_string(), ORDER);
    }
}

#[test]
fn markup_in_a_field() {
    let doc = Markup::new(Element::new("memo").with_text("call back"));

    let mut graph = Graph::new();
    let person = graph.insert(
        Composite::new(&PERSON)
            .with("name", "bo")
            .with("extra", doc.clone()),
    );

    let serializer = json();
    let bytes = serializer
        .serialize(&graph, &person.into(), Declared::Exact(&PERSON))
        .unwrap();
    assert!(text(&bytes).contains(r#""extra":{"@adapter":"markup","@value":"<memo>call back</memo>"}"#));

    let decoded = serializer.deserialize(&bytes, Declared::Exact(&PERSON)).unwrap();
    let person = decoded.graph.composite(decoded.root.as_object().unwrap()).unwrap();
    assert_eq!(person.get("extra"), Some(&Value::Markup(doc)));
}

#[test]
fn fault_chain_keeps_depth_and_frames() {
    let io = std::io::Error::other("disk full");
    let fault = Fault::from_error(&SaveError(io))
        .with_frame(Frame::new("orders.rs", 40).with_symbol("save_order"))
        .with_frame(Frame::caller());
    assert_eq!(fault.depth(), 2);

    let graph = Graph::new();
    let root = Value::from(fault.clone());

    for serializer in [json(), ron()] {
        let bytes = serializer.serialize(&graph, &root, Declared::Any).unwrap();
        let decoded = serializer.deserialize(&bytes, Declared::Any).unwrap();

        let back = decoded.root.as_fault().unwrap();
        assert_eq!(back, &fault);
        assert_eq!(back.depth(), 2);

        let frames: Vec<_> = back.chain().map(|f| f.frames.len()).collect();
        assert_eq!(frames, [2, 0]);
        assert_eq!(back.frames[0].symbol.as_deref(), Some("save_order"));
        assert_eq!(back.cause.as_ref().unwrap().message.as_deref(), Some("disk full"));
    }
}

#[test]
fn deep_fault_chain() {
    let fault = (0..20).fold(Fault::bare("bottom"), |cause, i| {
        Fault::capture(format!("layer{i}"), "failed").caused_by(cause)
    });

    let serializer = json();
    let bytes = serializer
        .serialize(&Graph::new(), &Value::from(fault.clone()), Declared::Fault)
        .unwrap();
    let decoded = serializer.deserialize(&bytes, Declared::Fault).unwrap();

    let back = decoded.root.as_fault().unwrap();
    assert_eq!(back.depth(), 21);
    assert!(back.chain().take(20).all(|f| f.frames.len() == 1));
    assert_eq!(back, &fault);
}

// -----------------------------------------------------------------------------
// User adapters

/// Writes markup as its root element name only.
struct NameOnly;

impl SpecialAdapter for NameOnly {
    fn name(&self) -> &'static str {
        "name-only"
    }

    fn matches(&self, value: &Value) -> bool {
        value.as_markup().is_some()
    }

    fn payload<'a>(&self, value: &'a Value) -> Option<Box<dyn erased_serde::Serialize + 'a>> {
        let name = &value.as_markup()?.root().name;
        Some(Box::new(name))
    }

    fn decode(
        &self,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> Result<Value, erased_serde::Error> {
        let name: String = erased_serde::deserialize(deserializer)?;
        Ok(Value::Markup(Markup::new(Element::new(name))))
    }
}

#[test]
fn user_adapter_takes_precedence() {
    let graph = Graph::new();
    let root = Value::from(Markup::new(Element::new("memo").with_text("ignored")));

    let serializer = Serializer::builder(FormatType::Json)
        .registry(registry())
        .adapter(NameOnly)
        .build();
    let bytes = serializer.serialize(&graph, &root, Declared::Any).unwrap();
    assert_eq!(text(&bytes), r#"{"@adapter":"name-only","@value":"memo"}"#);

    let decoded = serializer.deserialize(&bytes, Declared::Any).unwrap();
    assert_eq!(decoded.root, Value::from(Markup::new(Element::new("memo"))));
}

#[test]
fn unknown_adapter_is_skipped() {
    let mut graph = Graph::new();
    let person = graph.insert(
        Composite::new(&PERSON)
            .with("name", "cy")
            .with("extra", Markup::new(Element::new("memo"))),
    );

    let writer = Serializer::builder(FormatType::Json).adapter(NameOnly).build();
    let bytes = writer
        .serialize(&graph, &person.into(), Declared::Exact(&PERSON))
        .unwrap();

    // The default serializer has no `name-only` adapter.
    let decoded = json().deserialize(&bytes, Declared::Exact(&PERSON)).unwrap();
    let person = decoded.graph.composite(decoded.root.as_object().unwrap()).unwrap();
    assert_eq!(person.get("name"), Some(&Value::from("cy")));
    assert!(person.get("extra").unwrap().is_null());

    let root = Value::from(Markup::new(Element::new("memo")));
    let bytes = writer.serialize(&Graph::new(), &root, Declared::Any).unwrap();
    let err = json().deserialize(&bytes, Declared::Any).unwrap_err();
    assert!(matches!(err, SerialError::UnsupportedRootType { .. }));
}

#[test]
fn invalid_markup_payload() {
    let bytes = br#"{"@adapter":"markup","@value":"<open>"}"#;
    let err = json().deserialize(bytes, Declared::Markup).unwrap_err();
    assert!(matches!(err, SerialError::Format { .. }));
}

#[test]
fn markup_whitespace_survives_every_format() {
    const SPACED: &str = "<a x=\"1&#10;2&#9;3\">line&#13;\nnext</a>";
    let markup: Markup = SPACED.parse().unwrap();
    assert_eq!(markup.root().attribute("x"), Some("1\n2\t3"));

    let graph = Graph::new();
    let root = Value::from(markup.clone());
    for serializer in [json(), ron()] {
        let bytes = serializer.serialize(&graph, &root, Declared::Markup).unwrap();
        let decoded = serializer.deserialize(&bytes, Declared::Markup).unwrap();
        let back = decoded.root.as_markup().unwrap();
        assert_eq!(back, &markup);
        assert_eq!(back.to_string(), SPACED);
    }
}

#[test]
fn unwritable_markup_is_malformed() {
    let mut comment = Markup::new(Element::new("a"));
    comment.root_mut().children.push(MarkupNode::Comment("x--y".into()));
    let name = Markup::new(Element::new("a b"));
    let unbound = Markup::new(Element::new("a").with_attribute("p:k", "v"));

    let graph = Graph::new();
    for markup in [comment, name, unbound] {
        for serializer in [json(), ron()] {
            let err = serializer
                .serialize(&graph, &Value::from(markup.clone()), Declared::Markup)
                .unwrap_err();
            assert!(matches!(err, SerialError::Malformed(_)), "{err}");
        }
    }
}
