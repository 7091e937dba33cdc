// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::{bail, Result};
use indexmap::IndexMap;
use typescore::facts::*;
use typescore::*;

// class Stack {
//   push(item) { ... }
//   pop() { ... }
// }
// function useStack(s, n) {
//   s.push(n * 2);
//   return s.pop();
// }
const ELEMENTS: &str = r#"[
    { "id": "Stack_name", "kind": "identifier", "value": "Stack" },
    { "id": "push_key", "kind": "identifier", "value": "push" },
    { "id": "item", "kind": "identifier", "value": "item" },
    { "id": "pop_key", "kind": "identifier", "value": "pop" },
    { "id": "f_name", "kind": "identifier", "value": "useStack" },
    { "id": "s", "kind": "identifier", "value": "s" },
    { "id": "n", "kind": "identifier", "value": "n" },
    { "id": "s_use1", "kind": "identifier", "value": "s", "bindingId": "s" },
    { "id": "push_prop", "kind": "identifier", "value": "push" },
    { "id": "n_use", "kind": "identifier", "value": "n", "bindingId": "n" },
    { "id": "two", "kind": "numeric", "value": "2" },
    { "id": "s_use2", "kind": "identifier", "value": "s", "bindingId": "s" },
    { "id": "pop_prop", "kind": "identifier", "value": "pop" }
]"#;

const RELATIONS: &str = r#"[
    { "id": "cls", "kind": "class_definition", "involved": ["Stack_name", "anonymous", "push", "pop"] },
    { "id": "push", "kind": "class_method", "involved": ["push_key", "item"] },
    { "id": "pop", "kind": "class_method", "involved": ["pop_key"] },
    { "id": "f", "kind": "function_definition", "involved": ["f_name", "s", "n"] },
    { "id": "acc_push", "kind": "property_accessor", "involved": ["s_use1", "push_prop"] },
    { "id": "mul", "kind": "multiplication", "involved": ["n_use", "two"] },
    { "id": "call_push", "kind": "call", "involved": ["acc_push", "mul"] },
    { "id": "acc_pop", "kind": "property_accessor", "involved": ["s_use2", "pop_prop"] },
    { "id": "call_pop", "kind": "call", "involved": ["acc_pop"] },
    { "id": "ret", "kind": "return", "involved": ["f", "call_pop"] }
]"#;

const DISCOVERED: &str = r#"[
    { "id": "Stack", "kind": "class", "properties": { "push": "push", "pop": "pop" } }
]"#;

fn load<T, F>(json: &str, key: F) -> Result<IndexMap<Id, T>>
where
    T: serde::de::DeserializeOwned,
    F: Fn(&T) -> Id,
{
    let items: Vec<T> = serde_json::from_str(json)?;
    Ok(items.into_iter().map(|item| (key(&item), item)).collect())
}

fn model() -> Result<TypeModel> {
    let elements = load(ELEMENTS, |e: &Element| e.id.clone())?;
    let relations = load(RELATIONS, |r: &Relation| r.id.clone())?;
    let discovered = load(DISCOVERED, |d: &DiscoveredObjectType| d.id.clone())?;
    Ok(InferenceTypeModelFactory::new().resolve_types(&elements, &relations, &discovered)?)
}

#[test]
fn parameter_matches_class_shape() -> Result<()> {
    let model = model()?;

    let TypeKey::Shape(shape) = model.get_highest_probability_type(false, "s")? else {
        bail!("expected `s` to be matched against a shape");
    };
    let stack = model.get_discovered_object_type(&shape)?;
    assert_eq!(stack.kind, DiscoveredObjectKind::Class);
    assert!(stack.has_property("push") && stack.has_property("pop"));

    let distribution = model.calculate_probabilities_for_element(false, "s")?;
    assert!((distribution.values().sum::<f64>() - 1.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn operands_and_definitions() -> Result<()> {
    let model = model()?;

    assert_eq!(
        model.get_highest_probability_type(false, "n")?,
        TypeKey::Primitive(TypeTag::Numeric)
    );
    assert_eq!(
        model.get_highest_probability_type(false, "f")?.to_string(),
        "f::FUNCTION"
    );
    assert_eq!(
        model.get_highest_probability_type(false, "cls")?.to_string(),
        "cls::FUNCTION"
    );
    assert_eq!(
        model.get_highest_probability_type(false, "acc_push")?.to_string(),
        "acc_push::FUNCTION"
    );

    for alias in ["s_use1", "s_use2", "n_use"] {
        assert!(!model.contains(alias), "{alias} should be folded into its binding");
    }
    Ok(())
}

#[test]
fn descriptions_reflect_usage() -> Result<()> {
    let model = model()?;

    let f = model.get_object_description("f")?;
    assert_eq!(f.parameters.get(&0), Some(&Id::from("s")));
    assert_eq!(f.parameters.get(&1), Some(&Id::from("n")));
    assert!(f.returns.contains("call_pop"));

    let s = model.get_object_description("s")?;
    let names: Vec<&str> = s.properties.keys().map(|k| &**k).collect();
    assert_eq!(names, ["pop", "push"]);

    let cls = model.get_object_description("cls")?;
    assert!(cls.properties.contains_key("push"));
    assert!(cls.properties.contains_key("pop"));

    let push = model.get_object_description("push")?;
    assert_eq!(push.parameters.get(&0), Some(&Id::from("item")));
    Ok(())
}

#[test]
fn filtered_draws_pick_owned_keys() -> Result<()> {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let model = model()?;
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let key = model.get_random_type(false, "s", Some(TypeTag::Object), &mut rng)?;
        assert_eq!(key.map(|k| k.to_string()).as_deref(), Some("s::OBJECT"));
    }
    Ok(())
}

#[test]
fn execution_feedback_sharpens_operands() -> Result<()> {
    let mut model = model()?;
    model.add_execution_score("n", TypeTag::Numeric, 5.0)?;
    model.add_execution_score("n", TypeTag::String, 1.0)?;

    let weighted = model.calculate_probabilities_for_element(true, "n")?;
    let numeric = weighted
        .get(&TypeKey::Primitive(TypeTag::Numeric))
        .copied()
        .unwrap_or(0.0);
    assert!((numeric - 1.0).abs() < 1e-9);
    Ok(())
}
