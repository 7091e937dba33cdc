// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::facts::{DiscoveredObjectKind, DiscoveredObjectType, Id};
use crate::type_model::*;

use anyhow::{bail, Result};
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn id(s: &str) -> Id {
    s.into()
}

fn builder_with(ids: &[&str]) -> TypeModelBuilder {
    let mut builder = TypeModelBuilder::new(IndexMap::new());
    for s in ids {
        builder.add_id(&id(s));
    }
    builder
}

fn total(distribution: &Distribution) -> f64 {
    distribution.values().sum()
}

fn probability(distribution: &Distribution, key: &TypeKey) -> f64 {
    distribution.get(key).copied().unwrap_or(0.0)
}

#[test]
fn add_id_seeds_uniform_prior_once() -> Result<()> {
    let mut builder = builder_with(&["a"]);
    builder.add_type_score("a", TypeTag::Numeric, 1.0)?;
    builder.add_id(&id("a"));

    let model = builder.build();
    let scores = model.type_scores("a")?;
    assert_eq!(scores.len(), TypeTag::PRIMITIVES.len());
    assert_eq!(scores[&TypeKey::Primitive(TypeTag::Numeric)], 1.1);
    for tag in &TypeTag::PRIMITIVES[1..] {
        assert_eq!(scores[&TypeKey::Primitive(*tag)], DEFAULT_PRIOR_WEIGHT);
    }
    Ok(())
}

#[test]
fn unregistered_ids_are_rejected() -> Result<()> {
    let mut builder = builder_with(&["a"]);
    let err = builder.add_type_score("b", TypeTag::String, 1.0).unwrap_err();
    assert_eq!(err, TypeModelError::UnregisteredId { id: id("b") });
    assert!(builder.add_relation_score("a", "b", 1.0).is_err());
    assert!(builder.add_execution_score("b", TypeTag::String, 1.0).is_err());

    let model = builder.build();
    assert!(!model.contains("b"));
    assert!(model.calculate_probabilities_for_element(false, "b").is_err());
    assert!(model.relation_score("a", "b").is_err());
    assert!(model.get_object_description("b").is_err());
    Ok(())
}

#[test]
fn relation_scores_are_symmetric() -> Result<()> {
    let mut builder = builder_with(&["a", "b", "c"]);
    builder.add_relation_score("a", "b", 2.5)?;
    builder.add_relation_score("b", "a", 1.0)?;
    builder.add_relation_score("c", "a", 1.0)?;

    let model = builder.build();
    for (x, y) in [("a", "b"), ("a", "c"), ("b", "c")] {
        assert_eq!(model.relation_score(x, y)?, model.relation_score(y, x)?);
    }
    assert_eq!(model.relation_score("a", "b")?, 3.5);
    assert_eq!(model.relation_score("b", "c")?, 0.0);
    Ok(())
}

#[test]
fn self_relations_fold_in_own_evidence() -> Result<()> {
    let mut builder = builder_with(&["a"]);
    builder.add_type_score("a", TypeTag::Numeric, 1.0)?;
    builder.add_relation_score("a", "a", 1.0)?;

    let model = builder.build();
    // Both directions land on the same edge.
    assert_eq!(model.relation_score("a", "a")?, 2.0);

    let distribution = model.calculate_probabilities_for_element(false, "a")?;
    assert!((total(&distribution) - 1.0).abs() < 1e-9);
    // The self edge contributes the normalized direct scores.
    let numeric = probability(&distribution, &TypeTag::Numeric.into());
    assert!((numeric - 1.1 / 1.6).abs() < 1e-9);
    Ok(())
}

#[test]
fn long_chains_do_not_exhaust_the_stack() -> Result<()> {
    let n = 20_000;
    let names: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
    let mut builder = TypeModelBuilder::new(IndexMap::new());
    for name in &names {
        builder.add_id(&id(name));
    }
    builder.add_type_score(&names[n - 1], TypeTag::Numeric, 5.0)?;
    for pair in names.windows(2) {
        builder.add_relation_score(&pair[0], &pair[1], 1.0)?;
    }

    let model = builder.build();
    for name in [&names[0], &names[n / 2], &names[n - 1]] {
        let distribution = model.calculate_probabilities_for_element(false, name)?;
        assert!((total(&distribution) - 1.0).abs() < 1e-4, "{name}");
    }
    assert_eq!(
        model.get_highest_probability_type(false, &names[n - 1])?,
        TypeKey::Primitive(TypeTag::Numeric)
    );
    Ok(())
}

#[test]
fn distributions_are_normalized() -> Result<()> {
    let mut builder = builder_with(&["a", "b", "c", "d"]);
    builder.add_type_score("a", TypeTag::Numeric, 3.0)?;
    builder.add_type_score("b", TypeTag::Object, 1.5)?;
    builder.add_type_score("c", TypeTag::Function, 0.25)?;
    builder.add_relation_score("a", "b", 1.0)?;
    builder.add_relation_score("b", "c", 4.0)?;
    builder.add_relation_score("a", "d", 0.5)?;

    let model = builder.build();
    for s in ["a", "b", "c", "d"] {
        let distribution = model.calculate_probabilities_for_element(false, s)?;
        assert!((total(&distribution) - 1.0).abs() < 1e-9, "{s}: {distribution:?}");
    }
    Ok(())
}

#[test]
fn related_evidence_flows_along_edges() -> Result<()> {
    let mut builder = builder_with(&["a", "b"]);
    builder.add_type_score("b", TypeTag::Array, 5.0)?;
    builder.add_relation_score("a", "b", 1.0)?;

    let model = builder.build();
    let distribution = model.calculate_probabilities_for_element(false, "a")?;
    let array = TypeKey::for_tag(&id("b"), TypeTag::Array);
    assert!(probability(&distribution, &array) > 0.0);
    assert!(
        probability(&distribution, &array)
            > probability(&distribution, &TypeTag::Numeric.into())
    );
    Ok(())
}

#[test]
fn cycles_terminate() -> Result<()> {
    let mut builder = builder_with(&["a", "b", "c"]);
    builder.add_type_score("a", TypeTag::Numeric, 1.0)?;
    builder.add_type_score("b", TypeTag::String, 1.0)?;
    builder.add_type_score("c", TypeTag::Boolean, 1.0)?;
    builder.add_relation_score("a", "b", 1.0)?;
    builder.add_relation_score("b", "c", 1.0)?;
    builder.add_relation_score("c", "a", 1.0)?;

    let model = builder.build();
    for s in ["a", "b", "c"] {
        let distribution = model.calculate_probabilities_for_element(false, s)?;
        assert!((total(&distribution) - 1.0).abs() < 1e-9);
        for tag in [TypeTag::Numeric, TypeTag::String, TypeTag::Boolean] {
            assert!(probability(&distribution, &tag.into()) > 0.1);
        }
    }
    Ok(())
}

#[test]
fn execution_scores_reweight_distribution() -> Result<()> {
    let mut builder = builder_with(&["a"]);
    builder.add_type_score("a", TypeTag::Numeric, 1.0)?;
    builder.add_type_score("a", TypeTag::String, 1.0)?;
    let mut model = builder.build();
    model.add_execution_score("a", TypeTag::Numeric, 3.0)?;
    model.add_execution_score("a", TypeTag::String, 1.0)?;

    let plain = model.calculate_probabilities_for_element(false, "a")?;
    assert_eq!(
        probability(&plain, &TypeTag::Numeric.into()),
        probability(&plain, &TypeTag::String.into())
    );

    let weighted = model.calculate_probabilities_for_element(true, "a")?;
    assert!((probability(&weighted, &TypeTag::Numeric.into()) - 1.0).abs() < 1e-9);
    assert_eq!(probability(&weighted, &TypeTag::String.into()), 0.0);
    assert_eq!(
        model.get_highest_probability_type(true, "a")?,
        TypeKey::Primitive(TypeTag::Numeric)
    );
    Ok(())
}

#[test]
fn single_execution_observation_changes_nothing() -> Result<()> {
    let mut builder = builder_with(&["a"]);
    builder.add_type_score("a", TypeTag::String, 2.0)?;
    builder.add_execution_score("a", TypeTag::Numeric, 4.0)?;

    let model = builder.build();
    assert_eq!(
        model.calculate_probabilities_for_element(true, "a")?,
        model.calculate_probabilities_for_element(false, "a")?
    );
    Ok(())
}

#[test]
fn execution_shift_zeroes_least_observed_tag() -> Result<()> {
    let mut builder = builder_with(&["a"]);
    builder.add_execution_score("a", TypeTag::String, 2.0)?;
    builder.add_execution_score("a", TypeTag::Numeric, 1.0)?;

    let model = builder.build();
    let weighted = model.calculate_probabilities_for_element(true, "a")?;
    assert_eq!(probability(&weighted, &TypeTag::Numeric.into()), 0.0);
    assert!((probability(&weighted, &TypeTag::String.into()) - 1.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn execution_scores_excluding_everything_are_ignored() -> Result<()> {
    let mut builder = builder_with(&["a"]);
    builder.add_type_score("a", TypeTag::Numeric, 1.0)?;
    builder.add_execution_score("a", TypeTag::Object, 2.0)?;
    builder.add_execution_score("a", TypeTag::Function, 1.0)?;

    let model = builder.build();
    assert_eq!(
        model.calculate_probabilities_for_element(true, "a")?,
        model.calculate_probabilities_for_element(false, "a")?
    );
    Ok(())
}

#[test]
fn random_type_respects_match_tag() -> Result<()> {
    let mut builder = builder_with(&["a", "o"]);
    builder.add_type_score("a", TypeTag::Numeric, 10.0)?;
    builder.add_type_score("o", TypeTag::Object, 1.0)?;
    builder.add_relation_score("a", "o", 0.5)?;

    let model = builder.build();
    let mut rng = StdRng::seed_from_u64(7);

    let mut numeric = 0;
    for _ in 0..1000 {
        match model.get_random_type(false, "a", None, &mut rng)? {
            Some(TypeKey::Primitive(TypeTag::Numeric)) => numeric += 1,
            Some(_) => (),
            None => bail!("unfiltered draw returned nothing"),
        }
    }
    assert!(numeric > 800, "numeric drawn {numeric} times");

    for _ in 0..100 {
        let key = model.get_random_type(false, "a", Some(TypeTag::Object), &mut rng)?;
        assert_eq!(key, Some(TypeKey::for_tag(&id("o"), TypeTag::Object)));
    }

    assert_eq!(
        model.get_random_type(false, "a", Some(TypeTag::Function), &mut rng)?,
        None
    );
    Ok(())
}

#[test]
fn highest_probability_breaks_ties_by_first_seen() -> Result<()> {
    let mut builder = builder_with(&["a", "b"]);
    builder.add_type_score("b", TypeTag::Undefined, 1.0)?;
    builder.add_type_score("b", TypeTag::String, 1.0)?;

    let model = builder.build();
    assert_eq!(
        model.get_highest_probability_type(false, "a")?,
        TypeKey::Primitive(TypeTag::Numeric)
    );
    assert_eq!(
        model.get_highest_probability_type(false, "b")?,
        TypeKey::Primitive(TypeTag::String)
    );
    Ok(())
}

#[test]
fn shape_scores_require_a_discovered_type() -> Result<()> {
    let mut discovered = IndexMap::new();
    discovered.insert(
        id("Obj1"),
        DiscoveredObjectType::new("Obj1", DiscoveredObjectKind::Object).with_property("foo", "m"),
    );
    let mut builder = TypeModelBuilder::new(discovered);
    builder.add_id(&id("a"));
    builder.add_shape_score("a", "Obj1", 2.0)?;
    let err = builder.add_shape_score("a", "Obj2", 1.0).unwrap_err();
    assert_eq!(err, TypeModelError::MissingDiscoveredType { id: id("Obj2") });

    let model = builder.build();
    assert_eq!(
        model.get_highest_probability_type(false, "a")?,
        TypeKey::Shape(id("Obj1"))
    );
    assert!(model.get_discovered_object_type("Obj1")?.has_property("foo"));
    assert!(matches!(
        model.get_discovered_object_type("Obj2"),
        Err(TypeModelError::MissingDiscoveredType { .. })
    ));
    Ok(())
}

#[test]
fn descriptions_record_usage() -> Result<()> {
    let mut builder = builder_with(&["f", "s", "p", "r", "m"]);
    builder.add_parameter("f", 0, "p")?;
    builder.add_return("f", "r")?;
    builder.add_property("s", "toUpperCase", "m")?;

    let model = builder.build();
    let f = model.get_object_description("f")?;
    assert_eq!(f.parameters.get(&0), Some(&id("p")));
    assert!(f.returns.contains("r"));
    assert_eq!(
        model.type_scores("f")?[&TypeKey::for_tag(&id("f"), TypeTag::Function)],
        2.0
    );

    let s = model.type_scores("s")?;
    assert_eq!(s[&TypeKey::for_tag(&id("s"), TypeTag::Object)], 1.0);
    assert_eq!(s[&TypeKey::Primitive(TypeTag::String)], 1.1);
    assert!(model.get_object_description("m")?.is_empty());
    Ok(())
}

#[test]
fn builtin_hints_can_be_disabled() -> Result<()> {
    let mut builder = TypeModelBuilder::new(IndexMap::new()).with_builtin_property_hints(false);
    builder.add_id(&id("s"));
    builder.add_id(&id("m"));
    builder.add_property("s", "length", "m")?;

    let model = builder.build();
    let s = model.type_scores("s")?;
    assert_eq!(s[&TypeKey::Primitive(TypeTag::String)], DEFAULT_PRIOR_WEIGHT);
    assert!(!s.contains_key(&TypeKey::for_tag(&id("s"), TypeTag::Array)));
    assert!(model.get_object_description("s")?.properties.contains_key("length"));
    Ok(())
}

#[test]
fn zero_prior_without_evidence_is_an_invariant_violation() -> Result<()> {
    let mut builder = TypeModelBuilder::new(IndexMap::new()).with_prior_weight(0.0);
    builder.add_id(&id("a"));

    let model = builder.build();
    assert!(matches!(
        model.calculate_probabilities_for_element(false, "a"),
        Err(TypeModelError::ProbabilityInvariant { .. })
    ));
    Ok(())
}

#[test]
fn type_keys_display_with_owner() {
    assert_eq!(TypeKey::Primitive(TypeTag::Regex).to_string(), "regex");
    assert_eq!(
        TypeKey::for_tag(&id("o"), TypeTag::Object).to_string(),
        "o::OBJECT"
    );
    assert_eq!(TypeKey::Shape(id("Obj1")).to_string(), "Obj1");
    assert!(TypeKey::for_tag(&id("f"), TypeTag::Function).matches(TypeTag::Function));
    assert!(!TypeKey::Shape(id("Obj1")).matches(TypeTag::Object));
}
