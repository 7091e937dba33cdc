// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use indexmap::IndexMap;
use log::debug;

use super::bindings::BindingTable;
use super::options::InferenceOptions;
use super::ordering::resolution_order;
use super::rules::RelationResolver;
use super::structural::{match_shapes, PropertyIndex};
use crate::facts::{is_anonymous, DiscoveredObjectType, Element, ElementKind, Id, Relation};
use crate::type_model::{Result, TypeModel, TypeModelBuilder, TypeModelError, TypeTag};

/// Builds a [`TypeModel`] from the syntactic facts of one analysed unit.
#[derive(Clone, Debug, Default)]
pub struct InferenceTypeModelFactory {
    options: InferenceOptions,
}

/// Tag implied by a literal. Identifiers carry none.
fn literal_tag(kind: ElementKind) -> Option<TypeTag> {
    Some(match kind {
        ElementKind::String | ElementKind::Template => TypeTag::String,
        ElementKind::Numeric | ElementKind::BigInt | ElementKind::Decimal => TypeTag::Numeric,
        ElementKind::Null => TypeTag::Null,
        ElementKind::Boolean => TypeTag::Boolean,
        ElementKind::RegExp => TypeTag::Regex,
        ElementKind::Undefined => TypeTag::Undefined,
        ElementKind::Identifier => return None,
    })
}

impl InferenceTypeModelFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: InferenceOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &InferenceOptions {
        &self.options
    }

    /// Run the inference pipeline over the given facts.
    ///
    /// Maps are consumed in iteration order, which should be the order the
    /// facts were encountered in the source. Fails on the first malformed
    /// relation, binding conflict, or dangling reference; no partial model
    /// is returned.
    pub fn resolve_types(
        &self,
        elements: &IndexMap<Id, Element>,
        relations: &IndexMap<Id, Relation>,
        discovered_types: &IndexMap<Id, DiscoveredObjectType>,
    ) -> Result<TypeModel> {
        let mut builder = TypeModelBuilder::new(discovered_types.clone())
            .with_prior_weight(self.options.prior_weight)
            .with_tolerance(self.options.probability_tolerance)
            .with_builtin_property_hints(self.options.builtin_property_hints);

        let index = PropertyIndex::new(discovered_types);
        debug!(
            "indexed {} property names of {} discovered types",
            index.len(),
            discovered_types.len()
        );

        let literals = Self::seed_literals(&mut builder, elements)?;
        debug!("seeded {literals} literals");

        let bindings = Self::bind_identifiers(&mut builder, elements)?;
        debug!("bound {} identifiers", bindings.len());

        Self::seed_relations(&mut builder, &bindings, elements, relations)?;
        debug!("seeded {} relations", relations.len());

        if self.options.structural_matching {
            let matched = match_shapes(&mut builder, &index, &bindings, elements, relations)?;
            debug!("matched {matched} object shapes");
        }

        let mut resolver = RelationResolver::new(&mut builder, &bindings, elements, relations);
        for relation in resolution_order(relations) {
            resolver.resolve(relation)?;
        }
        debug!("resolved {} relations", relations.len());

        Ok(builder.build())
    }

    fn seed_literals(
        builder: &mut TypeModelBuilder,
        elements: &IndexMap<Id, Element>,
    ) -> Result<usize> {
        let mut count = 0;
        for element in elements.values() {
            let Some(tag) = literal_tag(element.kind) else {
                continue;
            };
            builder.add_id(&element.id);
            builder.add_type_score(&element.id, tag, 1.0)?;
            count += 1;
        }
        Ok(count)
    }

    /// Identifier uses are never scored themselves. Only the root of each
    /// binding chain is registered.
    fn bind_identifiers(
        builder: &mut TypeModelBuilder,
        elements: &IndexMap<Id, Element>,
    ) -> Result<BindingTable> {
        let mut bindings = BindingTable::new();
        for element in elements.values() {
            if let Some(target) = element.binding() {
                bindings.bind(&element.id, target)?;
            }
        }

        for element in elements.values().filter(|element| element.is_identifier()) {
            builder.add_id(bindings.resolve(&element.id));
        }
        Ok(bindings)
    }

    fn seed_relations(
        builder: &mut TypeModelBuilder,
        bindings: &BindingTable,
        elements: &IndexMap<Id, Element>,
        relations: &IndexMap<Id, Relation>,
    ) -> Result<()> {
        for relation in relations.values() {
            if !relation.is_well_formed() {
                return Err(TypeModelError::MalformedRelation {
                    id: relation.id.clone(),
                    kind: relation.kind,
                    expected: relation.kind.arity(),
                    found: relation.involved.len(),
                });
            }

            builder.add_id(&relation.id);
            for id in relation.involved.iter().filter(|id| !is_anonymous(id)) {
                if !elements.contains_key(id) && !relations.contains_key(id) {
                    return Err(TypeModelError::UnknownInvolvedId {
                        relation: relation.id.clone(),
                        id: id.clone(),
                    });
                }
                builder.add_id(bindings.resolve(id));
            }
        }
        Ok(())
    }
}
