//! Descriptor-driven traversal
//!
//! `children()` for every composite type is this one walk over the field
//! table. It allocates a fresh `Vec` per call, so callers can restart the
//! traversal at will.

use crate::element::{Child, Composite};

/// Whether a field with logical `name` passes the optional filter.
pub(crate) fn wants(names: Option<&[&str]>, name: &str) -> bool {
    names.map_or(true, |names| names.contains(&name))
}

/// Present children of `element`, in canonical field order.
pub fn children<'a>(element: &'a dyn Composite, names: Option<&[&str]>) -> Vec<Child<'a>> {
    let descriptor = element.type_descriptor();
    let mut out = Vec::new();
    for (index, child) in descriptor.elements.iter().enumerate() {
        if !wants(names, child.name) {
            continue;
        }
        element.field(index).collect_children(child.name, &mut out);
    }
    out
}

/// Depth-first visit of `element` and every descendant, parents first.
pub fn walk<'a>(element: &'a dyn crate::Element, visit: &mut dyn FnMut(&str, &'a dyn crate::Element)) {
    for child in element.children(None) {
        visit(child.name, child.element);
        walk(child.element, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CodeableConcept, Coding, Element, FhirBoolean, FhirCode, FhirString, HumanName,
        Observation, ObservationValue, Patient,
    };

    #[test]
    fn filter_keeps_canonical_order() {
        let patient = Patient {
            active: Some(FhirBoolean::new(true)),
            gender: Some(FhirCode::new("other")),
            name: vec![HumanName::default(), HumanName::default()],
            ..Default::default()
        };

        let names: Vec<_> = patient
            .children(Some(&["gender", "name", "active"]))
            .iter()
            .map(|child| child.name)
            .collect();
        assert_eq!(names, vec!["active", "name", "name", "gender"]);

        let only_gender = patient.children(Some(&["gender"]));
        assert_eq!(only_gender.len(), 1);
        assert_eq!(only_gender[0].element.type_descriptor().name, "code");
    }

    #[test]
    fn choice_child_uses_logical_name() {
        let observation = Observation {
            value: Some(ObservationValue::String(FhirString::new("positive"))),
            ..Default::default()
        };
        let children = observation.children(Some(&["value"]));
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "value");
        assert_eq!(children[0].element.type_descriptor().name, "string");
    }

    #[test]
    fn walk_reaches_nested_leaves() {
        let concept = CodeableConcept {
            coding: vec![Coding {
                code: Some(FhirCode::new("8867-4")),
                ..Default::default()
            }],
            ..Default::default()
        };

        let mut seen = Vec::new();
        walk(&concept, &mut |name, _| seen.push(name.to_owned()));
        assert_eq!(seen, vec!["coding", "code"]);
    }

    #[test]
    fn traversal_is_restartable() {
        let patient = Patient {
            active: Some(FhirBoolean::new(false)),
            ..Default::default()
        };
        assert_eq!(patient.children(None).len(), patient.children(None).len());
    }
}
