use std::str::FromStr;

use ferrum_element::tree::walk;
use ferrum_element::{
    AnyResource, CodeableConcept, Coding, Element, Error, Extension, FhirBoolean, FhirDateTime,
    FhirDecimal, FhirInteger, FhirString, HumanName, Observation, ObservationComponent,
    ObservationEffective, ObservationValue, Patient, PatientMultipleBirth, Period, Practitioner,
    Quantity, Reference, TypeKind, TypeNamespace,
};
use rust_decimal::Decimal;

fn sample_patient() -> Patient {
    Patient {
        active: Some(FhirBoolean::new(true)),
        name: vec![
            HumanName {
                family: Some(FhirString::new("Chalmers")),
                given: vec![FhirString::new("Peter"), FhirString::new("James")],
                ..Default::default()
            },
            HumanName {
                text: Some(FhirString::new("Jim")),
                ..Default::default()
            },
        ],
        multiple_birth: Some(PatientMultipleBirth::Integer(FhirInteger::new(2))),
        general_practitioner: vec![Reference::to("Practitioner/1")],
        contained: vec![AnyResource::new(Practitioner::default())],
        ..Default::default()
    }
}

fn names(children: &[ferrum_element::Child<'_>]) -> Vec<&'static str> {
    children.iter().map(|child| child.name).collect()
}

#[test]
fn children_follow_canonical_order() {
    let patient = sample_patient();
    assert_eq!(
        names(&patient.children(None)),
        vec![
            "contained",
            "active",
            "name",
            "name",
            "multipleBirth",
            "generalPractitioner"
        ]
    );
}

#[test]
fn children_filter_keeps_canonical_order() {
    let patient = sample_patient();
    let filtered = patient.children(Some(&["generalPractitioner", "active"]));
    assert_eq!(names(&filtered), vec!["active", "generalPractitioner"]);
    assert!(patient.children(Some(&["gender"])).is_empty());
}

#[test]
fn children_calls_are_restartable() {
    let patient = sample_patient();
    let first = names(&patient.children(None));
    let second = names(&patient.children(None));
    assert_eq!(first, second);
}

#[test]
fn choice_child_reports_selected_type() {
    let patient = sample_patient();
    let multiple_birth = patient.children(Some(&["multipleBirth"]));
    assert_eq!(multiple_birth.len(), 1);
    let element = multiple_birth[0].element;
    assert_eq!(element.type_descriptor().name, "integer");
    assert_eq!(element.to_integer().unwrap(), 2);
}

#[test]
fn walk_visits_every_node() {
    let patient = sample_patient();
    let mut visited = Vec::new();
    walk(&patient, &mut |name, element| {
        visited.push(format!("{name}:{}", element.type_descriptor().name));
    });
    for expected in [
        "family:string",
        "given:string",
        "reference:string",
        "contained:Practitioner",
    ] {
        assert!(visited.iter().any(|entry| entry == expected), "missing {expected}");
    }
}

#[test]
fn descriptors_describe_types() {
    let patient = Patient::default();
    let descriptor = patient.type_descriptor();
    assert_eq!(descriptor.qualified_name(), "FHIR.Patient");
    assert_eq!(descriptor.base, Some("DomainResource"));
    assert_eq!(descriptor.kind, TypeKind::Resource);

    let (_, name) = descriptor.child("name").unwrap();
    assert!(name.is_list);
    assert_eq!(name.types, &["HumanName"]);

    let (_, deceased) = descriptor.child("deceased").unwrap();
    assert_eq!(deceased.types, &["boolean", "dateTime"]);

    let component = ObservationComponent::default();
    assert_eq!(component.type_descriptor().kind, TypeKind::BackboneElement);
    assert_eq!(component.type_descriptor().base, Some("Element"));

    let boolean = FhirBoolean::new(true);
    assert_eq!(boolean.type_descriptor().namespace, TypeNamespace::Fhir);
    assert!(boolean.type_descriptor().is_primitive());
}

#[test]
fn equality_compares_children_in_order() {
    let a = sample_patient();
    let mut b = sample_patient();
    assert!(a.equal(&b));

    b.name.swap(0, 1);
    assert!(!a.equal(&b));
}

#[test]
fn equality_is_vacuous_for_empty_children() {
    let empty = Patient::default();
    assert!(empty.equal(&Patient::default()));
    assert!(empty.equal(&sample_patient()));
    assert!(sample_patient().equivalent(&empty));
    assert!(Period::default().equal(&Quantity::default()));
}

#[test]
fn equivalence_ignores_ids_case_and_precision() {
    let a = HumanName {
        id: Some("n1".to_owned()),
        family: Some(FhirString::new("van  Beethoven")),
        ..Default::default()
    };
    let b = HumanName {
        id: Some("other".to_owned()),
        family: Some(FhirString::new("Van Beethoven")),
        ..Default::default()
    };
    assert!(!a.equal(&b));
    assert!(a.equivalent(&b));

    let precise = FhirDecimal::new(Decimal::from_str("1.50").unwrap());
    let rounded = FhirDecimal::new(Decimal::from_str("1.5").unwrap());
    assert!(precise.equal(&rounded));
    assert!(precise.equivalent(&rounded));
}

#[test]
fn composites_refuse_coercion() {
    let coding = Coding::new("http://loinc.org", "8867-4");
    let concept = CodeableConcept {
        coding: vec![coding],
        ..Default::default()
    };
    let observation = Observation::default();
    let extension = Extension::default();
    let candidates: [&dyn Element; 3] = [&concept, &observation, &extension];

    for element in candidates {
        assert!(matches!(element.to_boolean(), Err(Error::NotConvertible { .. })));
        assert!(matches!(element.to_string(), Err(Error::NotConvertible { .. })));
        assert!(matches!(element.to_integer(), Err(Error::NotConvertible { .. })));
        assert!(matches!(element.to_decimal(), Err(Error::NotConvertible { .. })));
        assert!(matches!(element.to_date(), Err(Error::NotConvertible { .. })));
        assert!(matches!(element.to_time(), Err(Error::NotConvertible { .. })));
        assert!(matches!(element.to_date_time(), Err(Error::NotConvertible { .. })));
        assert!(matches!(element.to_quantity(), Err(Error::NotConvertible { .. })));
    }
}

#[test]
fn leaves_convert_where_scalar_allows() {
    let date_time = FhirDateTime::new("2024-03-01T10:00:00+01:00");
    assert_eq!(
        date_time.to_date().unwrap(),
        chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    );
    assert!(date_time.to_boolean().is_err());

    let integer = FhirInteger::new(7);
    assert_eq!(integer.to_decimal().unwrap(), Decimal::from(7));
    assert_eq!(integer.to_quantity().unwrap().unit, "1");
    assert_eq!(Element::to_string(&integer).unwrap(), "7");
}

#[test]
fn observation_value_choice_reaches_quantity() {
    let observation = Observation {
        effective: Some(ObservationEffective::DateTime(FhirDateTime::new("2012-09-17"))),
        value: Some(ObservationValue::Quantity(Quantity {
            value: Some(FhirDecimal::new(Decimal::from(185))),
            unit: Some(FhirString::new("lbs")),
            ..Default::default()
        })),
        ..Default::default()
    };
    let value = observation.children(Some(&["value"]));
    let quantity = value[0].element.to_quantity().unwrap();
    assert_eq!(quantity.value, Decimal::from(185));
    assert_eq!(quantity.unit, "lbs");
}
