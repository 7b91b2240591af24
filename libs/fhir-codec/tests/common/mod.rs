//! Fully populated resources shared by the JSON and XML round-trip tests.
//!
//! Every field of every shipped type is set at least once, including
//! metadata-only primitives and sparse primitive lists.

use std::str::FromStr;

use ferrum_element::{
    AnyResource, Bundle, BundleEntry, BundleEntryRequest, BundleEntryResponse, BundleEntrySearch,
    BundleLink, CodeableConcept, Coding, Extension, FhirBoolean, FhirCanonical, FhirCode,
    FhirDate, FhirDateTime, FhirDecimal, FhirId, FhirInstant, FhirInteger, FhirString,
    FhirUnsignedInt, FhirUri, FhirXhtml, HumanName, Identifier, Meta, Narrative, Observation,
    ObservationComponent, ObservationEffective, ObservationValue, Patient, PatientDeceased,
    PatientMultipleBirth, Period, Practitioner, Quantity, Reference,
};
use rust_decimal::Decimal;

pub fn decimal(text: &str) -> FhirDecimal {
    FhirDecimal::new(Decimal::from_str(text).unwrap())
}

pub fn flag(url: &str) -> Extension {
    Extension::new(url, FhirBoolean::new(true))
}

pub fn period() -> Period {
    Period {
        id: Some("per1".to_owned()),
        extension: vec![flag("http://example.org/period-flag")],
        start: Some(FhirDateTime::new("2024-01-01T08:00:00Z")),
        end: Some(FhirDateTime::new("2024-06-30").with_id("end")),
    }
}

pub fn coding(code: &str) -> Coding {
    Coding {
        id: Some(format!("c-{code}")),
        extension: vec![],
        system: Some(FhirUri::new("http://loinc.org")),
        version: Some(FhirString::new("2.77")),
        code: Some(FhirCode::new(code)),
        display: Some(FhirString::new("Heart rate")),
        user_selected: Some(FhirBoolean::new(false)),
    }
}

pub fn concept(code: &str) -> CodeableConcept {
    CodeableConcept {
        id: None,
        extension: vec![flag("http://example.org/concept-flag")],
        coding: vec![coding(code), Coding::new("http://snomed.info/sct", "364075005")],
        text: Some(FhirString::new("Heart rate")),
    }
}

pub fn reference(target: &str) -> Reference {
    Reference {
        id: Some("ref".to_owned()),
        extension: vec![],
        reference: Some(FhirString::new(target)),
        type_: Some(FhirUri::new("Organization")),
        display: Some(FhirString::new("Acme Healthcare")),
    }
}

pub fn identifier() -> Identifier {
    Identifier {
        id: Some("ident".to_owned()),
        extension: vec![flag("http://example.org/identifier-flag")],
        use_: Some(FhirCode::new("official")),
        type_: Some(concept("MR")),
        system: Some(FhirUri::new("urn:oid:1.2.36.146.595.217.0.1")),
        value: Some(FhirString::new("12345")),
        period: Some(period()),
        assigner: Some(Reference::to("Organization/1")),
    }
}

pub fn quantity() -> Quantity {
    Quantity {
        id: Some("q".to_owned()),
        extension: vec![],
        value: Some(decimal("107.50")),
        comparator: Some(FhirCode::new("<")),
        unit: Some(FhirString::new("mm[Hg]")),
        system: Some(FhirUri::new("http://unitsofmeasure.org")),
        code: Some(FhirCode::new("mm[Hg]")),
    }
}

pub fn meta() -> Meta {
    Meta {
        id: Some("m".to_owned()),
        extension: vec![flag("http://example.org/meta-flag")],
        version_id: Some(FhirId::new("7")),
        last_updated: Some(FhirInstant::new("2024-03-01T10:15:00.000Z")),
        source: Some(FhirUri::new("urn:uuid:1c8a3b5e")),
        profile: vec![
            FhirCanonical::new("http://example.org/StructureDefinition/a"),
            FhirCanonical::from_extension(vec![flag("http://example.org/profile-missing")]),
            FhirCanonical::new("http://example.org/StructureDefinition/c").with_id("pc"),
        ],
        security: vec![Coding::new(
            "http://terminology.hl7.org/CodeSystem/v3-Confidentiality",
            "R",
        )],
        tag: vec![coding("tag-a"), Coding::new("http://example.org/tags", "tag-b")],
    }
}

pub fn narrative() -> Narrative {
    Narrative {
        id: Some("n".to_owned()),
        extension: vec![],
        status: Some(FhirCode::new("generated")),
        div: Some(FhirXhtml::new(
            r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>Record &amp; <b>summary</b></p></div>"#,
        )),
    }
}

pub fn human_name() -> HumanName {
    HumanName {
        id: Some("hn".to_owned()),
        extension: vec![flag("http://example.org/name-flag")],
        use_: Some(FhirCode::new("official")),
        text: Some(FhirString::new("Dr. Peter James Chalmers Jr.")),
        family: Some(FhirString::new("Chalmers").with_id("fam")),
        given: vec![
            FhirString::new("Peter"),
            FhirString::default().with_id("g2"),
            FhirString::new("James").with_extension(flag("http://example.org/given-flag")),
        ],
        prefix: vec![FhirString::new("Dr.")],
        suffix: vec![FhirString::new("Jr.")],
        period: Some(period()),
    }
}

pub fn practitioner() -> Practitioner {
    Practitioner {
        id: Some(FhirId::new("pr1")),
        meta: Some(meta()),
        implicit_rules: Some(FhirUri::new("http://example.org/rules")),
        language: Some(FhirCode::new("en-GB")),
        text: Some(narrative()),
        contained: vec![],
        extension: vec![flag("http://example.org/practitioner-flag")],
        modifier_extension: vec![flag("http://example.org/practitioner-modifier")],
        identifier: vec![identifier()],
        active: Some(FhirBoolean::new(true)),
        name: vec![human_name()],
        gender: Some(FhirCode::new("female")),
        birth_date: Some(FhirDate::new("1970-05")),
    }
}

pub fn observation() -> Observation {
    Observation {
        id: Some(FhirId::new("bp")),
        meta: Some(meta()),
        implicit_rules: Some(FhirUri::new("http://example.org/rules")),
        language: Some(FhirCode::new("en")),
        text: Some(narrative()),
        contained: vec![AnyResource::new(practitioner())],
        extension: vec![Extension::new(
            "http://example.org/observation-period",
            period(),
        )],
        modifier_extension: vec![],
        identifier: vec![identifier()],
        status: Some(FhirCode::new("final")),
        category: vec![concept("vital-signs")],
        code: Some(concept("85354-9")),
        subject: Some(Reference::to("Patient/example")),
        encounter: Some(reference("Encounter/1")),
        effective: Some(ObservationEffective::Period(period())),
        issued: Some(FhirInstant::new("2024-03-01T10:30:00.000+01:00")),
        performer: vec![Reference::to("#pr1")],
        value: Some(ObservationValue::Quantity(quantity())),
        data_absent_reason: Some(concept("not-performed")),
        interpretation: vec![concept("H")],
        body_site: Some(concept("368209003")),
        method: Some(concept("37931006")),
        has_member: vec![Reference::to("Observation/hr")],
        derived_from: vec![Reference::to("Observation/raw")],
        component: vec![
            ObservationComponent {
                id: Some("sys".to_owned()),
                extension: vec![],
                modifier_extension: vec![flag("http://example.org/component-modifier")],
                code: Some(concept("8480-6")),
                value: Some(ObservationValue::Quantity(quantity())),
                data_absent_reason: None,
                interpretation: vec![concept("N")],
            },
            ObservationComponent {
                code: Some(concept("8462-4")),
                value: Some(ObservationValue::String(
                    FhirString::new("not measured").with_id("vs"),
                )),
                data_absent_reason: Some(concept("asked-unknown")),
                ..Default::default()
            },
        ],
    }
}

pub fn patient() -> Patient {
    Patient {
        id: Some(FhirId::new("example")),
        meta: Some(meta()),
        implicit_rules: Some(FhirUri::new("http://example.org/rules")),
        language: Some(FhirCode::new("nl")),
        text: Some(narrative()),
        contained: vec![AnyResource::new(practitioner()), AnyResource::new(observation())],
        extension: vec![Extension::new(
            "http://example.org/patient-code",
            concept("LA6576-8"),
        )],
        modifier_extension: vec![flag("http://example.org/patient-modifier")],
        identifier: vec![
            identifier(),
            Identifier {
                value: Some(FhirString::new("67890")),
                ..Default::default()
            },
        ],
        active: Some(FhirBoolean::new(true).with_id("a1")),
        name: vec![human_name()],
        gender: Some(FhirCode::new("male")),
        birth_date: Some(
            FhirDate::new("1974-12-25").with_extension(Extension::new(
                "http://hl7.org/fhir/StructureDefinition/patient-birthTime",
                FhirDateTime::new("1974-12-25T14:35:45-05:00"),
            )),
        ),
        deceased: Some(PatientDeceased::DateTime(FhirDateTime::new("2015-02-14T13:42:00+10:00"))),
        marital_status: Some(concept("M")),
        multiple_birth: Some(PatientMultipleBirth::Integer(FhirInteger::new(2))),
        general_practitioner: vec![Reference::to("#pr1")],
        managing_organization: Some(reference("Organization/1")),
    }
}

pub fn bundle() -> Bundle {
    let mut bundle = Bundle {
        id: Some(FhirId::new("b1")),
        meta: Some(meta()),
        implicit_rules: Some(FhirUri::new("http://example.org/rules")),
        language: Some(FhirCode::new("en")),
        identifier: Some(identifier()),
        type_: Some(FhirCode::new("transaction-response")),
        timestamp: Some(FhirInstant::new("2024-03-01T11:00:00Z")),
        total: Some(FhirUnsignedInt::new(2u32)),
        ..Default::default()
    };
    bundle.link.push(BundleLink {
        id: Some("l1".to_owned()),
        extension: vec![],
        modifier_extension: vec![],
        relation: Some(FhirString::new("self")),
        url: Some(FhirUri::new("http://example.org/fhir")),
    });
    bundle.add_link("next", "http://example.org/fhir?page=2");

    bundle.add_entry(BundleEntry {
        id: Some("e1".to_owned()),
        extension: vec![flag("http://example.org/entry-flag")],
        modifier_extension: vec![],
        link: vec![BundleLink {
            relation: Some(FhirString::new("alternate")),
            url: Some(FhirUri::new("http://example.org/alt/Patient/example")),
            ..Default::default()
        }],
        full_url: Some(FhirUri::new("http://example.org/fhir/Patient/example")),
        resource: Some(AnyResource::new(patient())),
        search: Some(BundleEntrySearch {
            id: Some("s".to_owned()),
            extension: vec![],
            modifier_extension: vec![],
            mode: Some(FhirCode::new("match")),
            score: Some(decimal("0.80")),
        }),
        request: Some(BundleEntryRequest {
            id: Some("rq".to_owned()),
            extension: vec![],
            modifier_extension: vec![flag("http://example.org/request-modifier")],
            method: Some(FhirCode::new("PUT")),
            url: Some(FhirUri::new("Patient/example")),
            if_none_match: Some(FhirString::new("W/\"1\"")),
            if_modified_since: Some(FhirInstant::new("2024-02-01T00:00:00Z")),
            if_match: Some(FhirString::new("W/\"2\"")),
            if_none_exist: Some(FhirString::new("identifier=12345")),
        }),
        response: Some(BundleEntryResponse {
            id: Some("rs".to_owned()),
            extension: vec![],
            modifier_extension: vec![],
            status: Some(FhirString::new("201 Created")),
            location: Some(FhirUri::new("Patient/example/_history/1")),
            etag: Some(FhirString::new("W/\"1\"")),
            last_modified: Some(FhirInstant::new("2024-03-01T11:00:00Z")),
            outcome: Some(AnyResource::new(observation())),
        }),
    });
    bundle.add_entry(BundleEntry::new(practitioner()).with_full_url("urn:uuid:pr1"));
    bundle
}

/// One fully populated and one empty instance of every resource type.
pub fn resources() -> Vec<AnyResource> {
    vec![
        AnyResource::new(patient()),
        AnyResource::new(Patient::default()),
        AnyResource::new(practitioner()),
        AnyResource::new(Practitioner::default()),
        AnyResource::new(observation()),
        AnyResource::new(Observation::default()),
        AnyResource::new(bundle()),
        AnyResource::new(Bundle::default()),
    ]
}
