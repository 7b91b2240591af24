use crate::datatypes::{
    CodeableConcept, Extension, Identifier, Meta, Narrative, Period, Quantity, Reference,
};
use crate::primitive::{
    FhirBoolean, FhirCode, FhirDateTime, FhirId, FhirInstant, FhirInteger, FhirString, FhirTime,
    FhirUri,
};
use crate::resource::AnyResource;

crate::choice_type! {
    /// `Observation.effective[x]`
    pub enum ObservationEffective {
        DateTime(FhirDateTime),
        Period(Period),
        Instant(FhirInstant),
    }
}

crate::choice_type! {
    /// `Observation.value[x]` and `Observation.component.value[x]`
    pub enum ObservationValue {
        Quantity(Quantity),
        CodeableConcept(CodeableConcept),
        String(FhirString),
        Boolean(FhirBoolean),
        Integer(FhirInteger),
        Time(FhirTime),
        DateTime(FhirDateTime),
        Period(Period),
    }
}

crate::element_schema! {
    /// Measurements and simple assertions made about a subject.
    resource Observation "Observation" extends "DomainResource" {
        id "id": primitive FhirId,
        meta "meta": element Meta,
        implicit_rules "implicitRules": primitive FhirUri,
        language "language": primitive FhirCode,
        text "text": element Narrative,
        contained "contained": contained AnyResource,
        extension "extension": list Extension,
        modifier_extension "modifierExtension": list Extension,
        identifier "identifier": list Identifier,
        status "status": primitive FhirCode,
        category "category": list CodeableConcept,
        code "code": element CodeableConcept,
        subject "subject": element Reference,
        encounter "encounter": element Reference,
        effective "effective": choice ObservationEffective,
        issued "issued": primitive FhirInstant,
        performer "performer": list Reference,
        value "value": choice ObservationValue,
        data_absent_reason "dataAbsentReason": element CodeableConcept,
        interpretation "interpretation": list CodeableConcept,
        body_site "bodySite": element CodeableConcept,
        method "method": element CodeableConcept,
        has_member "hasMember": list Reference,
        derived_from "derivedFrom": list Reference,
        component "component": list ObservationComponent,
    }
}

crate::element_schema! {
    /// `Observation.component`
    backbone ObservationComponent "BackboneElement" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        modifier_extension "modifierExtension": list Extension,
        code "code": element CodeableConcept,
        value "value": choice ObservationValue,
        data_absent_reason "dataAbsentReason": element CodeableConcept,
        interpretation "interpretation": list CodeableConcept,
    }
}
