use crate::datatypes::{
    CodeableConcept, Extension, HumanName, Identifier, Meta, Narrative, Reference,
};
use crate::primitive::{
    FhirBoolean, FhirCode, FhirDate, FhirDateTime, FhirId, FhirInteger, FhirUri,
};
use crate::resource::AnyResource;

crate::choice_type! {
    /// `Patient.deceased[x]`
    pub enum PatientDeceased {
        Boolean(FhirBoolean),
        DateTime(FhirDateTime),
    }
}

crate::choice_type! {
    /// `Patient.multipleBirth[x]`
    pub enum PatientMultipleBirth {
        Boolean(FhirBoolean),
        Integer(FhirInteger),
    }
}

crate::element_schema! {
    /// Demographics of an individual receiving care.
    resource Patient "Patient" extends "DomainResource" {
        id "id": primitive FhirId,
        meta "meta": element Meta,
        implicit_rules "implicitRules": primitive FhirUri,
        language "language": primitive FhirCode,
        text "text": element Narrative,
        contained "contained": contained AnyResource,
        extension "extension": list Extension,
        modifier_extension "modifierExtension": list Extension,
        identifier "identifier": list Identifier,
        active "active": primitive FhirBoolean,
        name "name": list HumanName,
        gender "gender": primitive FhirCode,
        birth_date "birthDate": primitive FhirDate,
        deceased "deceased": choice PatientDeceased,
        marital_status "maritalStatus": element CodeableConcept,
        multiple_birth "multipleBirth": choice PatientMultipleBirth,
        general_practitioner "generalPractitioner": list Reference,
        managing_organization "managingOrganization": element Reference,
    }
}
