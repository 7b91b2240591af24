use crate::datatypes::{Extension, HumanName, Identifier, Meta, Narrative};
use crate::primitive::{FhirBoolean, FhirCode, FhirDate, FhirId, FhirUri};
use crate::resource::AnyResource;

crate::element_schema! {
    /// A person with a formal responsibility in the provisioning of care.
    resource Practitioner "Practitioner" extends "DomainResource" {
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
    }
}
