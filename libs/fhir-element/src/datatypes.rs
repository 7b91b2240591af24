//! General-purpose datatypes
//!
//! Each type is declared once with [`element_schema!`](crate::element_schema);
//! field order is the canonical FHIR order and drives both traversal and
//! serialization.

use crate::element::QuantityValue;
use crate::error::{Error, Result};
use crate::primitive::{
    FhirBoolean, FhirCanonical, FhirCode, FhirDate, FhirDateTime, FhirDecimal, FhirId,
    FhirInstant, FhirInteger, FhirString, FhirUri, FhirXhtml,
};

crate::choice_type! {
    /// `Extension.value[x]`
    pub enum ExtensionValue {
        Boolean(FhirBoolean),
        Integer(FhirInteger),
        Decimal(FhirDecimal),
        String(FhirString),
        Code(FhirCode),
        Uri(FhirUri),
        Date(FhirDate),
        DateTime(FhirDateTime),
        Coding(Coding),
        CodeableConcept(CodeableConcept),
        Identifier(Identifier),
        Period(Period),
        Quantity(Quantity),
        Reference(Reference),
    }
}

crate::element_schema! {
    /// Additional content defined by implementations, keyed by `url`.
    complex Extension "Extension" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        url "url": attribute String,
        value "value": choice ExtensionValue,
    }
}

impl Extension {
    pub fn new(url: impl Into<String>, value: impl Into<ExtensionValue>) -> Self {
        Self {
            url: Some(url.into()),
            value: Some(value.into()),
            ..Default::default()
        }
    }
}

crate::element_schema! {
    complex Coding "Coding" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        system "system": primitive FhirUri,
        version "version": primitive FhirString,
        code "code": primitive FhirCode,
        display "display": primitive FhirString,
        user_selected "userSelected": primitive FhirBoolean,
    }
}

impl Coding {
    pub fn new(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: Some(FhirUri::new(system)),
            code: Some(FhirCode::new(code)),
            ..Default::default()
        }
    }
}

crate::element_schema! {
    complex CodeableConcept "CodeableConcept" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        coding "coding": list Coding,
        text "text": primitive FhirString,
    }
}

crate::element_schema! {
    complex Identifier "Identifier" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        use_ "use": primitive FhirCode,
        type_ "type": element CodeableConcept,
        system "system": primitive FhirUri,
        value "value": primitive FhirString,
        period "period": element Period,
        assigner "assigner": element Reference,
    }
}

crate::element_schema! {
    /// A reference from one resource to another. Logical identifier
    /// references are not modelled.
    complex Reference "Reference" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        reference "reference": primitive FhirString,
        type_ "type": primitive FhirUri,
        display "display": primitive FhirString,
    }
}

impl Reference {
    pub fn to(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(FhirString::new(reference)),
            ..Default::default()
        }
    }
}

crate::element_schema! {
    complex HumanName "HumanName" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        use_ "use": primitive FhirCode,
        text "text": primitive FhirString,
        family "family": primitive FhirString,
        given "given": primitives FhirString,
        prefix "prefix": primitives FhirString,
        suffix "suffix": primitives FhirString,
        period "period": element Period,
    }
}

crate::element_schema! {
    complex Period "Period" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        start "start": primitive FhirDateTime,
        end "end": primitive FhirDateTime,
    }
}

crate::element_schema! {
    complex Quantity "Quantity" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        value "value": primitive FhirDecimal,
        comparator "comparator": primitive FhirCode,
        unit "unit": primitive FhirString,
        system "system": primitive FhirUri,
        code "code": primitive FhirCode,
    }
    impl Element {
        /// The coded unit wins over the display unit; a unitless quantity
        /// has unit `1`.
        fn to_quantity(&self) -> Result<QuantityValue> {
            let value = self
                .value
                .as_ref()
                .and_then(|value| value.value)
                .ok_or_else(|| Error::invalid_value("Quantity", "missing value"))?;
            let unit = self
                .code
                .as_ref()
                .and_then(|code| code.value.clone())
                .or_else(|| self.unit.as_ref().and_then(|unit| unit.value.clone()))
                .unwrap_or_else(|| "1".to_owned());
            Ok(QuantityValue { value, unit })
        }
    }
}

crate::element_schema! {
    complex Meta "Meta" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        version_id "versionId": primitive FhirId,
        last_updated "lastUpdated": primitive FhirInstant,
        source "source": primitive FhirUri,
        profile "profile": primitives FhirCanonical,
        security "security": list Coding,
        tag "tag": list Coding,
    }
}

crate::element_schema! {
    /// Human-readable summary. `div` holds the XHTML fragment as text.
    complex Narrative "Narrative" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        status "status": primitive FhirCode,
        div "div": primitive FhirXhtml,
    }
}
