//! FHIR Bundle
//!
//! A container for a collection of resources. Entries embed their resource
//! through a single resource slot, so any registered resource type can appear.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::datatypes::{Extension, Identifier, Meta};
use crate::error::{Error, Result};
use crate::primitive::{
    FhirCode, FhirDecimal, FhirId, FhirInstant, FhirString, FhirUnsignedInt, FhirUri,
};
use crate::resource::{AnyResource, Resource};

crate::element_schema! {
    resource Bundle "Bundle" extends "Resource" {
        id "id": primitive FhirId,
        meta "meta": element Meta,
        implicit_rules "implicitRules": primitive FhirUri,
        language "language": primitive FhirCode,
        identifier "identifier": element Identifier,
        /// Indicates the purpose of this bundle, see [`BundleType`]
        type_ "type": primitive FhirCode,
        timestamp "timestamp": primitive FhirInstant,
        /// If search, the total number of matches
        total "total": primitive FhirUnsignedInt,
        link "link": list BundleLink,
        entry "entry": list BundleEntry,
    }
}

crate::element_schema! {
    /// Links related to this Bundle
    backbone BundleLink "BackboneElement" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        modifier_extension "modifierExtension": list Extension,
        relation "relation": primitive FhirString,
        url "url": primitive FhirUri,
    }
}

crate::element_schema! {
    /// Entry in the bundle - will have a resource or information
    backbone BundleEntry "BackboneElement" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        modifier_extension "modifierExtension": list Extension,
        link "link": list BundleLink,
        full_url "fullUrl": primitive FhirUri,
        resource "resource": resource AnyResource,
        search "search": element BundleEntrySearch,
        request "request": element BundleEntryRequest,
        response "response": element BundleEntryResponse,
    }
}

crate::element_schema! {
    /// Search-related information for a Bundle entry
    backbone BundleEntrySearch "BackboneElement" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        modifier_extension "modifierExtension": list Extension,
        mode "mode": primitive FhirCode,
        score "score": primitive FhirDecimal,
    }
}

crate::element_schema! {
    /// Request details for a Bundle entry
    backbone BundleEntryRequest "BackboneElement" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        modifier_extension "modifierExtension": list Extension,
        method "method": primitive FhirCode,
        url "url": primitive FhirUri,
        if_none_match "ifNoneMatch": primitive FhirString,
        if_modified_since "ifModifiedSince": primitive FhirInstant,
        if_match "ifMatch": primitive FhirString,
        if_none_exist "ifNoneExist": primitive FhirString,
    }
}

crate::element_schema! {
    /// Response details for a Bundle entry
    backbone BundleEntryResponse "BackboneElement" extends "Element" {
        id "id": attribute String,
        extension "extension": list Extension,
        modifier_extension "modifierExtension": list Extension,
        status "status": primitive FhirString,
        location "location": primitive FhirUri,
        etag "etag": primitive FhirString,
        last_modified "lastModified": primitive FhirInstant,
        /// OperationOutcome with hints and warnings (for batch/transaction)
        outcome "outcome": resource AnyResource,
    }
}

/// Type of Bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleType {
    /// A set of resources composing a single coherent document
    Document,
    /// A message (application/response or application/request)
    Message,
    /// A transaction - intended to be processed atomically
    Transaction,
    /// Response to a transaction
    TransactionResponse,
    /// A set of actions to be processed independently
    Batch,
    /// Response to a batch
    BatchResponse,
    /// A list of resources with history
    History,
    /// Results of a search operation
    Searchset,
    /// A set of resources collected for a specific purpose
    Collection,
}

impl BundleType {
    pub fn as_str(self) -> &'static str {
        match self {
            BundleType::Document => "document",
            BundleType::Message => "message",
            BundleType::Transaction => "transaction",
            BundleType::TransactionResponse => "transaction-response",
            BundleType::Batch => "batch",
            BundleType::BatchResponse => "batch-response",
            BundleType::History => "history",
            BundleType::Searchset => "searchset",
            BundleType::Collection => "collection",
        }
    }
}

impl fmt::Display for BundleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BundleType {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self> {
        match code {
            "document" => Ok(BundleType::Document),
            "message" => Ok(BundleType::Message),
            "transaction" => Ok(BundleType::Transaction),
            "transaction-response" => Ok(BundleType::TransactionResponse),
            "batch" => Ok(BundleType::Batch),
            "batch-response" => Ok(BundleType::BatchResponse),
            "history" => Ok(BundleType::History),
            "searchset" => Ok(BundleType::Searchset),
            "collection" => Ok(BundleType::Collection),
            _ => Err(Error::invalid_value("BundleType", code)),
        }
    }
}

/// Why an entry is in the result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleEntrySearchMode {
    /// This resource matched the search specification
    Match,
    /// This resource is returned because it is referred to from another resource in the search set
    Include,
    /// An OperationOutcome providing additional information about the processing of a search entry
    Outcome,
}

impl FromStr for BundleEntrySearchMode {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self> {
        match code {
            "match" => Ok(BundleEntrySearchMode::Match),
            "include" => Ok(BundleEntrySearchMode::Include),
            "outcome" => Ok(BundleEntrySearchMode::Outcome),
            _ => Err(Error::invalid_value("BundleEntrySearchMode", code)),
        }
    }
}

impl Bundle {
    /// Create a new Bundle with minimal required fields
    pub fn new(bundle_type: BundleType) -> Self {
        Self {
            type_: Some(FhirCode::new(bundle_type.as_str())),
            ..Default::default()
        }
    }

    /// The bundle type, if present and a known code
    pub fn bundle_type(&self) -> Option<BundleType> {
        self.type_
            .as_ref()
            .and_then(|code| code.value.as_deref())
            .and_then(|code| code.parse().ok())
    }

    /// Check if this is a transaction bundle
    pub fn is_transaction(&self) -> bool {
        matches!(self.bundle_type(), Some(BundleType::Transaction))
    }

    /// Check if this is a batch bundle
    pub fn is_batch(&self) -> bool {
        matches!(self.bundle_type(), Some(BundleType::Batch))
    }

    /// Check if this is a search result bundle
    pub fn is_searchset(&self) -> bool {
        matches!(self.bundle_type(), Some(BundleType::Searchset))
    }

    /// Get the number of entries in the bundle
    pub fn entry_count(&self) -> usize {
        self.entry.len()
    }

    /// Add an entry to the bundle
    pub fn add_entry(&mut self, entry: BundleEntry) {
        self.entry.push(entry);
    }

    /// Add a link to the bundle
    pub fn add_link(&mut self, relation: impl Into<String>, url: impl Into<String>) {
        self.link.push(BundleLink {
            relation: Some(FhirString::new(relation)),
            url: Some(FhirUri::new(url)),
            ..Default::default()
        });
    }

    /// Find a link by relation (`self`, `next`, ...)
    pub fn link_url(&self, relation: &str) -> Option<&str> {
        self.link
            .iter()
            .find(|link| {
                link.relation
                    .as_ref()
                    .and_then(|value| value.value.as_deref())
                    == Some(relation)
            })
            .and_then(|link| link.url.as_ref())
            .and_then(|url| url.value.as_deref())
    }

    /// Entry resources in order, skipping entries without one
    pub fn resources(&self) -> impl Iterator<Item = &AnyResource> {
        self.entry.iter().filter_map(|entry| entry.resource.as_ref())
    }

    /// Entry resources of type `R`
    pub fn resources_of<R: Resource>(&self) -> impl Iterator<Item = &R> {
        self.resources()
            .filter_map(|resource| resource.downcast_ref::<R>())
    }
}

impl BundleEntry {
    /// Entry wrapping `resource`
    pub fn new(resource: impl Into<AnyResource>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..Default::default()
        }
    }

    pub fn with_full_url(mut self, full_url: impl Into<String>) -> Self {
        self.full_url = Some(FhirUri::new(full_url));
        self
    }

    /// Search mode, if present and a known code
    pub fn search_mode(&self) -> Option<BundleEntrySearchMode> {
        self.search
            .as_ref()
            .and_then(|search| search.mode.as_ref())
            .and_then(|mode| mode.value.as_deref())
            .and_then(|mode| mode.parse().ok())
    }
}
