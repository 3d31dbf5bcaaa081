//! Resource shapes.
//!
//! Only the fields the worklist flow reads or prints are modelled. Every field
//! defaults when absent, so a sparse server response still decodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{LIST_RESOURCE_TYPE, TASK_REFERENCE_PREFIX};

/// A worklist read directly by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct List {
    pub resource_type: String,
    pub id: String,
    pub meta: ResourceMeta,
    pub extension: Vec<Extension>,
    pub identifier: Vec<ResourceIdentifier>,
    pub status: String,
    pub mode: String,
    pub title: String,
    pub code: Code,
    pub entry: Vec<ListEntry>,
}

/// A search result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bundle {
    pub resource_type: String,
    #[serde(rename = "type")]
    pub bundle_type: String,
    pub total: u32,
    pub link: Vec<BundleLink>,
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Returns the entries of the first `List` resource in the bundle, or an
    /// empty slice when the bundle carries none.
    pub fn entries(&self) -> &[ListEntry] {
        self.entry
            .iter()
            .find(|e| e.resource.resource_type == LIST_RESOURCE_TYPE)
            .map(|e| e.resource.entry.as_slice())
            .unwrap_or_default()
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "resource={}, type={}, total={}",
            self.resource_type, self.bundle_type, self.total
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleLink {
    pub relation: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleEntry {
    pub full_url: String,
    pub resource: BundleEntryResource,
}

/// The resource inside a bundle entry, shaped for the `List` case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleEntryResource {
    pub resource_type: String,
    pub id: String,
    pub meta: ResourceMeta,
    pub extension: Vec<UrlExtension>,
    pub identifier: Vec<ResourceIdentifier>,
    pub status: String,
    pub mode: String,
    pub title: String,
    pub code: Code,
    pub entry: Vec<ListEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceMeta {
    pub profile: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UrlExtension {
    pub url: String,
    pub value_code: String,
    pub extension: Vec<Extension>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Extension {
    pub url: String,
    pub value_integer: i64,
    pub value_boolean: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub identifier_type: IdentifierType,
    pub system: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentifierType {
    pub coding: Vec<Coding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Coding {
    pub system: String,
    pub code: String,
    pub display: String,
}

impl fmt::Display for Coding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "system={}, code={}, display={}",
            self.system, self.code, self.display
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Code {
    pub coding: Vec<Coding>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListEntry {
    pub item: ListEntryItem,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListEntryItem {
    pub reference: String,
}

impl ListEntryItem {
    /// Whether the entry references a task (`Task/{id}`).
    pub fn is_task(&self) -> bool {
        self.reference.starts_with(TASK_REFERENCE_PREFIX)
    }

    /// The referenced task id, or `None` if this is not a task reference or
    /// the id is empty.
    pub fn task_id(&self) -> Option<&str> {
        self.reference
            .strip_prefix(TASK_REFERENCE_PREFIX)
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    pub resource_type: String,
    pub id: String,
    pub identifier: Vec<ResourceIdentifier>,
    pub status: String,
    pub intent: String,
    pub priority: String,
    pub code: Code,
    #[serde(rename = "for")]
    pub for_: Reference,
    pub authored_on: String,
    pub last_modified: String,
    pub input: Vec<TaskInput>,
}

impl Task {
    /// Id of the service request referenced by the first input.
    ///
    /// The id is the text after the first `/` of the reference, or the whole
    /// reference when it has no `/`. `None` when there is no input or the id
    /// comes out empty.
    pub fn service_request_id(&self) -> Option<&str> {
        let reference = self.input.first()?.value_reference.reference.as_str();
        let id = reference
            .split_once('/')
            .map_or(reference, |(_, id)| id);
        (!id.is_empty()).then_some(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskInput {
    pub value_reference: Reference,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reference {
    pub reference: String,
    pub display: String,
}

/// The order a worklist task refers to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceRequest {
    pub resource_type: String,
    pub id: String,
    pub identifier: Vec<ResourceIdentifier>,
    pub status: String,
    pub intent: String,
    pub priority: String,
    pub code: Code,
    pub subject: Reference,
    pub encounter: Reference,
    pub occurrence_date_time: String,
    pub performer: Vec<Reference>,
}
