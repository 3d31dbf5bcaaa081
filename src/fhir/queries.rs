//! Typed reads on top of [`ResourceClient`].

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;

use crate::config::{FORMAT_PARAM, ID_PARAM, JSON_FORMAT, LIST_PATH, SERVICE_REQUEST_PATH, TASK_PATH};
use crate::error_handling::ClientError;
use crate::fetch::ResourceClient;
use crate::fhir::{Bundle, List, ServiceRequest, Task};

const JSON_FORMAT_PARAM: [(&str, &str); 1] = [(FORMAT_PARAM, JSON_FORMAT)];

impl ResourceClient {
    /// Reads `List/{id}`.
    pub async fn fetch_list_by_id(
        &self,
        list_id: &str,
        cancel: &CancellationToken,
    ) -> Result<List, ClientError> {
        self.get(&format!("{LIST_PATH}/{list_id}"), JSON_FORMAT_PARAM, cancel)
            .await
    }

    /// Searches `List?_id={id}`; the worklist comes back inside a bundle.
    pub async fn fetch_bundle_by_id(
        &self,
        list_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Bundle, ClientError> {
        let params = [(ID_PARAM, list_id), (FORMAT_PARAM, JSON_FORMAT)];
        self.get(LIST_PATH, params, cancel).await
    }

    pub async fn fetch_task_by_id(
        &self,
        task_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Task, ClientError> {
        self.get(&format!("{TASK_PATH}/{task_id}"), JSON_FORMAT_PARAM, cancel)
            .await
    }

    pub async fn fetch_service_request_by_id(
        &self,
        request_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ServiceRequest, ClientError> {
        self.get(
            &format!("{SERVICE_REQUEST_PATH}/{request_id}"),
            JSON_FORMAT_PARAM,
            cancel,
        )
        .await
    }

    /// Reads an arbitrary endpoint as untyped JSON.
    pub async fn get_value(
        &self,
        endpoint: &str,
        params: &HashMap<String, String>,
        cancel: &CancellationToken,
    ) -> Result<serde_json::Value, ClientError> {
        self.get(endpoint, params, cancel).await
    }
}
