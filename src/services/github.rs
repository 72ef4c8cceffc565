use octocrab::Octocrab;
use serde_json::{json, Value};
use std::cell::OnceCell;
use std::process::Command;
use tokio::runtime::Runtime;
use tracing::{debug, instrument, warn};

use crate::data::{Owner, OwnerKind, ViewerData};

use super::graphql::{ClientError, GraphQLExecutor, Response};
use super::queries;

/// Ask the `gh` CLI for its stored token.
pub fn get_github_token() -> Result<String, ClientError> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .map_err(|_| ClientError::NotAuthenticated)?;

    if !output.status.success() {
        return Err(ClientError::NotAuthenticated);
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(ClientError::NotAuthenticated);
    }
    Ok(token)
}

/// Blocking GraphQL executor backed by octocrab.
///
/// Every request is driven to completion on a private current-thread runtime,
/// so callers stay synchronous.
pub struct GithubClient {
    runtime: Runtime,
    octocrab: Octocrab,
    viewer: OnceCell<Owner>,
}

impl GithubClient {
    pub fn new(token: String) -> Result<Self, ClientError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        // The HTTP stack spawns onto whatever runtime is current when built.
        let octocrab = {
            let _guard = runtime.enter();
            Octocrab::builder().personal_token(token).build()?
        };

        Ok(Self {
            runtime,
            octocrab,
            viewer: OnceCell::new(),
        })
    }

    #[instrument(skip(self, document, variables))]
    fn execute(
        &self,
        operation: &str,
        document: &str,
        variables: Value,
    ) -> Result<Response, ClientError> {
        debug!(%variables, "sending GraphQL operation");

        let payload = json!({
            "query": document,
            "operationName": operation,
            "variables": variables,
        });
        let response: Response = self.runtime.block_on(self.octocrab.graphql(&payload))?;

        if !response.errors.is_empty() {
            warn!(
                count = response.errors.len(),
                first = %response.errors[0].message,
                "GraphQL operation returned errors"
            );
        }
        Ok(response)
    }
}

impl GraphQLExecutor for GithubClient {
    fn query(
        &self,
        operation: &str,
        document: &str,
        variables: Value,
    ) -> Result<Response, ClientError> {
        self.execute(operation, document, variables)
    }

    fn mutate(
        &self,
        operation: &str,
        document: &str,
        variables: Value,
    ) -> Result<Response, ClientError> {
        self.execute(operation, document, variables)
    }

    fn viewer(&self) -> Result<Owner, ClientError> {
        if let Some(viewer) = self.viewer.get() {
            return Ok(viewer.clone());
        }

        let data: ViewerData = self
            .execute("Viewer", queries::VIEWER, json!({}))?
            .into_data()?;
        let viewer = Owner {
            id: data.viewer.id,
            login: data.viewer.login,
            kind: OwnerKind::Viewer,
        };
        let _ = self.viewer.set(viewer.clone());
        Ok(viewer)
    }
}
