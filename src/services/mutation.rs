use serde::Serialize;
use tracing::{info, instrument};

use crate::data::{DeleteProjectData, Owner, Project};

use super::client::{project_error, ProjectsClient};
use super::error::ProjectResult;
use super::graphql::{ClientError, GraphQLExecutor};
use super::prompt::Prompter;
use super::queries;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectV2Input {
    pub project_id: String,
}

/// Variables for the `DeleteProject` mutation.
///
/// The response reuses `projectFields`, so the item and field connections
/// are pinned to zero-length pages with no cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectInput {
    pub input: DeleteProjectV2Input,
    pub first_items: u32,
    pub after_items: Option<String>,
    pub first_fields: u32,
    pub after_fields: Option<String>,
}

impl DeleteProjectInput {
    pub fn new(project_id: impl Into<String>) -> Self {
        DeleteProjectInput {
            input: DeleteProjectV2Input {
                project_id: project_id.into(),
            },
            first_items: 0,
            after_items: None,
            first_fields: 0,
            after_fields: None,
        }
    }
}

impl<E: GraphQLExecutor, P: Prompter> ProjectsClient<E, P> {
    /// Delete `project`. Sent once; a failure is never retried.
    #[instrument(skip(self, owner, project), fields(project = project.number))]
    pub fn delete_project(&self, owner: &Owner, project: &Project) -> ProjectResult<()> {
        let variables =
            serde_json::to_value(DeleteProjectInput::new(&project.id)).map_err(ClientError::from)?;

        let data: DeleteProjectData = self
            .executor
            .mutate("DeleteProject", &queries::delete_project(), variables)
            .and_then(|response| response.into_data())
            .map_err(|err| project_error(err, owner, Some(project.number)))?;

        info!(
            id = %project.id,
            confirmed = data.delete_project.and_then(|d| d.project).is_some(),
            "deleted project"
        );
        Ok(())
    }
}
