use serde_json::{json, Map, Value};

use crate::data::{Owner, OwnerKind};

use super::error::ProjectError;
use super::graphql::{ClientError, GraphQLError};

/// Resolves owners and projects and pages through items.
///
/// The resolution steps live next to their own concerns: `owner.rs`,
/// `project.rs`, `items.rs` and `mutation.rs` each add an `impl` block.
pub struct ProjectsClient<E, P> {
    pub(crate) executor: E,
    pub(crate) prompter: P,
}

impl<E, P> ProjectsClient<E, P> {
    pub fn new(executor: E, prompter: P) -> Self {
        Self { executor, prompter }
    }
}

/// Variables for any document built on the `projectFields` fragment.
///
/// `$login` is only declared for user and organization roots.
pub(crate) fn project_variables(
    owner: &Owner,
    first_items: usize,
    after_items: Option<&str>,
    first_fields: usize,
) -> Map<String, Value> {
    let mut variables = Map::new();
    if owner.kind != OwnerKind::Viewer {
        variables.insert("login".to_string(), json!(owner.login));
    }
    variables.insert("firstItems".to_string(), json!(first_items));
    variables.insert("afterItems".to_string(), json!(after_items));
    variables.insert("firstFields".to_string(), json!(first_fields));
    variables.insert("afterFields".to_string(), Value::Null);
    variables
}

/// Map errors from a project lookup onto the resolution error kinds.
pub(crate) fn classify_project_errors(
    errors: Vec<GraphQLError>,
    owner: &Owner,
    number: Option<u32>,
) -> ProjectError {
    let target = match number {
        Some(number) => format!("project {number}"),
        None => "projects".to_string(),
    };

    if errors.iter().any(|e| e.is_kind("NOT_FOUND")) {
        ProjectError::NotFound(format!("{target} not found for {}", owner.login))
    } else if errors
        .iter()
        .any(|e| e.is_kind("FORBIDDEN") || e.is_kind("INSUFFICIENT_SCOPES"))
    {
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        ProjectError::AccessDenied(format!(
            "insufficient access to {target} for {}: {}",
            owner.login,
            messages.join(", ")
        ))
    } else {
        ProjectError::Transport(ClientError::graphql(errors))
    }
}

/// Lift a transport error, classifying GraphQL error lists on the way.
pub(crate) fn project_error(err: ClientError, owner: &Owner, number: Option<u32>) -> ProjectError {
    match err {
        ClientError::GraphQL(errors) => classify_project_errors(errors.0, owner, number),
        other => ProjectError::Transport(other),
    }
}
