use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

use crate::data::{Owner, OwnerProjectData, OwnerProjectsData, Project, ProjectNode, MAX_PAGE_SIZE};

use super::client::{project_error, project_variables, ProjectsClient};
use super::error::{ProjectError, ProjectResult};
use super::graphql::{ClientError, GraphQLExecutor};
use super::paginate::{PageLimit, Paginator};
use super::prompt::Prompter;
use super::queries;

pub(crate) fn project_not_found(owner: &Owner, number: u32) -> ProjectError {
    ProjectError::NotFound(format!("project {number} not found for {}", owner.login))
}

impl<E: GraphQLExecutor, P: Prompter> ProjectsClient<E, P> {
    /// Turn an optional project number into a project of `owner`.
    ///
    /// Items are never requested here. Field definitions come along only
    /// when `include_fields` is set; otherwise the lookup is header-only.
    #[instrument(skip(self, owner), fields(owner = %owner.login))]
    pub fn resolve_project(
        &self,
        can_prompt: bool,
        owner: &Owner,
        number: Option<u32>,
        include_fields: bool,
    ) -> ProjectResult<Project> {
        let first_fields = if include_fields { MAX_PAGE_SIZE } else { 0 };

        if let Some(number) = number {
            let variables = project_variables(owner, 0, None, first_fields);
            return self
                .lookup_project_node(owner, number, variables)
                .map(Project::from);
        }

        if !can_prompt {
            return Err(ProjectError::AmbiguousReference(
                "project number is required when not running interactively".to_string(),
            ));
        }

        let projects = self.list_projects(owner, first_fields)?;
        if projects.is_empty() {
            return Err(ProjectError::NotFound(format!(
                "no projects found for {}",
                owner.login
            )));
        }

        let options: Vec<String> = projects
            .iter()
            .map(|p| format!("{} (#{})", p.title, p.number))
            .collect();
        let index = self
            .prompter
            .select("Which project would you like to use?", &options)?;

        projects
            .into_iter()
            .nth(index)
            .ok_or_else(|| ProjectError::InvalidInput(format!("no project at index {index}")))
    }

    /// One `projectV2(number:)` lookup, with its errors classified.
    pub(crate) fn lookup_project_node(
        &self,
        owner: &Owner,
        number: u32,
        variables: Map<String, Value>,
    ) -> ProjectResult<ProjectNode> {
        self.query_project_node(owner, number, variables)
            .map_err(|err| project_error(err, owner, Some(number)))?
            .ok_or_else(|| project_not_found(owner, number))
    }

    /// The raw round trip under the owner's root; errors come back untouched.
    pub(crate) fn query_project_node(
        &self,
        owner: &Owner,
        number: u32,
        mut variables: Map<String, Value>,
    ) -> Result<Option<ProjectNode>, ClientError> {
        variables.insert("number".to_string(), json!(number));
        let (operation, document) = queries::project_lookup(owner.kind);

        let data: OwnerProjectData = self
            .executor
            .query(&operation, &document, Value::Object(variables))?
            .into_data()?;
        Ok(data.owner.and_then(|o| o.project))
    }

    fn list_projects(&self, owner: &Owner, first_fields: usize) -> ProjectResult<Vec<Project>> {
        let (operation, document) = queries::project_list(owner.kind);
        let mut pager = Paginator::new(PageLimit::All);

        while let Some(request) = pager.next_request() {
            let mut variables = project_variables(owner, 0, None, first_fields);
            variables.insert("first".to_string(), json!(request.first));
            variables.insert("after".to_string(), json!(request.after));

            let page = self
                .executor
                .query(&operation, &document, Value::Object(variables))
                .and_then(|response| response.into_data::<OwnerProjectsData>())
                .map_err(|err| project_error(err, owner, None))
                .and_then(|data| {
                    data.owner.map(|o| o.projects).ok_or_else(|| {
                        ProjectError::NotFound(format!("no projects found for {}", owner.login))
                    })
                })
                .map(|connection| {
                    let projects = connection.nodes.into_iter().map(Project::from).collect();
                    (projects, connection.page_info)
                });
            pager.advance(page)?;
        }

        debug!(count = pager.len(), "listed projects");
        Ok(pager.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OwnerKind;
    use crate::services::graphql::Response;
    use crate::services::testing::{
        graphql_error, org, project_node, viewer, FakeExecutor, FakePrompter,
    };

    fn client<'a>(
        executor: &'a FakeExecutor,
        prompter: &'a FakePrompter,
    ) -> ProjectsClient<&'a FakeExecutor, &'a FakePrompter> {
        ProjectsClient::new(executor, prompter)
    }

    #[test]
    fn direct_lookup_is_header_only() {
        let executor = FakeExecutor::new().respond(
            "ViewerProject",
            json!({ "owner": { "project": project_node(1, "Roadmap", 12) } }),
        );
        let prompter = FakePrompter::answering(0);

        let project = client(&executor, &prompter)
            .resolve_project(false, &viewer(), Some(1), false)
            .unwrap();

        assert_eq!(project.id, "PVT_1");
        assert_eq!(project.number, 1);
        assert_eq!(project.item_count, 12);
        assert!(project.items.is_empty());

        let variables = executor.call(0).variables;
        assert_eq!(variables["number"], json!(1));
        assert_eq!(variables["firstItems"], json!(0));
        assert_eq!(variables["firstFields"], json!(0));
        assert_eq!(variables["afterItems"], Value::Null);
        assert_eq!(variables["afterFields"], Value::Null);
        assert_eq!(prompter.times_asked(), 0);
    }

    #[test]
    fn include_fields_requests_field_definitions() {
        let mut node = project_node(4, "Board", 0);
        node["fields"]["nodes"] = json!([
            { "id": "F_1", "name": "Title" },
            { "id": "F_2", "name": "Status" }
        ]);
        let executor = FakeExecutor::new().respond("OrgProject", json!({ "owner": { "project": node } }));
        let prompter = FakePrompter::answering(0);

        let project = client(&executor, &prompter)
            .resolve_project(false, &org("octo-org"), Some(4), true)
            .unwrap();

        assert_eq!(executor.call(0).variables["firstFields"], json!(MAX_PAGE_SIZE));
        assert_eq!(executor.call(0).variables["login"], json!("octo-org"));
        let names: Vec<&str> = project.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Title", "Status"]);
    }

    #[test]
    fn missing_project_is_not_found() {
        let executor = FakeExecutor::new().respond_with(
            "OrgProject",
            Response {
                data: Some(json!({ "owner": { "project": null } })),
                errors: vec![graphql_error(
                    Some("NOT_FOUND"),
                    "owner",
                    "Could not resolve to a ProjectV2 with the number 9.",
                )],
            },
        );
        let prompter = FakePrompter::answering(0);

        let err = client(&executor, &prompter)
            .resolve_project(true, &org("octo-org"), Some(9), false)
            .unwrap_err();
        assert_eq!(err.to_string(), "project 9 not found for octo-org");
    }

    #[test]
    fn forbidden_project_is_access_denied() {
        let executor = FakeExecutor::new().respond_with(
            "OrgProject",
            Response {
                data: Some(json!({ "owner": { "project": null } })),
                errors: vec![graphql_error(
                    Some("FORBIDDEN"),
                    "owner",
                    "Resource not accessible by integration",
                )],
            },
        );
        let prompter = FakePrompter::answering(0);

        let err = client(&executor, &prompter)
            .resolve_project(true, &org("octo-org"), Some(2), false)
            .unwrap_err();
        assert!(matches!(err, ProjectError::AccessDenied(_)));
    }

    #[test]
    fn missing_number_without_prompt_is_ambiguous() {
        let executor = FakeExecutor::new();
        let prompter = FakePrompter::answering(0);

        let err = client(&executor, &prompter)
            .resolve_project(false, &viewer(), None, false)
            .unwrap_err();
        assert!(matches!(err, ProjectError::AmbiguousReference(_)));
        assert!(executor.operations().is_empty());
    }

    #[test]
    fn missing_number_lists_then_prompts() {
        let executor = FakeExecutor::new().respond(
            "UserProjectList",
            json!({ "owner": { "projects": {
                "totalCount": 2,
                "pageInfo": { "hasNextPage": false, "endCursor": null },
                "nodes": [ project_node(1, "Roadmap", 3), project_node(7, "Bugs", 0) ]
            } } }),
        );
        let prompter = FakePrompter::answering(1);
        let owner = Owner {
            kind: OwnerKind::User,
            ..viewer()
        };

        let project = client(&executor, &prompter)
            .resolve_project(true, &owner, None, false)
            .unwrap();

        assert_eq!(project.number, 7);
        let asked = prompter.asked.borrow();
        assert_eq!(asked[0].0, "Which project would you like to use?");
        assert_eq!(asked[0].1, vec!["Roadmap (#1)", "Bugs (#7)"]);
        assert_eq!(executor.call(0).variables["firstItems"], json!(0));
    }

    #[test]
    fn owner_without_projects_is_not_found() {
        let executor = FakeExecutor::new().respond(
            "ViewerProjectList",
            json!({ "owner": { "projects": {
                "totalCount": 0,
                "pageInfo": { "hasNextPage": false, "endCursor": null },
                "nodes": []
            } } }),
        );
        let prompter = FakePrompter::answering(0);

        let err = client(&executor, &prompter)
            .resolve_project(true, &viewer(), None, false)
            .unwrap_err();
        assert_eq!(err.to_string(), "no projects found for monalisa");
        assert_eq!(prompter.times_asked(), 0);
    }
}
