use serde_json::json;
use tracing::{debug, instrument};

use crate::data::{LoginRef, Owner, OwnerKind, UserOrgData, ViewerOrgsData};

use super::client::ProjectsClient;
use super::error::{ProjectError, ProjectResult};
use super::graphql::{ClientError, GraphQLExecutor};
use super::paginate::{PageLimit, Paginator};
use super::prompt::Prompter;
use super::queries;

impl<E: GraphQLExecutor, P: Prompter> ProjectsClient<E, P> {
    /// Turn a `--login` value into a concrete owner.
    ///
    /// `@me` is answered by the authenticated session and never looked up or
    /// prompted for. A missing login needs a prompt; a named one costs a
    /// single `UserOrgOwner` query.
    #[instrument(skip(self))]
    pub fn resolve_owner(&self, can_prompt: bool, login: &LoginRef) -> ProjectResult<Owner> {
        match login {
            LoginRef::Viewer => Ok(self.executor.viewer()?),
            LoginRef::Named(login) => self.lookup_owner(login),
            LoginRef::Unspecified if can_prompt => self.prompt_owner(),
            LoginRef::Unspecified => Err(ProjectError::AmbiguousReference(
                "owner is required when not running interactively".to_string(),
            )),
        }
    }

    fn lookup_owner(&self, login: &str) -> ProjectResult<Owner> {
        let not_found = || {
            ProjectError::NotFound(format!(
                "could not find user or organization with login {login}"
            ))
        };

        let response =
            self.executor
                .query("UserOrgOwner", queries::USER_ORG_OWNER, json!({ "login": login }))?;

        // Exactly one of the two roots resolves; the other reports NOT_FOUND.
        let (data, errors) = match response.into_partial::<UserOrgData>() {
            Ok(partial) => partial,
            Err(ClientError::GraphQL(errors)) if errors.0.iter().all(|e| e.is_kind("NOT_FOUND")) => {
                return Err(not_found())
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(user) = data.user {
            debug!(login = %user.login, "login is a user");
            return Ok(Owner {
                id: user.id,
                login: user.login,
                kind: OwnerKind::User,
            });
        }
        if let Some(org) = data.organization {
            debug!(login = %org.login, "login is an organization");
            return Ok(Owner {
                id: org.id,
                login: org.login,
                kind: OwnerKind::Organization,
            });
        }

        if errors.iter().all(|e| e.is_kind("NOT_FOUND")) {
            Err(not_found())
        } else {
            Err(ClientError::graphql(errors).into())
        }
    }

    fn prompt_owner(&self) -> ProjectResult<Owner> {
        let candidates = self.viewer_and_orgs()?;
        let options: Vec<String> = candidates.iter().map(|o| o.login.clone()).collect();
        let index = self
            .prompter
            .select("Which owner would you like to use?", &options)?;

        candidates
            .into_iter()
            .nth(index)
            .ok_or_else(|| ProjectError::InvalidInput(format!("no owner at index {index}")))
    }

    /// The viewer first, then every organization the viewer can create projects in.
    fn viewer_and_orgs(&self) -> ProjectResult<Vec<Owner>> {
        let mut pager = Paginator::new(PageLimit::All);
        let mut viewer: Option<Owner> = None;

        while let Some(request) = pager.next_request() {
            let page = self
                .executor
                .query(
                    "ViewerLoginAndOrgs",
                    queries::VIEWER_LOGIN_ORGS,
                    json!({ "first": request.first, "after": request.after }),
                )
                .and_then(|response| response.into_data::<ViewerOrgsData>())
                .map(|data| {
                    let me = data.viewer;
                    viewer.get_or_insert_with(|| Owner {
                        id: me.id,
                        login: me.login,
                        kind: OwnerKind::Viewer,
                    });
                    let orgs = me
                        .organizations
                        .nodes
                        .into_iter()
                        .filter(|org| org.viewer_can_create_projects)
                        .map(|org| Owner {
                            id: org.id,
                            login: org.login,
                            kind: OwnerKind::Organization,
                        })
                        .collect();
                    (orgs, me.organizations.page_info)
                });
            pager.advance(page)?;
        }

        Ok(viewer.into_iter().chain(pager.finish()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::graphql::Response;
    use crate::services::testing::{graphql_error, FakeExecutor, FakePrompter};

    fn client<'a>(
        executor: &'a FakeExecutor,
        prompter: &'a FakePrompter,
    ) -> ProjectsClient<&'a FakeExecutor, &'a FakePrompter> {
        ProjectsClient::new(executor, prompter)
    }

    #[test]
    fn viewer_login_needs_no_lookup_or_prompt() {
        let executor = FakeExecutor::new();
        let prompter = FakePrompter::answering(0);

        for can_prompt in [true, false] {
            let owner = client(&executor, &prompter)
                .resolve_owner(can_prompt, &LoginRef::parse("@me"))
                .unwrap();
            assert_eq!(owner.login, "monalisa");
            assert_eq!(owner.kind, OwnerKind::Viewer);
        }

        assert!(executor.operations().is_empty());
        assert_eq!(prompter.times_asked(), 0);
    }

    #[test]
    fn missing_login_without_prompt_is_ambiguous() {
        let executor = FakeExecutor::new();
        let prompter = FakePrompter::answering(0);

        let err = client(&executor, &prompter)
            .resolve_owner(false, &LoginRef::Unspecified)
            .unwrap_err();

        assert!(matches!(err, ProjectError::AmbiguousReference(_)));
        assert!(executor.operations().is_empty());
        assert_eq!(executor.viewer_calls.get(), 0);
    }

    #[test]
    fn named_login_resolves_to_organization() {
        let executor = FakeExecutor::new().respond_with(
            "UserOrgOwner",
            Response {
                data: Some(json!({ "user": null, "organization": { "id": "O_1", "login": "octo-org" } })),
                errors: vec![graphql_error(Some("NOT_FOUND"), "user", "Could not resolve to a User")],
            },
        );
        let prompter = FakePrompter::answering(0);

        let owner = client(&executor, &prompter)
            .resolve_owner(true, &LoginRef::parse("octo-org"))
            .unwrap();

        assert_eq!(owner.id, "O_1");
        assert_eq!(owner.kind, OwnerKind::Organization);
        assert_eq!(executor.operations(), vec!["UserOrgOwner"]);
        assert_eq!(executor.call(0).variables, json!({ "login": "octo-org" }));
    }

    #[test]
    fn named_login_resolves_to_user() {
        let executor = FakeExecutor::new().respond_with(
            "UserOrgOwner",
            Response {
                data: Some(json!({ "user": { "id": "U_2", "login": "hubot" }, "organization": null })),
                errors: vec![graphql_error(
                    Some("NOT_FOUND"),
                    "organization",
                    "Could not resolve to an Organization",
                )],
            },
        );
        let prompter = FakePrompter::answering(0);

        let owner = client(&executor, &prompter)
            .resolve_owner(false, &LoginRef::parse("hubot"))
            .unwrap();
        assert_eq!(owner.kind, OwnerKind::User);
        assert_eq!(owner.login, "hubot");
    }

    #[test]
    fn unknown_login_is_not_found() {
        let executor = FakeExecutor::new().respond_with(
            "UserOrgOwner",
            Response {
                data: Some(json!({ "user": null, "organization": null })),
                errors: vec![
                    graphql_error(Some("NOT_FOUND"), "user", "no user"),
                    graphql_error(Some("NOT_FOUND"), "organization", "no org"),
                ],
            },
        );
        let prompter = FakePrompter::answering(0);

        let err = client(&executor, &prompter)
            .resolve_owner(true, &LoginRef::parse("ghost"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not find user or organization with login ghost"
        );
    }

    #[test]
    fn other_lookup_errors_are_transport_errors() {
        let executor = FakeExecutor::new().respond_with(
            "UserOrgOwner",
            Response {
                data: None,
                errors: vec![graphql_error(None, "user", "something went wrong")],
            },
        );
        let prompter = FakePrompter::answering(0);

        let err = client(&executor, &prompter)
            .resolve_owner(true, &LoginRef::parse("octo-org"))
            .unwrap_err();
        assert!(matches!(err, ProjectError::Transport(_)));
    }

    #[test]
    fn prompt_offers_viewer_and_project_capable_orgs() {
        let executor = FakeExecutor::new()
            .respond(
                "ViewerLoginAndOrgs",
                json!({ "viewer": { "id": "U_viewer", "login": "monalisa", "organizations": {
                    "pageInfo": { "hasNextPage": true, "endCursor": "o1" },
                    "nodes": [
                        { "id": "O_1", "login": "octo-org", "viewerCanCreateProjects": true },
                        { "id": "O_2", "login": "read-only", "viewerCanCreateProjects": false }
                    ]
                } } }),
            )
            .respond(
                "ViewerLoginAndOrgs",
                json!({ "viewer": { "id": "U_viewer", "login": "monalisa", "organizations": {
                    "pageInfo": { "hasNextPage": false, "endCursor": null },
                    "nodes": [ { "id": "O_3", "login": "acme", "viewerCanCreateProjects": true } ]
                } } }),
            );
        let prompter = FakePrompter::answering(2);

        let owner = client(&executor, &prompter)
            .resolve_owner(true, &LoginRef::Unspecified)
            .unwrap();

        assert_eq!(owner.login, "acme");
        assert_eq!(owner.kind, OwnerKind::Organization);
        let asked = prompter.asked.borrow();
        assert_eq!(asked[0].0, "Which owner would you like to use?");
        assert_eq!(asked[0].1, vec!["monalisa", "octo-org", "acme"]);
        assert_eq!(executor.call(1).variables["after"], json!("o1"));
    }
}
