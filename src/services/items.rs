use tracing::{debug, instrument};

use crate::data::{Owner, PageInfo, Project, ProjectItem};

use super::client::{project_variables, ProjectsClient};
use super::error::{ProjectError, ProjectResult};
use super::graphql::GraphQLExecutor;
use super::paginate::{PageLimit, Paginator};
use super::project::project_not_found;
use super::prompt::Prompter;

impl<E: GraphQLExecutor, P: Prompter> ProjectsClient<E, P> {
    /// Fetch at most `limit` items of project `number`, across as many pages
    /// as that takes.
    ///
    /// Items keep the server's order. `limit == 0` still costs one request,
    /// for the project header, and returns no items. Any failing page fails
    /// the whole fetch; nothing partial is returned.
    #[instrument(skip(self, owner), fields(owner = %owner.login))]
    pub fn fetch_items(&self, owner: &Owner, number: u32, limit: usize) -> ProjectResult<Project> {
        let mut pager: Paginator<ProjectItem> = Paginator::new(PageLimit::AtMost(limit));
        let mut header: Option<Project> = None;

        while let Some(request) = pager.next_request() {
            debug!(first = request.first, after = ?request.after, have = pager.len(), "fetching item page");

            let variables = project_variables(owner, request.first, request.after.as_deref(), 0);
            // Only the first page decides whether the project exists.
            let node = if header.is_none() {
                self.lookup_project_node(owner, number, variables)
            } else {
                self.query_project_node(owner, number, variables)
                    .map_err(ProjectError::Transport)
                    .and_then(|node| node.ok_or_else(|| project_not_found(owner, number)))
            };
            let page = node.map(|mut node| {
                if header.is_none() {
                    header = Some(Project::from_header(&node));
                }
                match node.items.take() {
                    Some(connection) => (
                        connection.nodes.into_iter().map(ProjectItem::from).collect(),
                        connection.page_info,
                    ),
                    None => (Vec::new(), PageInfo::default()),
                }
            });
            pager.advance(page)?;
        }

        debug!(state = ?pager.state(), count = pager.len(), "item pagination finished");

        let mut project = header.ok_or_else(|| project_not_found(owner, number))?;
        project.items = pager.finish();
        Ok(project)
    }
}
