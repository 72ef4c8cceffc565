use anyhow::Result;
use std::io::Write;
use tracing::{debug, instrument};

use crate::data::LoginRef;
use crate::services::{GraphQLExecutor, ProjectError, Prompter, ProjectsClient};
use crate::view::json::detailed_items_json;
use crate::view::table::render_items;

use super::{OutputFormat, Streams};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListOpts {
    pub login: LoginRef,
    pub number: Option<u32>,
    pub limit: usize,
    pub format: Option<OutputFormat>,
}

/// List up to `limit` items of a project as a table or JSON.
#[instrument(skip_all, fields(number = ?opts.number, limit = opts.limit))]
pub fn run_item_list<E, P>(
    client: &ProjectsClient<E, P>,
    opts: &ItemListOpts,
    streams: Streams,
    out: &mut impl Write,
) -> Result<()>
where
    E: GraphQLExecutor,
    P: Prompter,
{
    let owner = client.resolve_owner(streams.can_prompt, &opts.login)?;
    let number = match opts.number {
        Some(number) => number,
        None => {
            client
                .resolve_project(streams.can_prompt, &owner, None, false)?
                .number
        }
    };

    let project = client.fetch_items(&owner, number, opts.limit)?;
    debug!(fetched = project.items.len(), total = project.item_count, "items fetched");

    if opts.format == Some(OutputFormat::Json) {
        write!(out, "{}", detailed_items_json(&project)?)?;
        return Ok(());
    }

    if project.items.is_empty() {
        return Err(ProjectError::NoResults(format!(
            "Project {} for login {} has no items",
            number, owner.login
        ))
        .into());
    }

    render_items(out, &project.items, streams.is_tty, streams.width)?;
    Ok(())
}
