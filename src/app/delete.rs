use anyhow::Result;
use std::io::Write;
use tracing::instrument;

use crate::data::LoginRef;
use crate::services::{GraphQLExecutor, Prompter, ProjectsClient};
use crate::view::json::project_json;

use super::{OutputFormat, Streams};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOpts {
    pub login: LoginRef,
    pub number: Option<u32>,
    pub format: Option<OutputFormat>,
}

/// Resolve the owner and project, then delete it.
#[instrument(skip_all, fields(number = ?opts.number))]
pub fn run_delete<E, P>(
    client: &ProjectsClient<E, P>,
    opts: &DeleteOpts,
    streams: Streams,
    out: &mut impl Write,
) -> Result<()>
where
    E: GraphQLExecutor,
    P: Prompter,
{
    let owner = client.resolve_owner(streams.can_prompt, &opts.login)?;
    let project = client.resolve_project(streams.can_prompt, &owner, opts.number, false)?;
    client.delete_project(&owner, &project)?;

    match opts.format {
        Some(OutputFormat::Json) => writeln!(out, "{}", project_json(&project)?)?,
        None if streams.is_tty => writeln!(out, "Deleted project")?,
        None => {}
    }
    Ok(())
}
