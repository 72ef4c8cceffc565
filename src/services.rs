pub mod client;
pub mod error;
pub mod github;
pub mod graphql;
mod items;
mod mutation;
mod owner;
pub mod paginate;
mod project;
pub mod prompt;
pub mod queries;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ProjectsClient;
pub use error::{ProjectError, ProjectResult};
pub use github::{get_github_token, GithubClient};
pub use graphql::{ClientError, GraphQLExecutor, Response};
pub use mutation::DeleteProjectInput;
pub use prompt::{NoPrompt, Prompter};
pub use search::filter_options;
