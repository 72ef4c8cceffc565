pub mod app;
pub mod config;
pub mod data;
pub mod services;
pub mod utils;
pub mod view;

pub use app::{run_delete, run_item_list, DeleteOpts, ItemListOpts, OutputFormat, Streams};
pub use config::Config;
pub use data::{LoginRef, Owner, Project, ProjectItem};
pub use services::{ClientError, GithubClient, ProjectError, ProjectsClient};
