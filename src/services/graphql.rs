//! The boundary between the resolvers and whatever actually talks to GitHub.
//!
//! Everything above this module only sees [`GraphQLExecutor`], so tests can
//! script responses without a network.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::data::Owner;

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub path: Vec<Value>,
}

impl GraphQLError {
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }

    /// Whether this error has the given type and its path starts at `root`.
    pub fn matches(&self, kind: &str, root: &str) -> bool {
        self.is_kind(kind) && self.path.first().and_then(Value::as_str) == Some(root)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphQLErrors(pub Vec<GraphQLError>);

impl fmt::Display for GraphQLErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join(", "))
    }
}

/// Failures of the transport itself, independent of what was asked.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("GitHub API request failed: {0}")]
    Request(#[from] octocrab::Error),

    #[error("GraphQL: {0}")]
    GraphQL(GraphQLErrors),

    #[error("failed to decode GitHub response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no GitHub token found; set GH_TOKEN or run 'gh auth login'")]
    NotAuthenticated,

    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl ClientError {
    pub fn graphql(errors: Vec<GraphQLError>) -> Self {
        ClientError::GraphQL(GraphQLErrors(errors))
    }
}

/// A GraphQL response envelope: data and errors can both be present.
#[derive(Debug, Default, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

impl Response {
    pub fn new(data: Value) -> Self {
        Response {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Decode `data`, treating any reported error as a failure.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        if !self.errors.is_empty() {
            return Err(ClientError::graphql(self.errors));
        }
        Ok(serde_json::from_value(self.data.unwrap_or(Value::Null))?)
    }

    /// Decode whatever data arrived together with the errors.
    pub fn into_partial<T: DeserializeOwned>(
        self,
    ) -> Result<(T, Vec<GraphQLError>), ClientError> {
        match self.data {
            Some(data) if !data.is_null() => Ok((serde_json::from_value(data)?, self.errors)),
            _ if !self.errors.is_empty() => Err(ClientError::graphql(self.errors)),
            _ => Ok((serde_json::from_value(Value::Null)?, self.errors)),
        }
    }
}

/// Executes named GraphQL operations and knows who is authenticated.
pub trait GraphQLExecutor {
    fn query(&self, operation: &str, document: &str, variables: Value)
        -> Result<Response, ClientError>;

    /// Mutations are sent exactly once and never retried.
    fn mutate(&self, operation: &str, document: &str, variables: Value)
        -> Result<Response, ClientError>;

    /// The authenticated caller, as an `Owner` of kind `Viewer`.
    fn viewer(&self) -> Result<Owner, ClientError>;
}

impl<T: GraphQLExecutor + ?Sized> GraphQLExecutor for &T {
    fn query(
        &self,
        operation: &str,
        document: &str,
        variables: Value,
    ) -> Result<Response, ClientError> {
        (**self).query(operation, document, variables)
    }

    fn mutate(
        &self,
        operation: &str,
        document: &str,
        variables: Value,
    ) -> Result<Response, ClientError> {
        (**self).mutate(operation, document, variables)
    }

    fn viewer(&self) -> Result<Owner, ClientError> {
        (**self).viewer()
    }
}
