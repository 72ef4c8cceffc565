//! Scripted stand-ins for the executor and prompter.

use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;

use crate::data::{Owner, OwnerKind};

use super::graphql::{ClientError, GraphQLError, GraphQLExecutor, Response};
use super::prompt::Prompter;

#[derive(Debug, Clone)]
pub struct Call {
    pub operation: String,
    pub variables: Value,
    pub mutation: bool,
}

pub struct FakeExecutor {
    viewer: Owner,
    script: RefCell<VecDeque<(String, Result<Response, ClientError>)>>,
    pub calls: RefCell<Vec<Call>>,
    pub viewer_calls: Cell<usize>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        FakeExecutor {
            viewer: viewer(),
            script: RefCell::new(VecDeque::new()),
            calls: RefCell::new(Vec::new()),
            viewer_calls: Cell::new(0),
        }
    }

    /// Answer the next `operation` with `data`.
    pub fn respond(self, operation: &str, data: Value) -> Self {
        self.respond_with(operation, Response::new(data))
    }

    pub fn respond_with(self, operation: &str, response: Response) -> Self {
        self.script
            .borrow_mut()
            .push_back((operation.to_string(), Ok(response)));
        self
    }

    pub fn fail(self, operation: &str, err: ClientError) -> Self {
        self.script
            .borrow_mut()
            .push_back((operation.to_string(), Err(err)));
        self
    }

    pub fn operations(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|c| c.operation.clone())
            .collect()
    }

    pub fn call(&self, index: usize) -> Call {
        self.calls.borrow()[index].clone()
    }

    fn next(&self, operation: &str, variables: Value, mutation: bool) -> Result<Response, ClientError> {
        self.calls.borrow_mut().push(Call {
            operation: operation.to_string(),
            variables,
            mutation,
        });
        let (expected, outcome) = self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected operation {operation}"));
        assert_eq!(expected, operation, "operations ran out of order");
        outcome
    }
}

impl GraphQLExecutor for FakeExecutor {
    fn query(&self, operation: &str, _document: &str, variables: Value) -> Result<Response, ClientError> {
        self.next(operation, variables, false)
    }

    fn mutate(&self, operation: &str, _document: &str, variables: Value) -> Result<Response, ClientError> {
        self.next(operation, variables, true)
    }

    fn viewer(&self) -> Result<Owner, ClientError> {
        self.viewer_calls.set(self.viewer_calls.get() + 1);
        Ok(self.viewer.clone())
    }
}

/// Picks a fixed option and remembers what it was shown.
pub struct FakePrompter {
    answer: usize,
    pub asked: RefCell<Vec<(String, Vec<String>)>>,
}

impl FakePrompter {
    pub fn answering(answer: usize) -> Self {
        FakePrompter {
            answer,
            asked: RefCell::new(Vec::new()),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.borrow().len()
    }
}

impl Prompter for FakePrompter {
    fn select(&self, message: &str, options: &[String]) -> io::Result<usize> {
        self.asked
            .borrow_mut()
            .push((message.to_string(), options.to_vec()));
        Ok(self.answer)
    }
}

pub fn viewer() -> Owner {
    Owner {
        id: "U_viewer".to_string(),
        login: "monalisa".to_string(),
        kind: OwnerKind::Viewer,
    }
}

pub fn org(login: &str) -> Owner {
    Owner {
        id: format!("O_{login}"),
        login: login.to_string(),
        kind: OwnerKind::Organization,
    }
}

pub fn graphql_error(kind: Option<&str>, root: &str, message: &str) -> GraphQLError {
    GraphQLError {
        message: message.to_string(),
        kind: kind.map(str::to_string),
        path: vec![json!(root)],
    }
}

/// A `projectFields` node with no items.
pub fn project_node(number: u32, title: &str, total_items: usize) -> Value {
    json!({
        "id": format!("PVT_{number}"),
        "number": number,
        "title": title,
        "url": format!("https://github.com/users/monalisa/projects/{number}"),
        "shortDescription": null,
        "public": false,
        "closed": false,
        "readme": null,
        "owner": { "__typename": "User", "login": "monalisa" },
        "items": {
            "totalCount": total_items,
            "pageInfo": { "hasNextPage": false, "endCursor": null },
            "nodes": []
        },
        "fields": {
            "totalCount": 3,
            "pageInfo": { "hasNextPage": false, "endCursor": null },
            "nodes": []
        }
    })
}

/// Issue items `start..start + count`, drafts on every third index.
pub fn item_nodes(start: usize, count: usize) -> Vec<Value> {
    (start..start + count)
        .map(|i| {
            if i % 3 == 2 {
                json!({
                    "id": format!("PVTI_{i}"),
                    "type": "DRAFT_ISSUE",
                    "content": { "__typename": "DraftIssue", "title": format!("draft {i}"), "body": "" },
                    "fieldValues": { "nodes": [] }
                })
            } else {
                json!({
                    "id": format!("PVTI_{i}"),
                    "type": "ISSUE",
                    "content": {
                        "__typename": "Issue",
                        "title": format!("issue {i}"),
                        "body": "",
                        "number": i + 1,
                        "url": format!("https://github.com/octo/app/issues/{}", i + 1),
                        "repository": { "nameWithOwner": "octo/app" }
                    },
                    "fieldValues": { "nodes": [] }
                })
            }
        })
        .collect()
}

/// One page of a project lookup, wrapped the way the owner roots alias it.
pub fn item_page(number: u32, total: usize, nodes: Vec<Value>, next: Option<&str>) -> Value {
    let mut project = project_node(number, "Roadmap", total);
    project["items"] = json!({
        "totalCount": total,
        "pageInfo": { "hasNextPage": next.is_some(), "endCursor": next },
        "nodes": nodes
    });
    json!({ "owner": { "project": project } })
}
