use serde::Deserialize;

use super::types::{
    FieldValueNode, ItemContent, ItemNode, ProjectNode, ProjectOwnerNode, VIEWER_LOGIN,
};

/// How the user referred to an owner on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginRef {
    /// `@me`
    Viewer,
    /// No `--login` given.
    Unspecified,
    Named(String),
}

impl LoginRef {
    pub fn parse(login: &str) -> Self {
        match login.trim() {
            "" => LoginRef::Unspecified,
            VIEWER_LOGIN => LoginRef::Viewer,
            other => LoginRef::Named(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    /// The authenticated user, addressed through the `viewer` root.
    Viewer,
    User,
    Organization,
}

impl OwnerKind {
    /// Type name as GitHub reports it.
    pub fn type_name(self) -> &'static str {
        match self {
            OwnerKind::Viewer | OwnerKind::User => "User",
            OwnerKind::Organization => "Organization",
        }
    }
}

/// A resolved user or organization. `login` is never `@me`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: String,
    pub login: String,
    pub kind: OwnerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Issue,
    PullRequest,
    DraftIssue,
    #[serde(other)]
    Redacted,
}

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Issue => "Issue",
            ItemType::PullRequest => "PullRequest",
            ItemType::DraftIssue => "DraftIssue",
            ItemType::Redacted => "Redacted",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValueKind {
    Text(String),
    Number(f64),
    Date(String),
    SingleSelect(String),
    Iteration {
        title: String,
        start_date: String,
        duration: u32,
    },
    Labels(Vec<String>),
    Milestone(String),
}

/// A custom field value set on an item, keyed by the field's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub field: String,
    pub value: FieldValueKind,
}

impl FieldValue {
    fn from_node(node: FieldValueNode) -> Option<Self> {
        let (field, value) = match node {
            FieldValueNode::Text { text, field } => (field, FieldValueKind::Text(text?)),
            FieldValueNode::Number { number, field } => (field, FieldValueKind::Number(number?)),
            FieldValueNode::Date { date, field } => (field, FieldValueKind::Date(date?)),
            FieldValueNode::SingleSelect { name, field } => {
                (field, FieldValueKind::SingleSelect(name?))
            }
            FieldValueNode::Iteration {
                title,
                start_date,
                duration,
                field,
            } => (
                field,
                FieldValueKind::Iteration {
                    title,
                    start_date,
                    duration,
                },
            ),
            FieldValueNode::Labels { labels, field } => {
                let names = labels?.nodes.into_iter().map(|l| l.name).collect();
                (field, FieldValueKind::Labels(names))
            }
            FieldValueNode::Milestone { milestone, field } => {
                (field, FieldValueKind::Milestone(milestone?.title))
            }
            FieldValueNode::Other => return None,
        };
        Some(FieldValue {
            field: field.name,
            value,
        })
    }
}

/// One entry of a project. `number == 0` means the item has no issue or PR number.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectItem {
    pub id: String,
    pub kind: ItemType,
    pub title: String,
    pub number: u32,
    pub repository: String,
    pub body: String,
    pub url: Option<String>,
    pub field_values: Vec<FieldValue>,
}

impl ProjectItem {
    /// The Number column: empty for items without a tracker number.
    pub fn number_display(&self) -> String {
        if self.number == 0 {
            String::new()
        } else {
            self.number.to_string()
        }
    }
}

impl From<ItemNode> for ProjectItem {
    fn from(node: ItemNode) -> Self {
        let (title, body, number, repository, url) = match node.content {
            Some(ItemContent::DraftIssue { title, body }) => {
                (title, body, 0, String::new(), None)
            }
            Some(ItemContent::Issue {
                title,
                body,
                number,
                url,
                repository,
            })
            | Some(ItemContent::PullRequest {
                title,
                body,
                number,
                url,
                repository,
            }) => (title, body, number, repository.name_with_owner, Some(url)),
            Some(ItemContent::Other) | None => {
                (String::new(), String::new(), 0, String::new(), None)
            }
        };

        let field_values = node
            .field_values
            .map(|c| c.nodes)
            .unwrap_or_default()
            .into_iter()
            .filter_map(FieldValue::from_node)
            .collect();

        ProjectItem {
            id: node.id,
            kind: node.kind,
            title,
            number,
            repository,
            body,
            url,
            field_values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectField {
    pub id: String,
    pub name: String,
}

/// A Projects (v2) board. `number` is never 0 once resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub number: u32,
    pub title: String,
    pub url: String,
    pub short_description: String,
    pub public: bool,
    pub closed: bool,
    pub readme: String,
    pub owner_login: String,
    pub owner_type: String,
    pub item_count: usize,
    pub field_count: usize,
    pub fields: Vec<ProjectField>,
    pub items: Vec<ProjectItem>,
}

impl Project {
    /// Everything but the items.
    pub fn from_header(node: &ProjectNode) -> Self {
        let (owner_type, owner_login) = match &node.owner {
            Some(ProjectOwnerNode::User { login }) => ("User", login.clone()),
            Some(ProjectOwnerNode::Organization { login }) => ("Organization", login.clone()),
            Some(ProjectOwnerNode::Other) | None => ("", String::new()),
        };

        Project {
            id: node.id.clone(),
            number: node.number,
            title: node.title.clone(),
            url: node.url.clone(),
            short_description: node.short_description.clone().unwrap_or_default(),
            public: node.public,
            closed: node.closed,
            readme: node.readme.clone().unwrap_or_default(),
            owner_login,
            owner_type: owner_type.to_string(),
            item_count: node.items.as_ref().map_or(0, |c| c.total_count),
            field_count: node.fields.as_ref().map_or(0, |c| c.total_count),
            fields: node
                .fields
                .iter()
                .flat_map(|c| c.nodes.iter())
                .filter_map(|f| {
                    Some(ProjectField {
                        id: f.id.clone()?,
                        name: f.name.clone()?,
                    })
                })
                .collect(),
            items: Vec::new(),
        }
    }
}

impl From<ProjectNode> for Project {
    fn from(mut node: ProjectNode) -> Self {
        let items = node
            .items
            .as_mut()
            .map(|c| std::mem::take(&mut c.nodes))
            .unwrap_or_default();
        let mut project = Project::from_header(&node);
        project.items = items.into_iter().map(ProjectItem::from).collect();
        project
    }
}
