use serde::Deserialize;

use super::models::ItemType;

/// Default cap for `item-list` when `--limit` is not given.
pub const LIMIT_DEFAULT: usize = 30;

/// The API refuses connection pages larger than this.
pub const MAX_PAGE_SIZE: usize = 100;

/// Login that stands for the authenticated caller.
pub const VIEWER_LOGIN: &str = "@me";

// GraphQL response types
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(rename = "totalCount", default)]
    pub total_count: usize,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    pub id: String,
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct ViewerData {
    pub viewer: Identity,
}

#[derive(Debug, Deserialize)]
pub struct UserOrgData {
    pub user: Option<Identity>,
    pub organization: Option<Identity>,
}

#[derive(Debug, Deserialize)]
pub struct ViewerOrgsData {
    pub viewer: ViewerOrgs,
}

#[derive(Debug, Deserialize)]
pub struct ViewerOrgs {
    pub id: String,
    pub login: String,
    pub organizations: Connection<OrgNode>,
}

#[derive(Debug, Deserialize)]
pub struct OrgNode {
    pub id: String,
    pub login: String,
    #[serde(rename = "viewerCanCreateProjects", default)]
    pub viewer_can_create_projects: bool,
}

/// `owner: viewer|user|organization { project: projectV2(number:) }`
#[derive(Debug, Deserialize)]
pub struct OwnerProjectData {
    pub owner: Option<OwnerProject>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerProject {
    pub project: Option<ProjectNode>,
}

/// `owner: viewer|user|organization { projects: projectsV2(...) }`
#[derive(Debug, Deserialize)]
pub struct OwnerProjectsData {
    pub owner: Option<OwnerProjects>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerProjects {
    pub projects: Connection<ProjectNode>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteProjectData {
    #[serde(rename = "deleteProjectV2")]
    pub delete_project: Option<DeletedProject>,
}

#[derive(Debug, Deserialize)]
pub struct DeletedProject {
    #[serde(rename = "projectV2")]
    pub project: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectNode {
    pub id: String,
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "shortDescription")]
    pub short_description: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub closed: bool,
    pub readme: Option<String>,
    pub owner: Option<ProjectOwnerNode>,
    pub items: Option<Connection<ItemNode>>,
    pub fields: Option<Connection<FieldNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum ProjectOwnerNode {
    User { login: String },
    Organization { login: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct FieldNode {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ItemNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub content: Option<ItemContent>,
    #[serde(rename = "fieldValues")]
    pub field_values: Option<Connection<FieldValueNode>>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryRef {
    #[serde(rename = "nameWithOwner")]
    pub name_with_owner: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum ItemContent {
    DraftIssue {
        title: String,
        #[serde(default)]
        body: String,
    },
    Issue {
        title: String,
        #[serde(default)]
        body: String,
        number: u32,
        url: String,
        repository: RepositoryRef,
    },
    PullRequest {
        title: String,
        #[serde(default)]
        body: String,
        number: u32,
        url: String,
        repository: RepositoryRef,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct FieldRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NameNode {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TitleNode {
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum FieldValueNode {
    #[serde(rename = "ProjectV2ItemFieldTextValue")]
    Text {
        text: Option<String>,
        field: FieldRef,
    },
    #[serde(rename = "ProjectV2ItemFieldNumberValue")]
    Number {
        number: Option<f64>,
        field: FieldRef,
    },
    #[serde(rename = "ProjectV2ItemFieldDateValue")]
    Date {
        date: Option<String>,
        field: FieldRef,
    },
    #[serde(rename = "ProjectV2ItemFieldSingleSelectValue")]
    SingleSelect {
        name: Option<String>,
        field: FieldRef,
    },
    #[serde(rename = "ProjectV2ItemFieldIterationValue")]
    Iteration {
        title: String,
        #[serde(rename = "startDate")]
        start_date: String,
        duration: u32,
        field: FieldRef,
    },
    #[serde(rename = "ProjectV2ItemFieldLabelValue")]
    Labels {
        labels: Option<Connection<NameNode>>,
        field: FieldRef,
    },
    #[serde(rename = "ProjectV2ItemFieldMilestoneValue")]
    Milestone {
        milestone: Option<TitleNode>,
        field: FieldRef,
    },
    #[serde(other)]
    Other,
}
