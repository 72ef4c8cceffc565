pub mod models;
pub mod types;

pub use models::{
    FieldValue, FieldValueKind, ItemType, LoginRef, Owner, OwnerKind, Project, ProjectField,
    ProjectItem,
};
pub use types::{
    Connection, DeleteProjectData, Identity, ItemNode, OwnerProjectData, OwnerProjectsData,
    PageInfo, ProjectNode, UserOrgData, ViewerData, ViewerOrgsData, LIMIT_DEFAULT, MAX_PAGE_SIZE,
    VIEWER_LOGIN,
};
