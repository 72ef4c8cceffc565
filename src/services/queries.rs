//! GraphQL documents for the Projects (v2) API.
//!
//! Every project-shaped response goes through `projectFields`, whose nested
//! `items`/`fields` connections are driven by the `$firstItems`/`$afterItems`
//! and `$firstFields`/`$afterFields` variables. Callers that only need the
//! header pass zero counts.

use crate::data::OwnerKind;

const PROJECT_FRAGMENT: &str = r#"
fragment projectFields on ProjectV2 {
    id
    number
    title
    url
    shortDescription
    public
    closed
    readme
    owner {
        __typename
        ... on User { login }
        ... on Organization { login }
    }
    items(first: $firstItems, after: $afterItems) {
        totalCount
        pageInfo { hasNextPage endCursor }
        nodes { ...itemFields }
    }
    fields(first: $firstFields, after: $afterFields) {
        totalCount
        pageInfo { hasNextPage endCursor }
        nodes {
            ... on ProjectV2FieldCommon { id name }
        }
    }
}

fragment itemFields on ProjectV2Item {
    id
    type
    content {
        __typename
        ... on DraftIssue { title body }
        ... on Issue { title body number url repository { nameWithOwner } }
        ... on PullRequest { title body number url repository { nameWithOwner } }
    }
    fieldValues(first: 100) {
        nodes {
            __typename
            ... on ProjectV2ItemFieldTextValue { text field { ...fieldName } }
            ... on ProjectV2ItemFieldNumberValue { number field { ...fieldName } }
            ... on ProjectV2ItemFieldDateValue { date field { ...fieldName } }
            ... on ProjectV2ItemFieldSingleSelectValue { name field { ...fieldName } }
            ... on ProjectV2ItemFieldIterationValue { title startDate duration field { ...fieldName } }
            ... on ProjectV2ItemFieldLabelValue { labels(first: 20) { nodes { name } } field { ...fieldName } }
            ... on ProjectV2ItemFieldMilestoneValue { milestone { title } field { ...fieldName } }
        }
    }
}

fragment fieldName on ProjectV2FieldConfiguration {
    ... on ProjectV2FieldCommon { name }
}
"#;

const PAGINATION_PARAMS: &str =
    "$firstItems: Int!, $afterItems: String, $firstFields: Int!, $afterFields: String";

pub const VIEWER: &str = r#"
query Viewer {
    viewer { id login }
}
"#;

pub const USER_ORG_OWNER: &str = r#"
query UserOrgOwner($login: String!) {
    user(login: $login) { id login }
    organization(login: $login) { id login }
}
"#;

pub const VIEWER_LOGIN_ORGS: &str = r#"
query ViewerLoginAndOrgs($first: Int!, $after: String) {
    viewer {
        id
        login
        organizations(first: $first, after: $after) {
            pageInfo { hasNextPage endCursor }
            nodes { id login viewerCanCreateProjects }
        }
    }
}
"#;

/// Operation name, extra variable declarations and the aliased owner root.
fn owner_root(kind: OwnerKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        OwnerKind::Viewer => ("Viewer", "", "viewer"),
        OwnerKind::User => ("User", "$login: String!, ", "user(login: $login)"),
        OwnerKind::Organization => ("Org", "$login: String!, ", "organization(login: $login)"),
    }
}

/// `projectV2(number:)` under the owner's root, aliased to `owner.project`.
pub fn project_lookup(kind: OwnerKind) -> (String, String) {
    let (prefix, params, root) = owner_root(kind);
    let name = format!("{prefix}Project");
    let document = format!(
        "query {name}({params}$number: Int!, {PAGINATION_PARAMS}) {{\n    \
         owner: {root} {{\n        \
         project: projectV2(number: $number) {{ ...projectFields }}\n    \
         }}\n}}\n{PROJECT_FRAGMENT}"
    );
    (name, document)
}

/// `projectsV2` under the owner's root, aliased to `owner.projects`.
pub fn project_list(kind: OwnerKind) -> (String, String) {
    let (prefix, params, root) = owner_root(kind);
    let name = format!("{prefix}ProjectList");
    let document = format!(
        "query {name}({params}$first: Int!, $after: String, {PAGINATION_PARAMS}) {{\n    \
         owner: {root} {{\n        \
         projects: projectsV2(first: $first, after: $after) {{\n            \
         totalCount\n            \
         pageInfo {{ hasNextPage endCursor }}\n            \
         nodes {{ ...projectFields }}\n        \
         }}\n    \
         }}\n}}\n{PROJECT_FRAGMENT}"
    );
    (name, document)
}

pub fn delete_project() -> String {
    format!(
        "mutation DeleteProject($input: DeleteProjectV2Input!, {PAGINATION_PARAMS}) {{\n    \
         deleteProjectV2(input: $input) {{\n        \
         projectV2 {{ ...projectFields }}\n    \
         }}\n}}\n{PROJECT_FRAGMENT}"
    )
}
