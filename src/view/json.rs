//! JSON documents printed by `--format json`.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::data::{FieldValueKind, ItemType, Project, ProjectItem};

#[derive(Debug, Serialize)]
struct TotalCount {
    #[serde(rename = "totalCount")]
    total_count: usize,
}

#[derive(Debug, Serialize)]
struct ProjectOwnerJson<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    login: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectJson<'a> {
    number: u32,
    url: &'a str,
    short_description: &'a str,
    public: bool,
    closed: bool,
    title: &'a str,
    id: &'a str,
    readme: &'a str,
    items: TotalCount,
    fields: TotalCount,
    owner: ProjectOwnerJson<'a>,
}

#[derive(Debug, Serialize)]
struct ContentJson<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    title: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ItemJson<'a> {
    id: &'a str,
    title: &'a str,
    content: ContentJson<'a>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct DetailedItemsJson<'a> {
    items: Vec<ItemJson<'a>>,
    #[serde(rename = "totalCount")]
    total_count: usize,
}

/// The project summary printed after a delete.
pub fn project_json(project: &Project) -> serde_json::Result<String> {
    serde_json::to_string(&ProjectJson {
        number: project.number,
        url: &project.url,
        short_description: &project.short_description,
        public: project.public,
        closed: project.closed,
        title: &project.title,
        id: &project.id,
        readme: &project.readme,
        items: TotalCount {
            total_count: project.item_count,
        },
        fields: TotalCount {
            total_count: project.field_count,
        },
        owner: ProjectOwnerJson {
            kind: &project.owner_type,
            login: &project.owner_login,
        },
    })
}

/// The fetched items with their content and custom field values.
///
/// `totalCount` is the project's item count, which can exceed what was fetched.
pub fn detailed_items_json(project: &Project) -> serde_json::Result<String> {
    serde_json::to_string(&DetailedItemsJson {
        items: project.items.iter().map(item_json).collect(),
        total_count: project.item_count,
    })
}

fn item_json(item: &ProjectItem) -> ItemJson<'_> {
    let tracked = matches!(item.kind, ItemType::Issue | ItemType::PullRequest);
    let content = ContentJson {
        kind: item.kind.as_str(),
        title: &item.title,
        body: &item.body,
        number: tracked.then_some(item.number),
        repository: tracked.then_some(item.repository.as_str()),
        url: item.url.as_deref(),
    };

    let mut fields = Map::new();
    for value in &item.field_values {
        let key = camel_case(&value.field);
        if key.is_empty() || matches!(key.as_str(), "id" | "title" | "content") {
            continue;
        }
        fields.entry(key).or_insert_with(|| field_value_json(&value.value));
    }

    ItemJson {
        id: &item.id,
        title: &item.title,
        content,
        fields,
    }
}

fn field_value_json(value: &FieldValueKind) -> Value {
    match value {
        FieldValueKind::Text(text) => json!(text),
        FieldValueKind::Number(number) => json!(number),
        FieldValueKind::Date(date) => json!(date),
        FieldValueKind::SingleSelect(name) => json!(name),
        FieldValueKind::Iteration {
            title,
            start_date,
            duration,
        } => json!({ "title": title, "startDate": start_date, "duration": duration }),
        FieldValueKind::Labels(names) => json!(names),
        FieldValueKind::Milestone(title) => json!({ "title": title }),
    }
}

/// Field display names become keys by lowering the first character.
fn camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
