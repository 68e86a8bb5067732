use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::entities::{blog_post::new_validation_error, option_fields::OptionField};

pub const MAX_TECH_TAGS: usize = 20;
pub const MAX_TECH_TAG_LENGTH: usize = 30;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub image_url: Option<String>,
    pub tech_stack: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProjectInsert {
    pub title: String,
    pub description: String,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub image_url: Option<String>,
    pub tech_stack: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProjectChanges {
    pub title: String,
    pub description: String,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub image_url: Option<String>,
    pub tech_stack: Vec<String>,
}

/// Tags arrive either as a list or as one comma separated string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TechStackInput {
    Text(String),
    List(Vec<String>),
}

impl Default for TechStackInput {
    fn default() -> Self {
        TechStackInput::List(Vec::new())
    }
}

impl TechStackInput {
    fn entries(&self) -> Vec<&str> {
        match self {
            TechStackInput::Text(text) => text.split(',').collect(),
            TechStackInput::List(items) => items.iter().flat_map(|i| i.split(',')).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewProjectRequest {
    #[validate(length(min = 1, max = 120, message = "Title must be between 1 and 120 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Description must be between 1 and 2000 characters"))]
    pub description: String,

    #[validate(custom(function = "validate_http_url"))]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub github_url: Option<String>,

    #[validate(custom(function = "validate_http_url"))]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub demo_url: Option<String>,

    #[validate(custom(function = "validate_http_url"))]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub image_url: Option<String>,

    #[serde(default)]
    pub tech_stack: TechStackInput,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 120, message = "Title must be between 1 and 120 characters"))]
    pub title: OptionField<String>,

    #[validate(length(min = 1, max = 2000, message = "Description must be between 1 and 2000 characters"))]
    pub description: OptionField<String>,

    #[validate(custom(function = "validate_optional_http_url"))]
    #[serde(deserialize_with = "blank_as_null")]
    pub github_url: OptionField<String>,

    #[validate(custom(function = "validate_optional_http_url"))]
    #[serde(deserialize_with = "blank_as_null")]
    pub demo_url: OptionField<String>,

    #[validate(custom(function = "validate_optional_http_url"))]
    #[serde(deserialize_with = "blank_as_null")]
    pub image_url: OptionField<String>,

    pub tech_stack: OptionField<TechStackInput>,
}

pub fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(()),
        _ => Err(new_validation_error("url_invalid", "Must be an http or https URL")),
    }
}

fn validate_optional_http_url(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(url) => validate_http_url(url),
        _ => Ok(()),
    }
}

/// Splits, trims and de-duplicates tags, keeping first-seen casing.
pub fn normalize_tech_tags(input: &TechStackInput) -> Result<Vec<String>, ValidationErrors> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for entry in input.entries() {
        let tag = entry.trim();
        if tag.is_empty() || !seen.insert(tag.to_lowercase()) {
            continue;
        }
        if tag.chars().count() > MAX_TECH_TAG_LENGTH {
            return Err(tag_error("tag_too_long", "Each tag must be at most 30 characters"));
        }
        tags.push(tag.to_string());
    }

    if tags.len() > MAX_TECH_TAGS {
        return Err(tag_error("too_many_tags", "At most 20 tags are allowed"));
    }

    Ok(tags)
}

fn tag_error(code: &'static str, msg: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add("tech_stack", new_validation_error(code, msg));
    errors
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Forms send `""` for links left empty; treat those as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(blank_to_none)
}

/// Same as [`blank_as_none`] for patches: a blank link clears the column.
fn blank_as_null<'de, D>(deserializer: D) -> Result<OptionField<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| match blank_to_none(value) {
        Some(url) => OptionField::SetToValue(url),
        None => OptionField::SetToNull,
    })
}

impl NewProjectRequest {
    pub fn into_insert(self, created_by: Uuid) -> Result<ProjectInsert, ValidationErrors> {
        self.validate()?;
        let tech_stack = normalize_tech_tags(&self.tech_stack)?;

        Ok(ProjectInsert {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            github_url: self.github_url,
            demo_url: self.demo_url,
            image_url: self.image_url,
            tech_stack,
            created_by,
            created_at: Utc::now(),
        })
    }
}

impl UpdateProjectRequest {
    pub fn resolve(self, current: &Project) -> Result<ProjectChanges, ValidationErrors> {
        self.validate()?;

        if self.title.is_set_to_null() || self.description.is_set_to_null() {
            let mut errors = ValidationErrors::new();
            errors.add("title", new_validation_error("required", "Title and description cannot be null"));
            return Err(errors);
        }

        let tech_stack = match &self.tech_stack {
            OptionField::Unchanged => current.tech_stack.clone(),
            OptionField::SetToNull => Vec::new(),
            OptionField::SetToValue(input) => normalize_tech_tags(input)?,
        };

        Ok(ProjectChanges {
            title: self.title.value_ref().map(|t| t.trim().to_string()).unwrap_or_else(|| current.title.clone()),
            description: self
                .description
                .value_ref()
                .map(|d| d.trim().to_string())
                .unwrap_or_else(|| current.description.clone()),
            github_url: self.github_url.apply_to(current.github_url.clone()),
            demo_url: self.demo_url.apply_to(current.demo_url.clone()),
            image_url: self.image_url.apply_to(current.image_url.clone()),
            tech_stack,
        })
    }
}
