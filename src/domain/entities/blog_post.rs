use std::borrow::Cow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    entities::option_fields::OptionField,
    utils::markdown::safe_markdown_to_html,
};

// ───── Constants ──────────────────────────────────────────────────────
const MIN_TITLE_LENGTH: u64 = 3;
const MAX_TITLE_LENGTH: u64 = 120;
const MIN_SLUG_LENGTH: u64 = 1;
const MAX_SLUG_LENGTH: u64 = 80;
const MIN_DESCRIPTION_LENGTH: u64 = 1;
const MAX_DESCRIPTION_LENGTH: u64 = 300;


// ───── Database Models ───────────────────────────────────────────────

/// A post row joined with its category.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Slim projection used by the dashboard.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogPostSummary {
    pub slug: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Validate)]
pub struct BlogPostInsert {
    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(
        length(min = MIN_SLUG_LENGTH, max = MAX_SLUG_LENGTH, message = "Slug must be between 1 and 80 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: String,

    #[validate(length(min = MIN_DESCRIPTION_LENGTH, max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    pub category_id: Option<Uuid>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully resolved update; every column gets its final value.
#[derive(Debug)]
pub struct BlogPostChanges {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    pub category_id: Option<Uuid>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategoryRef {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct BlogPostListItem {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: Option<CategoryRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BlogPostDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    pub content_html: String,
    pub category: Option<CategoryRef>,
    pub author_id: Uuid,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BlogPostCreatedResponse {
    pub id: Uuid,
    pub slug: String,
    pub url: String,
    pub edit_url: String,
}

#[derive(Debug, Serialize)]
pub struct BlogPostPage {
    pub posts: Vec<BlogPostListItem>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewBlogPostRequest {
    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(
        length(min = MIN_SLUG_LENGTH, max = MAX_SLUG_LENGTH, message = "Slug must be between 1 and 80 characters"),
        custom(function = "validate_slug")
    )]
    #[serde(default)]
    pub slug: Option<String>,

    #[validate(length(min = MIN_DESCRIPTION_LENGTH, max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    /// Category slug.
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateBlogPostRequest {
    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_optional_title")
    )]
    pub title: OptionField<String>,

    #[validate(
        length(min = MIN_SLUG_LENGTH, max = MAX_SLUG_LENGTH, message = "Slug must be between 1 and 80 characters"),
        custom(function = "validate_optional_slug")
    )]
    pub slug: OptionField<String>,

    #[validate(length(min = MIN_DESCRIPTION_LENGTH, max = MAX_DESCRIPTION_LENGTH))]
    pub description: OptionField<String>,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: OptionField<String>,

    /// Category slug; `null` detaches the post from its category.
    pub category: OptionField<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListPostsQuery {
    pub const DEFAULT_PER_PAGE: u32 = 10;
    pub const MAX_PER_PAGE: u32 = 100;

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
            .unwrap_or(Self::DEFAULT_PER_PAGE)
            .clamp(1, Self::MAX_PER_PAGE)
    }
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(new_validation_error("slug_empty", "Slug cannot be empty"));
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(new_validation_error("slug_invalid_chars", "Slug must contain only lowercase letters, digits, or hyphens"));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(new_validation_error("slug_edge_hyphen", "Slug must not start or end with a hyphen"));
    }
    if slug.contains("--") {
        return Err(new_validation_error("slug_double_hyphen", "Slug must not contain consecutive hyphens"));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().len() != title.len() {
        return Err(new_validation_error("title_whitespace", "Title must not have leading or trailing whitespace"));
    }
    Ok(())
}

pub fn validate_optional_title(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(title) => validate_title(title),
        OptionField::SetToNull => Err(new_validation_error("title_required", "Title cannot be null")),
        OptionField::Unchanged => Ok(()),
    }
}

pub fn validate_optional_slug(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(slug) => validate_slug(slug),
        OptionField::SetToNull => Err(new_validation_error("slug_required", "Slug cannot be null")),
        OptionField::Unchanged => Ok(()),
    }
}

pub(crate) fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

/// Derives the URL slug for a post title: "Hello World" → "hello-world".
/// Slugifies the title, cutting long results back to the last whole word
/// that fits the slug limit.
pub fn slug_from_title(title: &str) -> String {
    let slug = slug::slugify(title);
    let max = MAX_SLUG_LENGTH as usize;
    if slug.len() <= max {
        return slug;
    }

    // slugify output is ASCII, so byte offsets are char boundaries
    let head = &slug[..max];
    if slug.as_bytes()[max] == b'-' {
        return head.to_string();
    }
    match head.rfind('-') {
        Some(cut) if cut > 0 => head[..cut].to_string(),
        _ => head.trim_end_matches('-').to_string(),
    }
}

// ───── Conversions ──────────────────────────────────────────────────

impl NewBlogPostRequest {
    /// Builds the row to insert once the category slug has been resolved.
    pub fn into_insert(self, author_id: Uuid, category_id: Option<Uuid>) -> Result<BlogPostInsert, ValidationErrors> {
        self.validate()?;

        let slug = match self.slug {
            Some(s) => s,
            None => slug_from_title(&self.title),
        };

        if slug.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("slug", new_validation_error("slug_empty", "Title does not produce a usable slug; please provide one"));
            return Err(errors);
        }

        let now = Utc::now();
        let insert = BlogPostInsert {
            title: self.title,
            slug,
            description: self.description,
            content: self.content,
            category_id,
            author_id,
            created_at: now,
            updated_at: now,
        };

        insert.validate()?;
        Ok(insert)
    }
}

impl UpdateBlogPostRequest {
    /// Resolves the patch against the stored post. The slug only changes
    /// when the request names a new one.
    pub fn resolve(self, current: &BlogPost, category_id: Option<Uuid>) -> BlogPostChanges {
        BlogPostChanges {
            title: self.title.value_ref().cloned().unwrap_or_else(|| current.title.clone()),
            slug: self.slug.value_ref().cloned().unwrap_or_else(|| current.slug.clone()),
            description: self.description.value_ref().cloned().unwrap_or_else(|| current.description.clone()),
            content: self.content.value_ref().cloned().unwrap_or_else(|| current.content.clone()),
            category_id,
        }
    }
}

impl BlogPost {
    pub fn category_ref(&self) -> Option<CategoryRef> {
        match (&self.category_name, &self.category_slug) {
            (Some(name), Some(slug)) => Some(CategoryRef { name: name.clone(), slug: slug.clone() }),
            _ => None,
        }
    }

    pub fn to_list_item(&self) -> BlogPostListItem {
        BlogPostListItem {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            category: self.category_ref(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn to_detail_response(&self, view_count: i64) -> BlogPostDetailResponse {
        BlogPostDetailResponse {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            content: self.content.clone(),
            content_html: safe_markdown_to_html(&self.content),
            category: self.category_ref(),
            author_id: self.author_id,
            view_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str) -> NewBlogPostRequest {
        NewBlogPostRequest {
            title: title.to_string(),
            slug: None,
            description: "A short description".to_string(),
            content: "# Hello".to_string(),
            category: None,
        }
    }

    #[test]
    fn slug_is_derived_from_title() {
        assert_eq!(slug_from_title("Hello World"), "hello-world");
        assert_eq!(slug_from_title("  Rust & Actix: Part 2!  "), "rust-actix-part-2");
    }

    #[test]
    fn long_titles_produce_a_slug_within_the_limit() {
        let title = "Building a personal portfolio with Rust, Actix and Postgres: lessons from the first year";
        assert!(title.len() > 80 && title.len() <= 120);

        let insert = request(title).into_insert(Uuid::new_v4(), None).unwrap();
        assert!(insert.slug.len() <= 80);
        assert!(!insert.slug.ends_with('-'));
        assert!(insert.slug.starts_with("building-a-personal-portfolio-with-rust-actix-and-postgres"));
        assert!(validate_slug(&insert.slug).is_ok());
    }

    #[test]
    fn single_long_word_is_cut_at_the_limit() {
        let slug = slug_from_title(&"a".repeat(100));
        assert_eq!(slug.len(), 80);
    }

    #[test]
    fn insert_uses_derived_slug() {
        let insert = request("Hello World").into_insert(Uuid::new_v4(), None).unwrap();
        assert_eq!(insert.slug, "hello-world");
    }

    #[test]
    fn explicit_slug_wins() {
        let mut req = request("Hello World");
        req.slug = Some("custom-slug".into());

        let insert = req.into_insert(Uuid::new_v4(), None).unwrap();
        assert_eq!(insert.slug, "custom-slug");
    }

    #[test]
    fn title_without_slug_characters_is_rejected() {
        let errors = request("???").into_insert(Uuid::new_v4(), None).unwrap_err();
        assert!(errors.field_errors().contains_key("slug"));
    }

    #[test]
    fn invalid_explicit_slug_is_rejected() {
        let mut req = request("Hello World");
        req.slug = Some("Not A Slug".into());
        assert!(req.into_insert(Uuid::new_v4(), None).is_err());
    }

    #[test]
    fn update_keeps_slug_when_title_changes() {
        let now = Utc::now();
        let current = BlogPost {
            id: Uuid::new_v4(),
            title: "Old".into(),
            slug: "old".into(),
            description: "desc".into(),
            content: "body".into(),
            category_id: None,
            category_name: None,
            category_slug: None,
            author_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };
        let patch = UpdateBlogPostRequest {
            title: OptionField::SetToValue("Brand New Title".into()),
            ..Default::default()
        };

        let changes = patch.resolve(&current, None);
        assert_eq!(changes.title, "Brand New Title");
        assert_eq!(changes.slug, "old");
        assert_eq!(changes.content, "body");
    }

    #[test]
    fn null_title_fails_validation() {
        let patch = UpdateBlogPostRequest {
            title: OptionField::SetToNull,
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }
}
