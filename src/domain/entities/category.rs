use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::entities::blog_post::new_validation_error;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct CategoryInsert {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewCategoryRequest {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,
}

impl NewCategoryRequest {
    pub fn into_insert(self) -> Result<CategoryInsert, ValidationErrors> {
        self.validate()?;

        let name = self.name.trim().to_string();
        let slug = slug::slugify(&name);
        if slug.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("name", new_validation_error("slug_empty", "Name does not produce a usable slug"));
            return Err(errors);
        }

        Ok(CategoryInsert { name, slug })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_follows_name() {
        let insert = NewCategoryRequest { name: " Web Development ".into() }.into_insert().unwrap();
        assert_eq!(insert.name, "Web Development");
        assert_eq!(insert.slug, "web-development");
    }

    #[test]
    fn symbol_only_name_is_rejected() {
        assert!(NewCategoryRequest { name: "!!!".into() }.into_insert().is_err());
    }
}
