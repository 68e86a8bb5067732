use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::{
    blog_post::BlogPostSummary,
    post_view::PostViewCount,
    task::TaskStatusCounts,
};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostViewStat {
    pub slug: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub view_count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_posts: usize,
    pub total_views: i64,
    pub posts: Vec<PostViewStat>,
    pub tasks: TaskStatusCounts,
}

impl DashboardStats {
    /// Joins every post with its view count; posts never viewed report 0.
    pub fn aggregate(posts: Vec<BlogPostSummary>, views: &[PostViewCount], tasks: TaskStatusCounts) -> Self {
        let posts: Vec<PostViewStat> = posts
            .into_iter()
            .map(|post| {
                let view_count = views
                    .iter()
                    .find(|v| v.post_slug == post.slug)
                    .map_or(0, |v| v.view_count);

                PostViewStat {
                    slug: post.slug,
                    title: post.title,
                    created_at: post.created_at,
                    view_count,
                }
            })
            .collect();

        Self {
            total_posts: posts.len(),
            total_views: posts.iter().map(|p| p.view_count).sum(),
            posts,
            tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(slug: &str) -> BlogPostSummary {
        BlogPostSummary {
            slug: slug.into(),
            title: slug.to_uppercase(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn unviewed_posts_report_zero() {
        let views = vec![PostViewCount { post_slug: "first".into(), view_count: 7 }];
        let stats = DashboardStats::aggregate(vec![summary("first"), summary("second")], &views, TaskStatusCounts::default());

        assert_eq!(stats.total_posts, 2);
        assert_eq!(stats.total_views, 7);
        assert_eq!(stats.posts[1].view_count, 0);
    }

    #[test]
    fn empty_site_has_zero_totals() {
        let stats = DashboardStats::aggregate(Vec::new(), &[], TaskStatusCounts::default());
        assert_eq!(stats.total_posts, 0);
        assert_eq!(stats.total_views, 0);
        assert!(stats.posts.is_empty());
    }
}
