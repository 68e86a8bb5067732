use serde::Serialize;

use crate::entities::{
    blog_post::{BlogPostDetailResponse, BlogPostListItem, BlogPostPage},
    category::Category,
    dashboard::DashboardStats,
    image::MAX_IMAGE_BYTES,
    project::{Project, MAX_TECH_TAGS, MAX_TECH_TAG_LENGTH},
    task::{Task, TaskPriority, TaskStatus},
};

#[derive(Debug, Serialize)]
pub struct Hero {
    pub greeting: String,
    pub tagline: &'static str,
    pub call_to_action: &'static str,
}

#[derive(Debug, Serialize)]
pub struct JourneyStep {
    pub year: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TimelineStep {
    pub number: u8,
    pub phase: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ContactSection {
    pub message: &'static str,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LandingPage {
    pub hero: Hero,
    pub about: &'static str,
    pub skills: &'static [&'static str],
    pub journey: Vec<JourneyStep>,
    pub recruitment_timeline: Vec<TimelineStep>,
    pub contact: ContactSection,
    pub recent_posts: Vec<BlogPostListItem>,
    pub recent_projects: Vec<Project>,
}

const SKILLS: &[&str] = &[
    "React", "Next.js", "TypeScript", "Node.js", "Tailwind CSS", "MongoDB", "GraphQL", ".NET", "AWS",
];

impl LandingPage {
    pub fn new(
        owner: &str,
        contact_email: &str,
        recent_posts: Vec<BlogPostListItem>,
        recent_projects: Vec<Project>,
    ) -> Self {
        Self {
            hero: Hero {
                greeting: format!("Hi, I'm {owner}"),
                tagline: "Full Stack Developer passionate about creating beautiful and functional web applications",
                call_to_action: "Get in Touch",
            },
            about: "I'm a passionate developer with expertise in React, Next.js, and modern web technologies. \
                    I love creating beautiful and functional applications that solve real-world problems.",
            skills: SKILLS,
            journey: vec![
                JourneyStep { year: "2018", title: ".NET", description: "Started with .NET" },
                JourneyStep { year: "2024", title: "React & .NET Core", description: "Full Stack Development" },
                JourneyStep { year: "2025", title: "Next.js & AI", description: "Future Goals" },
            ],
            recruitment_timeline: vec![
                TimelineStep { number: 1, phase: "PREPARING", description: "Preparing Recruitment Plan and Job description" },
                TimelineStep { number: 2, phase: "SOURCING", description: "Sourcing Talent" },
                TimelineStep { number: 3, phase: "SCREENING", description: "Screening Job Applications" },
                TimelineStep { number: 4, phase: "SELECTING", description: "Selecting Suitable Fit" },
                TimelineStep { number: 5, phase: "HIRING", description: "Hiring the Chosen Candidate" },
                TimelineStep { number: 6, phase: "ONBOARDING", description: "Onboarding the Employee" },
            ],
            contact: ContactSection {
                message: "I'm always open to new opportunities and interesting projects. Feel free to reach out!",
                email: contact_email.to_string(),
            },
            recent_posts,
            recent_projects,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthPage {
    pub sign_in_endpoint: &'static str,
    pub sign_up_endpoint: &'static str,
    pub password_rules: &'static str,
}

impl Default for AuthPage {
    fn default() -> Self {
        Self {
            sign_in_endpoint: "/api/v1/auth/sign-in",
            sign_up_endpoint: "/api/v1/auth/sign-up",
            password_rules: "At least 8 characters, including an uppercase letter, a number and a symbol",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminPage {
    pub dashboard: DashboardStats,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct TaskFormPage {
    pub priorities: [TaskPriority; 3],
    pub statuses: [TaskStatus; 3],
    pub default_priority: TaskPriority,
    pub default_status: TaskStatus,
}

impl Default for TaskFormPage {
    fn default() -> Self {
        Self {
            priorities: TaskPriority::ALL,
            statuses: TaskStatus::ALL,
            default_priority: TaskPriority::default(),
            default_status: TaskStatus::default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlogListPage {
    #[serde(flatten)]
    pub page: BlogPostPage,
    pub can_create: bool,
}

#[derive(Debug, Serialize)]
pub struct BlogPostView {
    pub post: BlogPostDetailResponse,
    pub can_edit: bool,
}

#[derive(Debug, Serialize)]
pub struct BlogFormPage {
    pub post: Option<BlogPostDetailResponse>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct ProjectsPage {
    pub projects: Vec<Project>,
    pub can_create: bool,
}

#[derive(Debug, Serialize)]
pub struct ProjectFormPage {
    pub upload_endpoint: &'static str,
    pub max_image_bytes: usize,
    pub max_tech_tags: usize,
    pub max_tech_tag_length: usize,
}

impl Default for ProjectFormPage {
    fn default() -> Self {
        Self {
            upload_endpoint: "/api/v1/uploads/images",
            max_image_bytes: MAX_IMAGE_BYTES,
            max_tech_tags: MAX_TECH_TAGS,
            max_tech_tag_length: MAX_TECH_TAG_LENGTH,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DemoSection {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct ProjectDemoPage {
    pub title: &'static str,
    pub sections: Vec<DemoSection>,
}

impl Default for ProjectDemoPage {
    fn default() -> Self {
        Self {
            title: "Project Title",
            sections: vec![
                DemoSection { title: "Tech Stack", items: &["React", "TypeScript", "Tailwind CSS", "Node.js"] },
                DemoSection {
                    title: "Key Features",
                    items: &["Responsive Design", "Real-time Updates", "User Authentication", "Data Visualization"],
                },
                DemoSection {
                    title: "Timeline",
                    items: &["Started: Jan 2024", "Duration: 3 months", "Current Status: Active"],
                },
            ],
        }
    }
}
