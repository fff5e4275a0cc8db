//! Page templates.

use chrono::{Datelike, Utc};
use minijinja::{Environment, Value, context};
use serde::Serialize;

use marginal_core::domain::Post;

use crate::config::SiteConfig;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("posts.html", include_str!("../templates/posts.html")),
    ("post.html", include_str!("../templates/post.html")),
    ("edit.html", include_str!("../templates/edit.html")),
    ("auth.html", include_str!("../templates/auth.html")),
];

/// Compiled templates with the site settings available as `site`.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new(site: &SiteConfig) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        env.add_global("site", Value::from_serialize(site));
        Ok(Self { env })
    }

    /// Render a page. `admin` and the current `year` are added to `ctx`.
    pub fn page(&self, name: &str, admin: bool, ctx: Value) -> Result<String, minijinja::Error> {
        let template = self.env.get_template(name)?;
        template.render(context! {
            admin,
            year => Utc::now().year(),
            ..ctx
        })
    }
}

/// A post as the templates see it, with its body already rendered.
#[derive(Debug, Serialize)]
pub struct PostView<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub tags: &'a [String],
    pub day: String,
    pub month: String,
    pub html: String,
}

impl<'a> PostView<'a> {
    pub fn new(post: &'a Post, html: String) -> Self {
        Self {
            title: &post.title,
            slug: &post.slug,
            tags: &post.tags,
            day: post.created_at.format("%d").to_string(),
            month: post.created_at.format("%m").to_string(),
            html,
        }
    }
}

/// Values prefilled in the edit form.
#[derive(Debug, Default, Serialize)]
pub struct FormView {
    pub title: String,
    pub tags: String,
    pub body: String,
}

impl From<&Post> for FormView {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            tags: post.tags.join(" "),
            body: post.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marginal_core::domain::PostDraft;

    fn views(disqus: Option<&str>) -> Views {
        Views::new(&SiteConfig {
            disqus: disqus.map(str::to_owned),
            ..SiteConfig::default()
        })
        .unwrap()
    }

    fn post() -> Post {
        Post::new(
            PostDraft {
                title: "Hello <World>".to_owned(),
                tags: vec!["rust".to_owned(), "web".to_owned()],
                body: String::new(),
            },
            "hello-world".to_owned(),
        )
    }

    #[test]
    fn test_layout_shows_site_and_footer() {
        let html = views(None)
            .page("auth.html", false, context! {})
            .unwrap();

        let year = Utc::now().year();
        assert!(html.contains("<h1><a href=\"/\">My Marginal Blog</a></h1>"));
        assert!(html.contains(&format!("&copy; {year} My Name")));
        assert!(html.contains("href=\"/posts\""));
    }

    #[test]
    fn test_post_page_escapes_title_but_not_body() {
        let post = post();
        let view = PostView::new(&post, "<p>rendered</p>".to_owned());

        let html = views(None)
            .page("post.html", false, context! { post => view })
            .unwrap();

        assert!(html.contains("Hello &lt;World&gt;"));
        assert!(html.contains("<p>rendered</p>"));
        assert!(html.contains("<a href=\"/tag/rust\">rust</a>"));
        assert!(!html.contains("/edit"));
        assert!(!html.contains("disqus"));
    }

    #[test]
    fn test_tag_links_are_url_encoded() {
        let post = Post::new(
            PostDraft {
                title: "Tagged".to_owned(),
                tags: vec!["c#".to_owned(), "a/b".to_owned(), "naïve?".to_owned()],
                body: String::new(),
            },
            "tagged".to_owned(),
        );
        let view = PostView::new(&post, String::new());

        let html = views(None)
            .page("post.html", false, context! { post => view })
            .unwrap();

        assert!(html.contains("<a href=\"/tag/c%23\">c#</a>"));
        assert!(html.contains("href=\"/tag/a%2Fb\""));
        assert!(html.contains("<a href=\"/tag/na%C3%AFve%3F\">naïve?</a>"));
    }

    #[test]
    fn test_admin_sees_edit_link() {
        let post = post();
        let view = PostView::new(&post, String::new());

        let html = views(None)
            .page("post.html", true, context! { post => view })
            .unwrap();

        assert!(html.contains("/posts/hello-world/edit"));
    }

    #[test]
    fn test_disqus_embed_only_when_configured() {
        let post = post();
        let view = PostView::new(&post, String::new());

        let html = views(Some("myblog"))
            .page("post.html", false, context! { post => view })
            .unwrap();

        assert!(html.contains("myblog.disqus.com/embed.js"));
    }

    #[test]
    fn test_edit_form_prefills_post() {
        let form = FormView::from(&post());

        let html = views(None)
            .page("edit.html", true, context! { slug => "hello-world", form })
            .unwrap();

        assert!(html.contains("action=\"/posts/hello-world\""));
        assert!(html.contains("value=\"rust web\""));
    }

    #[test]
    fn test_new_form_posts_to_create() {
        let html = views(None)
            .page("edit.html", true, context! { form => FormView::default() })
            .unwrap();

        assert!(html.contains("action=\"/create\""));
        assert!(html.contains("value=\"\""));
    }
}
