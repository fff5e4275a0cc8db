//! Atom feed of recent posts.

use atom_syndication::{Content, Entry, Feed, FixedDateTime, Link, Person, Text};
use chrono::Utc;

use marginal_core::ContentRenderer;
use marginal_core::domain::Post;
use marginal_core::ports::RenderError;

use crate::config::SiteConfig;

/// Build the feed for `posts`, which are expected newest first.
///
/// Each entry carries the rendered summary and the rendered full body, both
/// as `html` text.
pub fn build_feed(
    site: &SiteConfig,
    posts: &[Post],
    renderer: &ContentRenderer,
) -> Result<Feed, RenderError> {
    let updated: FixedDateTime = posts
        .first()
        .map(|p| p.created_at)
        .unwrap_or_else(Utc::now)
        .fixed_offset();

    let entries = posts
        .iter()
        .map(|post| feed_entry(site, post, renderer))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Feed {
        title: Text::plain(site.name.clone()),
        id: site.url.clone(),
        updated,
        authors: author(site),
        links: vec![Link {
            href: site.url.clone(),
            ..Link::default()
        }],
        entries,
        ..Feed::default()
    })
}

fn feed_entry(
    site: &SiteConfig,
    post: &Post,
    renderer: &ContentRenderer,
) -> Result<Entry, RenderError> {
    let url = post.url(&site.url);

    Ok(Entry {
        id: url.clone(),
        title: Text::plain(post.title.clone()),
        links: vec![Link {
            href: url,
            rel: "alternate".to_owned(),
            ..Link::default()
        }],
        published: Some(post.created_at.fixed_offset()),
        updated: post.updated_at.fixed_offset(),
        authors: author(site),
        summary: Some(Text::html(renderer.render(&post.body, true)?)),
        content: Some(Content {
            value: Some(renderer.render(&post.body, false)?),
            content_type: Some("html".to_owned()),
            ..Content::default()
        }),
        ..Entry::default()
    })
}

fn author(site: &SiteConfig) -> Vec<Person> {
    vec![Person {
        name: site.author.clone(),
        ..Person::default()
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Duration;
    use marginal_core::domain::PostDraft;
    use marginal_infra::{PulldownMarkup, SyntectHighlighter};

    fn renderer() -> ContentRenderer {
        ContentRenderer::new(
            Arc::new(SyntectHighlighter::new()),
            Arc::new(PulldownMarkup::new()),
        )
    }

    fn site() -> SiteConfig {
        SiteConfig {
            url: "http://blog.test".to_owned(),
            ..SiteConfig::default()
        }
    }

    fn post(slug: &str, body: &str, age_minutes: i64) -> Post {
        let mut post = Post::new(
            PostDraft {
                title: slug.to_owned(),
                tags: vec![],
                body: body.to_owned(),
            },
            slug.to_owned(),
        );
        post.created_at = Utc::now() - Duration::minutes(age_minutes);
        post
    }

    #[test]
    fn test_entries_carry_summary_and_content() {
        let body = format!("{}\n\nTail paragraph.", "word ".repeat(50));
        let posts = vec![post("newer", &body, 1), post("older", "*short*", 10)];

        let feed = build_feed(&site(), &posts, &renderer()).unwrap();

        assert_eq!(feed.title.value, "My Marginal Blog");
        assert_eq!(feed.id, "http://blog.test");
        assert_eq!(feed.updated, posts[0].created_at.fixed_offset());
        assert_eq!(feed.authors[0].name, "My Name");

        let first = &feed.entries[0];
        assert_eq!(first.id, "http://blog.test/posts/newer");
        assert_eq!(first.links[0].href, "http://blog.test/posts/newer");
        let summary = first.summary.as_ref().unwrap();
        assert!(!summary.value.contains("Tail paragraph"));
        let content = first.content.as_ref().unwrap();
        assert!(content.value.as_deref().unwrap().contains("Tail paragraph"));
        assert_eq!(content.content_type.as_deref(), Some("html"));

        assert_eq!(feed.entries[1].id, "http://blog.test/posts/older");
    }

    #[test]
    fn test_empty_feed_is_valid_atom() {
        let feed = build_feed(&site(), &[], &renderer()).unwrap();
        let xml = feed.to_string();

        assert!(feed.entries.is_empty());
        assert!(xml.contains("<feed"));
        assert!(xml.contains("My Marginal Blog"));
    }
}
