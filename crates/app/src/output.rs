//! Plain-text rendering of API payloads.

use std::fmt::Write;

use quill_application::{Notification, NotificationLevel};
use quill_domain::{ApiError, Article, Comment, Page, User};

pub fn user(user: &User) -> String {
    let mut out = format!("{} (@{})", user.display_name(), user.username);
    if !user.email.is_empty() {
        let _ = write!(out, " <{}>", user.email);
    }
    if user.is_verified {
        out.push_str(" [verified]");
    }
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
        let _ = write!(out, "\n  {bio}");
    }
    if let (Some(followers), Some(following)) = (user.followers_count, user.following_count) {
        let _ = write!(out, "\n  {followers} followers, {following} following");
    }
    out
}

fn article_line(article: &Article) -> String {
    let author = article
        .author
        .as_ref()
        .map_or_else(String::new, |a| format!(" by @{}", a.username));
    format!(
        "{:>6}  {}{author}  ({} likes, {} comments) /{}",
        article.id, article.title, article.likes_count, article.comments_count, article.slug
    )
}

pub fn article(article: &Article) -> String {
    let mut out = article_line(article);
    if !article.tags.is_empty() {
        let tags: Vec<&str> = article.tags.iter().map(|t| t.name.as_str()).collect();
        let _ = write!(out, "\n  tags: {}", tags.join(", "));
    }
    if !article.content.is_empty() {
        let _ = write!(out, "\n\n{}", article.content);
    }
    out
}

pub fn articles(page: &Page<Article>) -> String {
    let mut out: Vec<String> = page.items.iter().map(article_line).collect();
    out.push(page_footer(page));
    out.join("\n")
}

pub fn comments(page: &Page<Comment>) -> String {
    let mut out: Vec<String> = page
        .items
        .iter()
        .map(|c| {
            let author = c.author.as_ref().map_or("anonymous", |a| a.username.as_str());
            let edited = if c.is_edited { " (edited)" } else { "" };
            format!("@{author}{edited}: {}", c.content)
        })
        .collect();
    out.push(page_footer(page));
    out.join("\n")
}

fn page_footer<T>(page: &Page<T>) -> String {
    format!("-- page {}/{} ({} total)", page.page, page.pages.max(1), page.total)
}

pub fn notification(notification: &Notification) -> String {
    match notification.level {
        NotificationLevel::Success => format!("ok: {}", notification.message),
        NotificationLevel::Error => format!("error: {}", notification.message),
    }
}

pub fn error(error: &ApiError) -> String {
    format!("{}: {error}", error.kind.title())
}
