// Colored terminal output for posts, comments and the dashboard.
//
// This module handles all terminal-specific formatting. main.rs hands it the
// results of App operations and never formats posts itself.

use std::time::Duration;

use chrono::Utc;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use super::{format_relative_time, pluralize, truncate_chars};
use crate::api::models::{CategoryFilter, Comment, Post};
use crate::app::state::{DashboardSummary, PostListing};

/// Characters of post body shown in the home listing.
const LIST_PREVIEW_CHARS: usize = 150;
/// Characters of post body shown on the dashboard.
const DASHBOARD_PREVIEW_CHARS: usize = 200;

/// Display the filtered home listing.
pub fn display_post_list(listing: &PostListing) {
    println!(
        "\n{}  {}",
        format!("=== Posts: {} ===", listing.filter).bold(),
        pluralize(listing.posts.len(), "post").dimmed()
    );

    if listing.posts.is_empty() {
        println!("\n  {}", "No Posts Found".bold());
        match listing.filter {
            CategoryFilter::All => println!("  Be the first to share your thoughts!"),
            CategoryFilter::Only(category) => println!("  No posts in {category} category yet."),
        }
        println!("  {}", "Share your story: carecorner post --category <name> --content <text>".dimmed());
        return;
    }

    let now = Utc::now();
    println!();
    for post in &listing.posts {
        println!(
            "  {:>5}  {}  {}",
            format!("#{}", post.id).dimmed(),
            category_tag(&post.category),
            format_relative_time(post.timestamp.as_deref(), now).dimmed(),
        );
        println!("         {}", post.title.bold());
        println!(
            "         {}",
            truncate_chars(&single_line(&post.content), LIST_PREVIEW_CHARS)
        );
        println!();
    }
}

/// Display a post with its comments.
pub fn display_post_detail(post: &Post) {
    let now = Utc::now();
    println!("\n{}", post.title.bold());
    println!(
        "{}  By {}  {}",
        category_tag(&post.category),
        post.author_display(),
        format_relative_time(post.timestamp.as_deref(), now).dimmed()
    );
    println!();
    for line in post.content.lines() {
        println!("  {line}");
    }

    display_comments(post.comments.as_deref().unwrap_or_default());
}

/// Display a comment thread.
pub fn display_comments(comments: &[Comment]) {
    println!();
    if comments.is_empty() {
        println!(
            "  {}",
            "No responses yet. Be the first to offer support!".dimmed()
        );
        return;
    }

    let now = Utc::now();
    println!("{}", format!("--- {} ---", pluralize(comments.len(), "response")).bold());
    for comment in comments {
        println!(
            "  {} • {}",
            comment.author_display().cyan(),
            format_relative_time(comment.timestamp.as_deref(), now).dimmed()
        );
        for line in comment.content.lines() {
            println!("    {line}");
        }
    }
}

/// Display the user's dashboard.
pub fn display_dashboard(summary: &DashboardSummary) {
    println!("\n{}", "=== My Dashboard ===".bold());
    println!("  Posts:           {}", summary.total_posts);
    println!("  Comments:        {}", summary.total_comments);
    println!("  Anonymous posts: {}", summary.anonymous_posts);

    if summary.posts.is_empty() {
        println!("\n  {}", "No Posts Yet".bold());
        println!("  Start sharing your thoughts with the community!");
        return;
    }

    let now = Utc::now();
    println!();
    for post in &summary.posts {
        let anon = if post.is_anonymous {
            format!(" {}", "[Anonymous]".magenta())
        } else {
            String::new()
        };
        println!(
            "  {:>5}  {}  {}{}  {}",
            format!("#{}", post.id).dimmed(),
            post.title.bold(),
            category_tag(&post.category),
            anon,
            format!(
                "{} • {}",
                format_relative_time(post.timestamp.as_deref(), now),
                pluralize(post.comment_total(), "comment")
            )
            .dimmed()
        );
        println!(
            "         {}",
            truncate_chars(&single_line(&post.content), DASHBOARD_PREVIEW_CHARS)
        );
        for comment in post.comments.as_deref().unwrap_or_default() {
            println!(
                "           {} {}: {}",
                "↳".dimmed(),
                comment.author_display().cyan(),
                truncate_chars(&single_line(&comment.content), LIST_PREVIEW_CHARS)
            );
        }
    }
}

/// Show a warning, then clear it from the terminal after `delay`.
///
/// When stderr is not a terminal the spinner is hidden, so the message is
/// printed as a plain line instead.
pub async fn flash_warning(message: &str, delay: Duration) {
    let pb = ProgressBar::new_spinner();
    if pb.is_hidden() {
        eprintln!("{}", message.yellow().bold());
        return;
    }

    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.yellow} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.yellow().bold().to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    tokio::time::sleep(delay).await;
    pb.finish_and_clear();
}

fn category_tag(category: &str) -> colored::ColoredString {
    let tag = format!("[{category}]");
    match category {
        "Mental Health" => tag.magenta(),
        "Career" => tag.blue(),
        "Academics" => tag.cyan(),
        "Relationships" => tag.red(),
        "General" => tag.green(),
        _ => tag.normal(),
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
