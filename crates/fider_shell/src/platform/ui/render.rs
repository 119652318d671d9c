use fider_core::{PageDescriptor, Phase, Post, SearchViewModel, ShellContext};

const EMPTY_TEXT: &str = "No results matched your search, try something different.";

/// Page frame: body classes, chrome and the page id.
pub fn render_page(descriptor: &PageDescriptor, ctx: &ShellContext) -> Vec<String> {
    let mut lines = Vec::new();
    let classes = ctx.body_classes();
    if !classes.is_empty() {
        lines.push(format!("<body class=\"{}\">", classes.join(" ")));
    }
    if descriptor.show_chrome {
        let who = ctx.user().map_or("anonymous", |user| user.name.as_str());
        lines.push(format!("== header ({who}) =="));
    }
    lines.push(format!("[page {}] {:?}", descriptor.id, descriptor.page));
    lines
}

pub fn render_not_found(location: &str) -> Vec<String> {
    vec![format!("[page not-found] nothing lives at {location}")]
}

pub fn render_search(view: &SearchViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(filter_line(view));

    match &view.posts {
        Some(posts) if posts.is_empty() && !view.loading => lines.push(EMPTY_TEXT.to_string()),
        Some(posts) => lines.extend(posts.iter().enumerate().map(|(idx, post)| post_line(idx, post))),
        None => {}
    }

    if view.loading {
        lines.push(format!("... loading ({})", phase_label(view.phase)));
    }
    if let Some(error) = &view.last_error {
        lines.push(format!("! search failed: {error}"));
    }
    if view.can_show_more {
        lines.push("> View more posts".to_string());
    }
    lines
}

fn filter_line(view: &SearchViewModel) -> String {
    let filter = &view.filter;
    if !view.shows_filters() {
        return format!("search: {:?}", filter.query);
    }
    let view_name = if filter.view.is_empty() {
        "trending"
    } else {
        filter.view.as_str()
    };
    let tags = if filter.tags.is_empty() {
        "any".to_string()
    } else {
        filter.tags.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    format!("view: {view_name} | tags: {tags} | showing {}", view.post_count())
}

fn post_line(idx: usize, post: &Post) -> String {
    let title = post.title().unwrap_or("(untitled)");
    match post.number() {
        Some(number) => format!("{:>3}. #{number} {title}", idx + 1),
        None => format!("{:>3}. {title}", idx + 1),
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Debouncing => "waiting for typing to settle",
        Phase::AwaitingResponse => "waiting for server",
    }
}
