//! HTML view over an [`Outcome`]: error panel, group menu and job cards.

use url::form_urlencoded;

use crate::aggregate::{FieldErrors, FilterState, Outcome};
use crate::config::Config;
use crate::record::Record;
use crate::WorkdayError;

/// Full page body for a successful run.
pub fn render_page(outcome: &Outcome, config: &Config, filter: &FilterState) -> String {
    let mut html = String::new();
    html.push_str(&render_errors(&outcome.errors));
    html.push_str(&render_nav(outcome, filter));
    for record in &outcome.visible {
        html.push_str(&render_card(record, config));
    }
    html
}

/// Page shown instead of cards when the run halts.
pub fn render_fatal(err: &WorkdayError) -> String {
    match err {
        WorkdayError::SchemaMismatch(missing) => {
            let lines: Vec<String> = missing.iter().map(|m| escape(m)).collect();
            format!(
                "<h1>Unable to find the required headers</h1>{}",
                lines.join("<br>")
            )
        }
        other => format!(
            "<h1>Unable to load the job sheet</h1><p>{}</p>",
            escape(&other.to_string())
        ),
    }
}

fn render_errors(errors: &[FieldErrors]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| {
            format!(
                "<li>job: {} is missing: [{}]</li>",
                escape(&e.label.to_string()),
                escape(&e.missing.join(" & "))
            )
        })
        .collect();
    format!(
        "<section id=\"errors\" class=\"no_print\">\n\t<h1>Errors</h1>\n\t<a href=\"#\" id=\"hide_errors\">Close</a>\n\t<ol>{items}</ol>\n</section>\n"
    )
}

fn render_nav(outcome: &Outcome, filter: &FilterState) -> String {
    if outcome.groups.is_empty() {
        return String::new();
    }
    let links: Vec<String> = outcome
        .groups
        .iter()
        .map(|(group, count)| {
            let query: String = form_urlencoded::byte_serialize(group.as_bytes()).collect();
            format!(
                "<a href=\"?filter={}\">{} ({count})</a>",
                escape(&query),
                escape(group)
            )
        })
        .collect();
    let clear = if filter.is_active() {
        "\n\t<a href=\"?\">Show all</a>"
    } else {
        ""
    };
    format!("<p class=\"no_print\">\n\t{}{clear}\n</p>\n", links.join(" "))
}

fn render_card(record: &Record, config: &Config) -> String {
    let mut details = String::new();
    for entry in config.schema.iter() {
        if entry.source == config.grouping_field.trim()
            || entry.source == config.primary_key_field.trim()
        {
            continue;
        }
        details.push_str(&format!(
            "\n\t\t<div>{}: {}</div>",
            escape(&entry.label),
            escape(record.value(&entry.source))
        ));
    }
    format!(
        "<section>\n\t<div class=\"main\">\n\t\t<h1>{}</h1>\n\t\t<h2>{}</h2>\n\t</div>\n\t<div class=\"details\">{details}\n\t</div>\n</section>\n",
        escape(record.value(config.grouping_field.trim())),
        escape(record.value(config.primary_key_field.trim())),
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
