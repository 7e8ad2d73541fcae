//! Transcript line markup.
//!
//! [`format_line`] turns one raw feed line into an HTML fragment. Rules run in a
//! fixed order: feed markers, headings, bold, italic, bullet lists, paragraphs.
//! Text that matches no rule passes through untouched, including raw `<`/`>`.
//!
//! The transform is not idempotent: formatting already formatted output wraps
//! it again. Apply it once per raw line.

use std::sync::OnceLock;

use regex::Regex;

const MARKERS: [(&str, &str); 7] = [
    ("<think>", r#"<span class="marker marker-think">&lt;think&gt;</span>"#),
    ("</think>", r#"<span class="marker marker-think">&lt;/think&gt;</span>"#),
    ("<query>", r#"<span class="marker marker-query">&lt;query&gt;</span>"#),
    ("</query>", r#"<span class="marker marker-query">&lt;/query&gt;</span>"#),
    ("<search>", r#"<span class="marker marker-search">&lt;search&gt;</span>"#),
    ("</search>", r#"<span class="marker marker-search">&lt;/search&gt;</span>"#),
    (
        "==== FINAL ANSWER====",
        r#"<span class="marker final-answer">==== FINAL ANSWER====</span>"#,
    ),
];

const LIST_OPEN: &str = r#"<ul class="transcript-list">"#;

struct Rules {
    iteration: Regex,
    h3: Regex,
    h2: Regex,
    h1: Regex,
    bold: Regex,
    italic: Regex,
    list_item: Regex,
}

fn rules() -> &'static Rules {
    static CACHED: OnceLock<Rules> = OnceLock::new();
    CACHED.get_or_init(|| Rules {
        iteration: Regex::new(r">> Iteration: (\d+)").expect("iteration regex must compile"),
        h3: Regex::new(r"(?m)^### (.*)$").expect("h3 regex must compile"),
        h2: Regex::new(r"(?m)^## (.*)$").expect("h2 regex must compile"),
        h1: Regex::new(r"(?m)^# (.*)$").expect("h1 regex must compile"),
        bold: Regex::new(r"\*\*(.*?)\*\*").expect("bold regex must compile"),
        italic: Regex::new(r"\*(.*?)\*").expect("italic regex must compile"),
        list_item: Regex::new(r"^\s*-\s+").expect("list regex must compile"),
    })
}

/// Formats one raw transcript line. Empty input yields an empty string.
pub fn format_line(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let rules = rules();
    let mut out = text.to_string();

    for (marker, replacement) in MARKERS {
        out = out.replace(marker, replacement);
    }
    out = rules
        .iteration
        .replace_all(&out, r#"<span class="marker iteration">>> Iteration: ${1}</span>"#)
        .into_owned();

    out = rules.h3.replace_all(&out, "<h3>${1}</h3>").into_owned();
    out = rules.h2.replace_all(&out, "<h2>${1}</h2>").into_owned();
    out = rules.h1.replace_all(&out, "<h1>${1}</h1>").into_owned();

    out = rules
        .bold
        .replace_all(&out, "<strong>${1}</strong>")
        .into_owned();
    out = rules.italic.replace_all(&out, "<em>${1}</em>").into_owned();

    out = wrap_lists(&out, &rules.list_item);

    format!("<p>{}</p>", out.replace("\n\n", "</p><p>"))
}

/// Formats every line of a transcript.
pub fn format_transcript<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    lines.into_iter().map(format_line).collect()
}

fn wrap_lists(text: &str, list_item: &Regex) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out = Vec::with_capacity(lines.len());
    let mut in_list = false;

    for (index, line) in lines.iter().enumerate() {
        if !list_item.is_match(line) {
            out.push((*line).to_string());
            continue;
        }

        let mut item = String::new();
        if !in_list {
            item.push_str(LIST_OPEN);
            in_list = true;
        }
        item.push_str(&list_item.replace(line, "<li>"));
        item.push_str("</li>");

        let next_is_item = lines
            .get(index + 1)
            .is_some_and(|next| list_item.is_match(next));
        if !next_is_item {
            item.push_str("</ul>");
            in_list = false;
        }
        out.push(item);
    }

    out.join("\n")
}
