//! Terminal rendering of the render tree.
//!
//! Lays the tree out as an indented report and styles each node with
//! ANSI colors (kind on red, file and line in yellow, addresses in grey).

use super::tree::{Footer, Item, ItemHeader, RenderTree};
use colored::{ColoredString, Colorize};

/// Left margin of the whole report
const REPORT_MARGIN: usize = 2;

/// Extra margin of each trace item
const ITEM_MARGIN: usize = 2;

/// Render a tree as terminal text
///
/// With `use_colors` off the output is plain text.
pub fn render(tree: &RenderTree, use_colors: bool) -> String {
    let painter = Painter { use_colors };
    let mut out = String::new();

    out.push_str(&render_header(tree, &painter));

    if let Some(items) = &tree.report.trace {
        for trace_item in items {
            out.push('\n');
            out.push_str(&render_item(&trace_item.item, &painter));
        }
    }

    out.push('\n');
    out
}

fn render_header(tree: &RenderTree, painter: &Painter) -> String {
    let header = &tree.report.header;
    let margin = " ".repeat(REPORT_MARGIN);
    let mut out = margin.clone();

    if let Some(wrapper) = &header.title.wrapper {
        out.push_str(&painter.paint(wrapper, |s| s.bright_black()));
        out.push(' ');
    }
    out.push_str(&painter.paint(&header.title.kind, |s| s.bright_white().on_red()));
    out.push_str(&painter.paint(&header.colon, |s| s.bright_black()));
    out.push(' ');

    let continuation = format!("\n{}", margin);
    let message = header.message.replace('\n', &continuation);
    out.push_str(&painter.paint(&message, |s| s.bright_white()));
    out.push('\n');

    out
}

fn render_item(item: &Item, painter: &Painter) -> String {
    let margin = " ".repeat(REPORT_MARGIN + ITEM_MARGIN);
    let bullet = painter.paint("-", |s| s.bright_black());

    match item {
        Item::Custom { custom } => format!("{}{} {}\n", margin, bullet, custom),
        Item::Frame { header, footer } => {
            let body_margin = format!("{}  ", margin);
            let mut out = format!("{}{} {}\n", margin, bullet, render_item_header(header, painter));
            out.push_str(&render_footer(footer, painter, &body_margin));
            out
        }
    }
}

fn render_item_header(header: &ItemHeader, painter: &Painter) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(pointer) = &header.pointer {
        parts.push(format!(
            "{}{}{}",
            painter.paint(&pointer.file, |s| s.bright_yellow()),
            painter.paint(&pointer.colon, |s| s.bright_black()),
            painter.paint(&pointer.line.to_string(), |s| s.bright_yellow()),
        ));
    }
    if let Some(what) = &header.what {
        parts.push(painter.paint(what, |s| s.white()));
    }

    parts.join(" ")
}

fn render_footer(footer: &Footer, painter: &Painter, margin: &str) -> String {
    let mut out = String::new();

    if !footer.addr.is_empty() {
        out.push_str(&format!("{}{}\n", margin, painter.paint(&footer.addr, |s| s.bright_black())));
    }
    if let Some(extra) = &footer.extra {
        out.push_str(&format!("{}{}\n", margin, painter.paint(extra, |s| s.bright_black())));
    }

    out
}

/// Applies styles only when colors are enabled
struct Painter {
    use_colors: bool,
}

impl Painter {
    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.use_colors {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}
