use pulldown_cmark::{Event, Options, Parser, html};

/// Renders description/comment markdown to HTML. Supports emphasis, strong,
/// strikethrough, inline code and fenced code blocks; raw HTML in the input
/// is dropped from the event stream so script/markup cannot pass through.
pub fn render(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(input, options)
        .filter(|event| !matches!(event, Event::Html(_) | Event::InlineHtml(_)));
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
