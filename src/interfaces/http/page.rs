use crate::domain::card::Card;

/// Render the flashcard page for zero or more cards and an optional error banner
pub fn render_page(title: &str, cards: &[Card], error: Option<&str>) -> String {
    let mut body = String::new();

    if let Some(message) = error {
        body.push_str(&format!(
            "<div class=\"error\" role=\"alert\">{}</div>\n",
            escape_html(message)
        ));
    } else if cards.is_empty() {
        body.push_str("<p class=\"empty\">No flashcards to show.</p>\n");
    }

    if !cards.is_empty() {
        body.push_str(&format!(
            "<p class=\"count\">{} cards</p>\n<section class=\"deck\">\n",
            cards.len()
        ));
        for card in cards {
            body.push_str(&render_card(card));
        }
        body.push_str("</section>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
  body {{ font-family: system-ui, sans-serif; margin: 2rem; background: #f6f6f4; }}
  .deck {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1rem; }}
  .card {{ background: #fff; border-radius: 8px; padding: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.15); }}
  .card dt {{ font-size: .75rem; color: #777; text-transform: uppercase; }}
  .card dd {{ margin: 0 0 .5rem 0; font-size: 1.1rem; }}
  .error {{ background: #fde8e8; color: #9b1c1c; padding: 1rem; border-radius: 8px; }}
  .empty, .count {{ color: #555; }}
</style>
</head>
<body>
<h1>{title}</h1>
{body}</body>
</html>
"#,
        title = escape_html(title),
        body = body
    )
}

fn render_card(card: &Card) -> String {
    let mut html = String::from("<article class=\"card\">\n<dl>\n");
    for (name, value) in card.fields() {
        html.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            escape_html(name),
            escape_html(value)
        ));
    }
    html.push_str("</dl>\n</article>\n");
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
