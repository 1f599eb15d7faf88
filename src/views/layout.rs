use maud::{html, Markup, DOCTYPE};
use rust_i18n::t;

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";
        link rel="stylesheet" href="/static/index.css";
    }
}

fn js() -> Markup {
    html! {
        script src="https://unpkg.com/htmx.org@2.0.4" {}
    }
}

pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="color-scheme" content="light";

            (css())
            (js())

            title { (title) " - " (t!("app.name")) }
        }

        // Every action swaps the whole app shell and scrolls back to the top.
        body hx-target="#app" hx-swap="innerHTML show:window:top" {
            div #app { (body) }
        }
    }
}

pub fn titled(title: &str, body: Markup) -> Markup {
    html! {
        title { (title) " - " (t!("app.name")) }
        (body)
    }
}

/// Full page for direct navigation, fragment for htmx swaps.
pub fn render(is_htmx: bool, title: &str, body: Markup) -> Markup {
    if is_htmx {
        titled(title, body)
    } else {
        page(title, body)
    }
}
