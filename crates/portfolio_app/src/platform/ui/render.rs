use portfolio_core::{CounterView, PageViewModel};

const LABEL_WIDTH: usize = 20;

/// Renders one text frame of the page.
pub fn render(view: &PageViewModel) -> Vec<String> {
    let nav_style = if view.navbar.is_scrolled {
        "solid"
    } else {
        "transparent"
    };
    let menu = if view.navbar.menu_open { "open" } else { "closed" };
    let nav_items = view
        .navbar
        .items
        .iter()
        .map(|item| item.label.as_str())
        .collect::<Vec<_>>()
        .join(" | ");

    let mut lines = Vec::with_capacity(view.counters.len() + 3);
    lines.push(format!("[{nav_style}] {nav_items} (menu {menu})"));
    lines.push(format!(
        "scroll {:.0}px | hero offset {:.1}px, opacity {:.2}",
        view.scroll_y, view.hero.offset_y, view.hero.opacity
    ));
    lines.extend(view.counters.iter().map(render_counter));
    lines
}

fn render_counter(counter: &CounterView) -> String {
    let status = if counter.complete {
        "done"
    } else if counter.running {
        "counting"
    } else {
        "waiting"
    };
    format!(
        "  {:<width$} {:>8}  {}",
        counter.label,
        counter.text,
        status,
        width = LABEL_WIDTH
    )
}
