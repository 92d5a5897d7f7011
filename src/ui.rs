use crate::controller::UiState;
use crate::models::{Event, Group, Tab, User};
use chrono::NaiveDateTime;
use std::fmt::Write;

pub fn render_index(state: &UiState) -> String {
    let parts = [
        ("{{TABS}}", render_tabs(state.active_tab)),
        ("{{BANNER}}", render_banner(state)),
        ("{{SECTION}}", render_section(state)),
    ];

    // Markers appear once each, in this order. Inserted text is never rescanned.
    let mut page = String::with_capacity(INDEX_HTML.len() + 4096);
    let mut rest = INDEX_HTML;
    for (marker, value) in parts {
        if let Some((before, after)) = rest.split_once(marker) {
            page.push_str(before);
            page.push_str(&value);
            rest = after;
        }
    }
    page.push_str(rest);
    page
}

fn render_tabs(active: Tab) -> String {
    let mut html = String::new();
    for tab in Tab::ALL {
        let class = if tab == active { "tab active" } else { "tab" };
        let _ = write!(
            html,
            r#"<a class="{class}" href="/?tab={tab}">{}</a>"#,
            tab_label(tab)
        );
    }
    html
}

fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Users => "👤 Users",
        Tab::Groups => "👥 Groups",
        Tab::Events => "📅 Events",
    }
}

fn render_banner(state: &UiState) -> String {
    let mut html = String::new();
    if let Some(error) = &state.error {
        let _ = write!(html, r#"<div class="error">❌ {}</div>"#, escape(error));
    }
    if state.loading {
        html.push_str(r#"<div class="loading">⏳ Loading...</div>"#);
    }
    html
}

fn render_section(state: &UiState) -> String {
    match state.active_tab {
        Tab::Users => render_users(state),
        Tab::Groups => render_groups(state),
        Tab::Events => render_events(state),
    }
}

fn render_users(state: &UiState) -> String {
    let form = &state.user_form;
    let form_html = format!(
        r#"<form class="form" method="post" action="/users">
        <input type="text" name="name" placeholder="Name" value="{}" required />
        <input type="email" name="email" placeholder="Email" value="{}" required />
        <button type="submit">➕ Add User</button>
      </form>"#,
        escape(&form.name),
        escape(&form.email)
    );
    section("Users", &form_html, &render_list(&state.users, "No users yet", user_card))
}

fn render_groups(state: &UiState) -> String {
    let form = &state.group_form;
    let form_html = format!(
        r#"<form class="form" method="post" action="/groups">
        <input type="text" name="name" placeholder="Group Name" value="{}" required />
        <input type="text" name="description" placeholder="Description" value="{}" required />
        <button type="submit">➕ Add Group</button>
      </form>"#,
        escape(&form.name),
        escape(&form.description)
    );
    section("Groups", &form_html, &render_list(&state.groups, "No groups yet", group_card))
}

fn render_events(state: &UiState) -> String {
    let form = &state.event_form;
    let mut options = String::from(r#"<option value="">Select Group</option>"#);
    for group in &state.groups {
        let id = group.id.to_string();
        let selected = if id == form.group_id { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{id}"{selected}>{}</option>"#,
            escape(&group.name)
        );
    }
    let form_html = format!(
        r#"<form class="form" method="post" action="/events">
        <input type="text" name="title" placeholder="Event Title" value="{}" required />
        <input type="datetime-local" name="date" value="{}" required />
        <select name="groupId" required>{options}</select>
        <button type="submit">➕ Add Event</button>
      </form>"#,
        escape(&form.title),
        escape(&form.date)
    );
    section("Events", &form_html, &render_list(&state.events, "No events yet", event_card))
}

fn section(title: &str, form: &str, list: &str) -> String {
    format!(
        r#"<section class="section">
      <h2>{title}</h2>
      {form}
      <div class="list">{list}</div>
    </section>"#
    )
}

fn render_list<T>(items: &[T], empty: &str, card: fn(&T) -> String) -> String {
    if items.is_empty() {
        return format!(r#"<p class="empty">{empty}</p>"#);
    }
    items.iter().map(card).collect()
}

fn user_card(user: &User) -> String {
    format!(
        r#"<div class="card"><h3>{} — {}</h3><small>ID: {}</small></div>"#,
        escape(&user.name),
        escape(&user.email),
        user.id
    )
}

fn group_card(group: &Group) -> String {
    format!(
        r#"<div class="card"><h3>{}</h3><p>{}</p><small>ID: {}</small></div>"#,
        escape(&group.name),
        escape(&group.description),
        group.id
    )
}

fn event_card(event: &Event) -> String {
    let badge = event
        .group
        .as_ref()
        .map(|group| format!(r#"<p class="group-badge">👥 {}</p>"#, escape(&group.name)))
        .unwrap_or_default();
    format!(
        r#"<div class="card"><h3>{}</h3><p>📅 {}</p>{badge}<small>ID: {}</small></div>"#,
        escape(&event.title),
        escape(&format_event_date(&event.date)),
        event.id
    )
}

/// `YYYY-MM-DD HH:MM` for ISO local date-times, the raw value otherwise.
pub fn format_event_date(raw: &str) -> String {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>ConnectHub</title>
  <style>
    :root {
      --bg: #eef2f7;
      --ink: #1f2933;
      --muted: #616e7c;
      --accent: #3b6ef5;
      --danger: #c63b2b;
      --card: #ffffff;
      --shadow: 0 16px 40px rgba(31, 41, 51, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      display: flex;
      justify-content: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      display: grid;
      gap: 24px;
    }

    .header h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    .header p {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(31, 41, 51, 0.06);
      border-radius: 999px;
      width: fit-content;
    }

    .tab {
      border-radius: 999px;
      padding: 8px 16px;
      font-weight: 600;
      color: var(--muted);
      text-decoration: none;
    }

    .tab.active {
      background: white;
      color: var(--accent);
      box-shadow: 0 6px 14px rgba(31, 41, 51, 0.1);
    }

    .error {
      background: #fdecea;
      color: var(--danger);
      border-radius: 12px;
      padding: 12px 16px;
    }

    .loading {
      color: var(--muted);
    }

    .section {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 28px;
      display: grid;
      gap: 18px;
    }

    .section h2 {
      margin: 0;
    }

    .form {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    .form input,
    .form select {
      flex: 1 1 180px;
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid rgba(31, 41, 51, 0.2);
      font-size: 0.95rem;
    }

    .form button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    .list {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
      gap: 12px;
    }

    .card {
      border: 1px solid rgba(31, 41, 51, 0.08);
      border-radius: 14px;
      padding: 14px;
    }

    .card h3 {
      margin: 0 0 6px;
      font-size: 1.05rem;
    }

    .card p {
      margin: 0 0 6px;
    }

    .card small,
    .empty {
      color: var(--muted);
    }

    .group-badge {
      display: inline-block;
      background: rgba(59, 110, 245, 0.1);
      color: var(--accent);
      border-radius: 999px;
      padding: 2px 10px;
    }
  </style>
</head>
<body>
  <div class="app">
    <header class="header">
      <h1>🔗 ConnectHub</h1>
      <p>Manage Users, Groups &amp; Events</p>
    </header>

    <nav class="tabs">{{TABS}}</nav>

    <main class="content">
      {{BANNER}}
      {{SECTION}}
    </main>
  </div>
</body>
</html>
"#;
