//! Server-rendered HTML pages.

use crate::models::{Customer, Reservation, TopCustomer};
use axum::{http::StatusCode, response::Html};

/// Escape text for HTML element content and double-quoted attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} | Lunchly</title>
</head>
<body>
  <nav>
    <a href="/">Lunchly</a>
    <a href="/topten">Top ten</a>
    <a href="/add/">Add customer</a>
    <form action="/" method="post">
      <input name="searchTerm" placeholder="Search by name">
      <button>Search</button>
    </form>
  </nav>
  <main>
    <h1>{title}</h1>
{body}
  </main>
</body>
</html>
"#,
        title = escape(title),
        body = body
    ))
}

fn customer_link(customer: &Customer) -> String {
    let href = customer.id().map(|id| format!("/{}/", id)).unwrap_or_default();
    format!(r#"<a href="{}">{}</a>"#, href, escape(&customer.full_name()))
}

pub fn customer_list(customers: &[Customer]) -> Html<String> {
    let mut body = String::new();
    if customers.is_empty() {
        body.push_str("    <p>No customers found.</p>\n");
    } else {
        let items: Vec<String> = customers
            .iter()
            .map(|c| format!("      <li>{}</li>\n", customer_link(c)))
            .collect();
        body.push_str(&format!("    <ul class=\"customers\">\n{}    </ul>\n", items.concat()));
    }
    page("Customers", &body)
}

pub fn top_ten_list(top: &[TopCustomer]) -> Html<String> {
    let mut body = String::new();
    if top.is_empty() {
        body.push_str("    <p>No reservations yet.</p>\n");
    } else {
        let items: Vec<String> = top
            .iter()
            .map(|t| {
                format!(
                    "      <li>{} ({} reservations)</li>\n",
                    customer_link(&t.customer),
                    t.num_reservations
                )
            })
            .collect();
        body.push_str(&format!("    <ol class=\"top-customers\">\n{}    </ol>\n", items.concat()));
    }
    page("Top ten customers", &body)
}

fn customer_form(action: &str, customer: Option<&Customer>, submit: &str) -> String {
    let fields = customer.map(Customer::fields);
    let first = fields.map(|f| f.first_name.as_str()).unwrap_or("");
    let last = fields.map(|f| f.last_name.as_str()).unwrap_or("");
    let phone = fields.and_then(|f| f.phone.as_deref()).unwrap_or("");
    let notes = fields.and_then(|f| f.notes.as_deref()).unwrap_or("");
    // Saved customers can only replace their notes, not clear them.
    let notes_required = if customer.is_some() { " required" } else { "" };
    format!(
        r#"    <form action="{action}" method="post">
      <label>First name <input name="firstName" value="{first}" required></label>
      <label>Last name <input name="lastName" value="{last}" required></label>
      <label>Phone <input name="phone" value="{phone}"></label>
      <label>Notes <textarea name="notes"{notes_required}>{notes}</textarea></label>
      <button>{submit}</button>
    </form>
"#,
        action = escape(action),
        first = escape(first),
        last = escape(last),
        phone = escape(phone),
        notes = escape(notes),
        notes_required = notes_required,
        submit = escape(submit)
    )
}

pub fn customer_new_form() -> Html<String> {
    page("Add a customer", &customer_form("/add/", None, "Add"))
}

pub fn customer_edit_form(customer: &Customer) -> Html<String> {
    let action = customer.id().map(|id| format!("/{}/edit/", id)).unwrap_or_default();
    page(
        &format!("Edit {}", customer.full_name()),
        &customer_form(&action, Some(customer), "Save"),
    )
}

pub fn customer_detail(customer: &Customer, reservations: &[Reservation]) -> Html<String> {
    let id = customer.id().map(|id| id.to_string()).unwrap_or_default();
    let fields = customer.fields();
    let mut body = String::new();
    if let Some(phone) = &fields.phone {
        body.push_str(&format!("    <p>Phone: {}</p>\n", escape(phone)));
    }
    if let Some(notes) = &fields.notes {
        body.push_str(&format!("    <p>Notes: {}</p>\n", escape(notes)));
    }
    body.push_str(&format!("    <p><a href=\"/{}/edit/\">Edit</a></p>\n", id));

    body.push_str("    <h2>Reservations</h2>\n");
    if reservations.is_empty() {
        body.push_str("    <p>No reservations yet.</p>\n");
    } else {
        let items: Vec<String> = reservations
            .iter()
            .map(|r| {
                let notes = r
                    .notes
                    .as_deref()
                    .map(|n| format!(" ({})", escape(n)))
                    .unwrap_or_default();
                format!(
                    "      <li>{} for {} guests{}</li>\n",
                    escape(&r.formatted_start_at()),
                    r.num_guests,
                    notes
                )
            })
            .collect();
        body.push_str(&format!("    <ul class=\"reservations\">\n{}    </ul>\n", items.concat()));
    }

    body.push_str(&format!(
        r#"    <h3>New reservation</h3>
    <form action="/{id}/add-reservation/" method="post">
      <label>Start <input type="datetime-local" name="startAt" required></label>
      <label>Guests <input type="number" name="numGuests" min="1" value="2" required></label>
      <label>Notes <textarea name="notes"></textarea></label>
      <button>Add reservation</button>
    </form>
"#,
        id = id
    ));
    page(&customer.full_name(), &body)
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let title = status.canonical_reason().unwrap_or("Error");
    page(
        title,
        &format!("    <p class=\"error\">{}</p>\n", escape(message)),
    )
}
