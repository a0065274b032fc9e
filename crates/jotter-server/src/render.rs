//! Server-side rendering of the notes page.

use jotter_core::Note;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Notes</title>
</head>
<body>
<h1>Notes</h1>
<form action="/add" method="post">
<input type="text" name="note" placeholder="Write a note" required>
<button type="submit">Add</button>
</form>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Render the index page listing `notes` in the order given.
pub fn render_index(notes: &[Note]) -> String {
    let mut html = String::from(PAGE_HEAD);

    if notes.is_empty() {
        html.push_str("<p>No notes yet.</p>\n");
    } else {
        html.push_str("<ul>\n");
        for note in notes {
            html.push_str(&format!(
                "<li>{} <a href=\"/delete/{}\">Delete</a></li>\n",
                escape_html(&note.text),
                note.id
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str(PAGE_TAIL);
    html
}

/// Escapes HTML special characters in note text.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
