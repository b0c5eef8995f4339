//! Helpers shared by unit tests.

/// A timetable page in the primary layout, one row per `(hour, "mm mm ...")`.
pub(crate) fn page(rows: &[(u32, &str)]) -> String {
    let mut html = String::from("<html><body><table class=\"tblDiaDetail\">");
    for (hour, minutes) in rows {
        html.push_str(&format!(
            "<tr><td class=\"hour\">{hour}</td><td class=\"col-min\"><ul>"
        ));
        for m in minutes.split_whitespace() {
            html.push_str(&format!("<li><span class=\"time\">{m}</span></li>"));
        }
        html.push_str("</ul></td></tr>");
    }
    html.push_str("</table></body></html>");
    html
}
