use std::fmt::Write as _;

use chrono::NaiveDate;

use super::{ExportError, ExportFile};
use crate::order::{Order, orders_on};

/// Build the daily XML export of the orders dated `today`.
///
/// Orders keep the order in which they appear in `orders`.
///
/// # Errors
///
/// Returns [`ExportError::NoOrdersToday`] if nothing was ordered today.
pub fn daily_xml(orders: &[Order], today: NaiveDate) -> Result<ExportFile, ExportError> {
    let todays = orders_on(orders, today);
    if todays.is_empty() {
        return Err(ExportError::NoOrdersToday);
    }

    let mut content = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(content, "<Narocila datum=\"{today}\">");
    for order in &todays {
        let _ = writeln!(
            content,
            "  <Narocilo>\n    <Uporabnik>{}</Uporabnik>\n    <Malica>{}</Malica>\n    \
             <Juha>{}</Juha>\n    <Opomba>{}</Opomba>\n  </Narocilo>",
            escape(&order.user),
            escape(&order.meal),
            if order.has_soup { "Da" } else { "Ne" },
            escape(order.note().unwrap_or_default()),
        );
    }
    content.push_str("</Narocila>");

    Ok(ExportFile {
        filename: format!("malice-{today}.xml"),
        content_type: "application/xml; charset=utf-8",
        content,
        orders: todays.len(),
    })
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn order(date: &str, user: &str, meal: &str, soup: bool, note: Option<&str>) -> Order {
        Order {
            id: None,
            date: date.parse().unwrap(),
            user: user.to_owned(),
            meal: meal.to_owned(),
            has_soup: soup,
            note: note.map(str::to_owned),
        }
    }

    #[test]
    fn test_empty_day_is_rejected() {
        let orders = vec![order("2026-03-01", "Ana", "Golaž", false, None)];
        assert_eq!(
            daily_xml(&orders, "2026-03-02".parse().unwrap()),
            Err(ExportError::NoOrdersToday)
        );
    }

    #[test]
    fn test_document_layout() {
        let orders = vec![
            order("2026-03-02", "Ana", "Golaž", true, Some("brez kruha")),
            order("2026-03-01", "Luka", "Rižota", false, None),
            order("2026-03-02", "Eva", "Kebab Krožnik", false, None),
        ];
        let file = daily_xml(&orders, "2026-03-02".parse().unwrap()).unwrap();

        assert_eq!(file.filename, "malice-2026-03-02.xml");
        assert_eq!(file.orders, 2);
        assert_eq!(
            file.content,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <Narocila datum=\"2026-03-02\">\n\
             \x20 <Narocilo>\n\
             \x20   <Uporabnik>Ana</Uporabnik>\n\
             \x20   <Malica>Golaž</Malica>\n\
             \x20   <Juha>Da</Juha>\n\
             \x20   <Opomba>brez kruha</Opomba>\n\
             \x20 </Narocilo>\n\
             \x20 <Narocilo>\n\
             \x20   <Uporabnik>Eva</Uporabnik>\n\
             \x20   <Malica>Kebab Krožnik</Malica>\n\
             \x20   <Juha>Ne</Juha>\n\
             \x20   <Opomba></Opomba>\n\
             \x20 </Narocilo>\n\
             </Narocila>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let orders = vec![order(
            "2026-03-02",
            "Tom & Jerry",
            "<Pica>",
            false,
            Some("\"ostro\" 'prosim'"),
        )];
        let file = daily_xml(&orders, "2026-03-02".parse().unwrap()).unwrap();

        assert!(file.content.contains("<Uporabnik>Tom &amp; Jerry</Uporabnik>"));
        assert!(file.content.contains("<Malica>&lt;Pica&gt;</Malica>"));
        assert!(
            file.content
                .contains("<Opomba>&quot;ostro&quot; &apos;prosim&apos;</Opomba>")
        );
    }
}
