use std::borrow::Cow;

use chrono::{Datelike, NaiveDate};

use super::{ExportError, ExportFile, month_name};
use crate::order::Order;

const HEADER: &str = "Datum,Uporabnik,Malica,Juha,Opomba";

/// Build the monthly CSV export of every stored order.
///
/// Rows are sorted by ascending date; orders on the same day keep their
/// relative order. The file name uses the month of `today`.
///
/// # Errors
///
/// Returns [`ExportError::NoOrders`] if `orders` is empty.
pub fn monthly_csv(orders: &[Order], today: NaiveDate) -> Result<ExportFile, ExportError> {
    if orders.is_empty() {
        return Err(ExportError::NoOrders);
    }

    let mut sorted: Vec<&Order> = orders.iter().collect();
    sorted.sort_by_key(|o| o.date);

    let mut lines = Vec::with_capacity(sorted.len() + 1);
    lines.push(HEADER.to_owned());
    lines.extend(sorted.iter().copied().map(row));

    Ok(ExportFile {
        filename: format!("Malice-{}-{}.csv", month_name(today), today.year()),
        content_type: "text/csv; charset=utf-8",
        content: format!("\u{feff}{}", lines.join("\n")),
        orders: sorted.len(),
    })
}

fn row(order: &Order) -> String {
    let date = order.date.to_string();
    [
        field(&date),
        field(&order.user),
        field(&order.meal),
        field(if order.has_soup { "Da" } else { "Ne" }),
        field(order.note().unwrap_or_default()),
    ]
    .join(",")
}

fn field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn order(date: &str, user: &str, note: Option<&str>) -> Order {
        Order {
            id: None,
            date: date.parse().unwrap(),
            user: user.to_owned(),
            meal: "Golaž".to_owned(),
            has_soup: false,
            note: note.map(str::to_owned),
        }
    }

    /// Minimal RFC 4180 reader for checking the output.
    fn parse(content: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let mut chars = content.chars().peekable();
        while let Some(c) = chars.next() {
            match (c, quoted) {
                ('"', true) if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                ('"', true) => quoted = false,
                ('"', false) => quoted = true,
                (',', false) => row.push(std::mem::take(&mut field)),
                ('\n', false) => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                (c, _) => field.push(c),
            }
        }
        row.push(field);
        rows.push(row);
        rows
    }

    #[test]
    fn test_empty_store_is_rejected() {
        assert_eq!(
            monthly_csv(&[], "2026-03-02".parse().unwrap()),
            Err(ExportError::NoOrders)
        );
    }

    #[test]
    fn test_bom_header_and_date_order() {
        let orders = vec![
            order("2026-03-02", "Eva", None),
            order("2026-02-27", "Ana", None),
            order("2026-03-02", "Luka", None),
        ];
        let file = monthly_csv(&orders, "2026-03-02".parse().unwrap()).unwrap();

        assert_eq!(file.filename, "Malice-marec-2026.csv");
        assert_eq!(file.orders, 3);
        assert!(file.content.starts_with('\u{feff}'));
        assert_eq!(
            file.content.trim_start_matches('\u{feff}'),
            "Datum,Uporabnik,Malica,Juha,Opomba\n\
             2026-02-27,Ana,Golaž,Ne,\n\
             2026-03-02,Eva,Golaž,Ne,\n\
             2026-03-02,Luka,Golaž,Ne,"
        );
    }

    #[test]
    fn test_note_with_comma_survives_reparse() {
        let note = "brez čebule, prosim";
        let orders = vec![order("2026-03-02", "Ana", Some(note))];
        let file = monthly_csv(&orders, "2026-03-02".parse().unwrap()).unwrap();

        assert!(file.content.contains("\"brez čebule, prosim\""));
        let rows = parse(file.content.trim_start_matches('\u{feff}'));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][4], note);
    }

    #[test]
    fn test_quotes_and_newlines_are_quoted() {
        let orders = vec![order("2026-03-02", "Ana \"Anči\"", Some("vrstica 1\nvrstica 2"))];
        let file = monthly_csv(&orders, "2026-03-02".parse().unwrap()).unwrap();

        let rows = parse(file.content.trim_start_matches('\u{feff}'));
        assert_eq!(rows[1][1], "Ana \"Anči\"");
        assert_eq!(rows[1][4], "vrstica 1\nvrstica 2");
    }
}
