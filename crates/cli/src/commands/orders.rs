//! Order store maintenance.

use malice_core::Order;
use malice_web::db::OrderRepository;

use super::{CliError, order_store};

fn format_order(order: &Order) -> String {
    format!(
        "{}  {:<24} {:<50} juha: {:<2}  {}",
        order.date,
        order.user,
        order.meal,
        if order.has_soup { "Da" } else { "Ne" },
        order.note().unwrap_or("-"),
    )
}

/// Print every stored order, newest first.
pub async fn list() -> Result<(), CliError> {
    let orders = order_store().await?.list().await?;

    #[allow(clippy::print_stdout)]
    {
        for order in &orders {
            println!("{}", format_order(order));
        }
        println!("{} orders", orders.len());
    }
    Ok(())
}

/// Delete every stored order.
pub async fn clear(confirmed: bool) -> Result<(), CliError> {
    let store = order_store().await?;
    let count = store.list().await?.len();
    if count == 0 {
        tracing::info!("Order history is already empty");
        return Ok(());
    }
    if !confirmed {
        return Err(CliError::NotConfirmed(count));
    }

    store.clear().await?;
    tracing::info!(count, "Order history cleared");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_order_marks_missing_note() {
        let order = Order {
            id: None,
            date: "2026-03-02".parse().unwrap(),
            user: "Ana Novak".to_string(),
            meal: "Kebab Krožnik".to_string(),
            has_soup: true,
            note: None,
        };
        let line = format_order(&order);
        assert!(line.starts_with("2026-03-02  Ana Novak"));
        assert!(line.contains("juha: Da"));
        assert!(line.ends_with('-'));
    }
}
