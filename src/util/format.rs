//! Display formatting for prices and seller contact links.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Format a price as Brazilian reais, e.g. `69500` → `R$ 69.500,00`.
///
/// Prices are stored as free text, so anything that does not parse as a
/// number is shown as typed.
pub fn format_brl(price: &str) -> String {
    let Ok(value) = price.trim().parse::<f64>() else {
        return price.to_owned();
    };
    if !value.is_finite() {
        return price.to_owned();
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{:02}", cents % 100)
}

/// WhatsApp click-to-chat link for a seller's number.
pub fn whatsapp_link(phone: &str, listing_name: &str) -> String {
    let text = format!("Hi! I saw the {listing_name} listing and I'm interested.");
    format!(
        "https://api.whatsapp.com/send?phone={}&text={}",
        urlencoding::encode(phone),
        urlencoding::encode(&text)
    )
}
