/// Formats a metric on a thousand / million scale with two decimals.
///
/// Values below 1 000 are printed as is, below 1 000 000 divided by 1 000
/// with the suffix `mil`, otherwise divided by 1 000 000 with `millones`.
/// The unit-less tier keeps its trailing space.
pub fn format_number(value: f64, prefix: &str) -> String {
    let mut value = value;
    for unit in ["", "mil"] {
        if value < 1000.0 {
            return with_prefix(prefix, format!("{:.2} {}", value, unit));
        }
        value /= 1000.0;
    }
    with_prefix(prefix, format!("{:.2} millones", value))
}

fn with_prefix(prefix: &str, body: String) -> String {
    if prefix.is_empty() {
        body
    } else {
        format!("{} {}", prefix, body)
    }
}
