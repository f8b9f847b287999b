use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets::UTF8_FULL};

pub fn fmt_g(x: f64) -> String {
    format!("{} g", fmt_num(x))
}

pub fn fmt_pct(x: f64) -> String {
    format!("{}%", fmt_num(x))
}

pub fn fmt_h(x: f64) -> String {
    format!("{:.1} h", x)
}

pub fn fmt_f(x: f64) -> String {
    format!("{} °F", fmt_num(x))
}

/// One decimal at most, dropped when the value is whole.
fn fmt_num(x: f64) -> String {
    let v = (x * 10.0).round() / 10.0;
    if (v - v.round()).abs() < 1e-9 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}

/// Table with bold headers in the house style.
pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

pub fn section(title: &str) {
    println!("\n=== {title} ===");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formatting() {
        assert_eq!(fmt_g(350.0), "350 g");
        assert_eq!(fmt_g(0.1), "0.1 g");
        assert_eq!(fmt_g(12.345), "12.3 g");
        assert_eq!(fmt_pct(72.727), "72.7%");
        assert_eq!(fmt_f(70.0), "70 °F");
        assert_eq!(fmt_h(4.0), "4.0 h");
    }
}
