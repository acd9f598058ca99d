//! Output formatting for CLI

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a key-value pair the way [`print_kv`] prints it
pub fn format_kv(key: &str, value: &str) -> String {
    format!("  {:20} {}", format!("{key}:"), value)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("{}", format_kv(key, value));
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, String)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

/// Format a rate as a percentage with one decimal place
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_pads_key_column() {
        assert_eq!(format_kv("Rounds", "50"), format!("  {:20} 50", "Rounds:"));
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(0.5), "50.0%");
        assert_eq!(format_percent(1.0 / 3.0), "33.3%");
    }
}
