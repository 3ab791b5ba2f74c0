/// Format a words-per-minute value. A session finished in zero time has
/// an unbounded rate, shown as `∞`.
pub fn format_wpm(wpm: f64) -> String {
    if wpm.is_nan() {
        "-".to_string()
    } else if wpm.is_infinite() {
        "∞".to_string()
    } else {
        format!("{}", wpm.round())
    }
}

/// Accuracy with one decimal, as in `83.5%`
pub fn format_accuracy(accuracy: f64) -> String {
    format!("{accuracy:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_wpm() {
        assert_eq!(format_wpm(42.0), "42");
        assert_eq!(format_wpm(0.0), "0");
        assert_eq!(format_wpm(f64::INFINITY), "∞");
        assert_eq!(format_wpm(f64::NAN), "-");
    }

    #[test]
    fn test_format_accuracy() {
        assert_eq!(format_accuracy(100.0), "100.0%");
        assert_eq!(format_accuracy(83.5), "83.5%");
        assert_eq!(format_accuracy(70.86), "70.9%");
    }
}
