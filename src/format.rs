/// Format a number for display.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "#INF!" } else { "-#INF!" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        format!("{:.0}", n)
    } else {
        format!("{:.2}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::format_number;

    #[test]
    fn integers_have_no_decimals() {
        assert_eq!(format_number(105.0), "105");
        assert_eq!(format_number(-3.0), "-3");
    }

    #[test]
    fn fractions_use_two_decimals() {
        assert_eq!(format_number(1.5), "1.50");
        assert_eq!(format_number(1e12), "1000000000000.00");
    }

    #[test]
    fn non_finite_markers() {
        assert_eq!(format_number(f64::NAN), "#NAN!");
        assert_eq!(format_number(f64::INFINITY), "#INF!");
        assert_eq!(format_number(f64::NEG_INFINITY), "-#INF!");
    }
}
