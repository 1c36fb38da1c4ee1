//! The reference value of π that approximations are checked against

use std::path::Path;
use std::sync::OnceLock;

use crate::constants::*;
use crate::decimal::{Decimal, ParseDecimalError};
use crate::input::InputError;

static PI: OnceLock<Decimal> = OnceLock::new();

/// π to 1000 decimal places, parsed once from the embedded digits.
pub fn pi() -> &'static Decimal {
    PI.get_or_init(|| {
        parse_reference(PI_DIGITS).expect("embedded digits of pi are well formed")
    })
}

/// Parses a reference constant, which may be wrapped over several lines.
pub fn parse_reference(text: &str) -> Result<Decimal, ParseDecimalError> {
    let digits: String = text.chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\r' | '\n'))
        .collect();
    digits.parse()
}

/// Reads a replacement reference constant from `path`.
pub fn load_reference(path: &Path) -> Result<Decimal, InputError> {
    let text = std::fs::read_to_string(path)
        .map_err(|_| InputError::file())?;
    let value = parse_reference(&text)
        .map_err(|e| InputError::conversion(&path.display().to_string(), &e.to_string()))?;
    tracing::info!(path = %path.display(), digits = value.digits().len(), "loaded reference constant");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_pi() {
        let pi = pi();
        let digits = pi.digits();
        println!("pi = {}...", &pi.to_string()[..20]);
        assert_eq!(digits.len(), 1001);
        assert_eq!(&digits[..10], &[3, 1, 4, 1, 5, 9, 2, 6, 5, 3]);
        assert_eq!(pi.parts().map(|p| p.2), Some(-1000));
        assert!((pi.to_f64() - std::f64::consts::PI).abs() < 1.0e-15);
    }

    #[test]
    fn wrapped_text() {
        let value = parse_reference("3.14159\n26535\r\n  89793\t\n").unwrap();
        assert_eq!(value.to_string(), "3.14159265358979");
        assert!(parse_reference("3.14x59").is_err());
    }
}
