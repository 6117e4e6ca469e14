// Black-globe estimate and Heat Load Index formula
use super::error::{ensure_defined, HliError};

/// Black-globe temperatures above this use the exponential wind branch.
pub const BRANCH_THRESHOLD: f64 = 25.0;

/// Radiant-heat proxy: `ambient + 0.5 * (solar * 0.25) - 0.5 * wind`.
pub fn estimate_black_globe(ambient_temperature: f64, solar_radiation: f64, wind_speed: f64) -> f64 {
    ambient_temperature + 0.5 * (solar_radiation * 0.25) - 0.5 * wind_speed
}

/// Piecewise HLI on black-globe temperature.
///
/// - `bg > 25`: `8.62 + 0.38*RH + 1.55*BG - 0.5*WS + e^(2.4 - WS)`
/// - `bg <= 25`: `10.66 + 0.28*RH + 1.3*BG - WS`
///
/// Very low wind speeds can push the exponential term to infinity; that is
/// returned as-is and reads as an extreme heat load. NaN in or out is an error.
pub fn calculate_hli(
    black_globe: f64,
    relative_humidity: f64,
    wind_speed: f64,
) -> Result<f64, HliError> {
    ensure_defined("black_globe_temperature", black_globe)?;
    ensure_defined("relative_humidity", relative_humidity)?;
    ensure_defined("wind_speed", wind_speed)?;

    let hli = if black_globe > BRANCH_THRESHOLD {
        8.62 + 0.38 * relative_humidity + 1.55 * black_globe - 0.5 * wind_speed
            + (2.4 - wind_speed).exp()
    } else {
        10.66 + 0.28 * relative_humidity + 1.3 * black_globe - wind_speed
    };

    // inf - inf between terms
    ensure_defined("hli", hli)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_estimate_black_globe() {
        assert_eq!(estimate_black_globe(30.0, 500.0, 2.0), 91.5);
        assert_eq!(estimate_black_globe(25.0, 0.0, 0.0), 25.0);
        assert_eq!(estimate_black_globe(20.0, 0.0, 4.0), 18.0);
    }

    #[test]
    fn test_exponential_branch() {
        let hli = calculate_hli(91.5, 75.0, 2.0).unwrap();
        let expected = 8.62 + 28.5 + 141.825 - 1.0 + 0.4_f64.exp();
        assert_close(hli, expected, 1e-9);
        assert_close(hli, 179.4368, 1e-3);
    }

    #[test]
    fn test_linear_branch() {
        let hli = calculate_hli(20.0, 70.0, 3.0).unwrap();
        assert_close(hli, 53.26, 1e-9);
    }

    #[test]
    fn test_branch_boundary_is_linear() {
        let at_boundary = calculate_hli(25.0, 50.0, 1.0).unwrap();
        assert_close(at_boundary, 10.66 + 14.0 + 32.5 - 1.0, 1e-9);

        let above = calculate_hli(25.000001, 50.0, 1.0).unwrap();
        let expected = 8.62 + 19.0 + 1.55 * 25.000001 - 0.5 + 1.4_f64.exp();
        assert_close(above, expected, 1e-9);
    }

    #[test]
    fn test_extreme_wind_overflow() {
        let hli = calculate_hli(40.0, 60.0, -1000.0).unwrap();
        assert_eq!(hli, f64::INFINITY);

        // Large wind underflows the exponential term to zero.
        let hli = calculate_hli(40.0, 60.0, 1000.0).unwrap();
        assert_close(hli, 8.62 + 22.8 + 62.0 - 500.0, 1e-9);
    }

    #[test]
    fn test_nan_rejected() {
        assert!(matches!(
            calculate_hli(f64::NAN, 60.0, 2.0),
            Err(HliError::InvalidInput { field: "black_globe_temperature", .. })
        ));
        assert!(matches!(
            calculate_hli(30.0, f64::NAN, 2.0),
            Err(HliError::InvalidInput { field: "relative_humidity", .. })
        ));
        assert!(matches!(
            calculate_hli(30.0, 60.0, f64::NAN),
            Err(HliError::InvalidInput { field: "wind_speed", .. })
        ));
    }

    #[test]
    fn test_indeterminate_result_rejected() {
        // +inf black globe with +inf wind leaves inf - inf
        assert!(matches!(
            calculate_hli(f64::INFINITY, 60.0, f64::INFINITY),
            Err(HliError::InvalidInput { field: "hli", .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let a = calculate_hli(33.3, 81.2, 1.7).unwrap();
        let b = calculate_hli(33.3, 81.2, 1.7).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
