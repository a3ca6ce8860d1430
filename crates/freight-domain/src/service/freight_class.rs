//! Density based freight classification

use crate::model::FreightClass;

/// Half-open density bands `[lower, upper)` in lb/ft³ and their class.
///
/// The `[30, 35)` band keeps a density of exactly 30 at class 60.
const DENSITY_TABLE: [(f64, f64, f64); 10] = [
    (1.0, 2.0, 300.0),
    (2.0, 4.0, 250.0),
    (4.0, 6.0, 175.0),
    (6.0, 8.0, 125.0),
    (8.0, 10.0, 100.0),
    (10.0, 12.0, 92.5),
    (12.0, 15.0, 85.0),
    (15.0, 22.5, 70.0),
    (22.5, 30.0, 65.0),
    (30.0, 35.0, 60.0),
];

/// Map a density in lb/ft³ to its freight class
pub fn classify(density: Option<f64>) -> Option<FreightClass> {
    let density = density?;
    if density.is_nan() {
        return None;
    }

    let raw = if density > 30.0 {
        Some(60.0)
    } else if density < 1.0 {
        Some(400.0)
    } else {
        DENSITY_TABLE
            .iter()
            .find(|(lower, upper, _)| density >= *lower && density < *upper)
            .map(|(_, _, class)| *class)
    };

    raw.and_then(FreightClass::from_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_density() {
        assert_eq!(classify(None), None);
        assert_eq!(classify(Some(f64::NAN)), None);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(Some(0.999)), Some(FreightClass::Class400));
        assert_eq!(classify(Some(1.0)), Some(FreightClass::Class300));
        assert_eq!(classify(Some(29.999)), Some(FreightClass::Class65));
        assert_eq!(classify(Some(30.0)), Some(FreightClass::Class60));
        assert_eq!(classify(Some(30.001)), Some(FreightClass::Class60));
    }

    #[test]
    fn test_every_band() {
        let cases = [
            (0.0, 400.0),
            (1.5, 300.0),
            (2.0, 250.0),
            (5.99, 175.0),
            (6.0, 125.0),
            (9.38, 100.0),
            (10.0, 92.5),
            (14.99, 85.0),
            (15.0, 70.0),
            (22.5, 65.0),
            (120.0, 60.0),
        ];
        for (density, expected) in cases {
            let class = classify(Some(density)).unwrap();
            assert_eq!(class.value(), expected, "density {}", density);
        }
    }

    #[test]
    fn test_classify_is_pure() {
        for density in [0.5, 3.3, 9.38, 18.0, 45.0] {
            assert_eq!(classify(Some(density)), classify(Some(density)));
        }
    }

    #[test]
    fn test_class_never_increases_with_density() {
        let mut previous = f64::MAX;
        let mut density = 0.0;
        while density < 40.0 {
            let class = classify(Some(density)).unwrap().value();
            assert!(class <= previous, "density {} gave {}", density, class);
            previous = class;
            density += 0.25;
        }
    }
}
