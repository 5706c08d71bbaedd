//! Deterministic color palettes.
//!
//! Two lookups are provided:
//!
//! - [`color_for_type`] maps a node or element type name to its fixed color.
//! - [`group_colors`] produces `n` distinguishable colors for grouped nodes.
//!
//! Both are pure functions of their input; there is no seed and no state.

use log::trace;

use crate::color::Color;

pub const CONDUIT: Color = Color::from_rgb(0x1f, 0x77, 0xb4);
pub const DUMMY: Color = Color::from_rgb(0xff, 0x7f, 0x0e);
pub const RESERVOIR: Color = Color::from_rgb(0x2c, 0xa0, 0x2c);
pub const JUNCTION: Color = Color::from_rgb(0xd6, 0x27, 0x28);
pub const NODE: Color = Color::from_rgb(0x94, 0x67, 0xbd);
pub const STORAGE: Color = Color::from_rgb(0x8c, 0x56, 0x4b);
pub const FLOW_BALANCING: Color = Color::from_rgb(0xe3, 0x77, 0xc2);
pub const UNKNOWN: Color = Color::from_rgb(0x7f, 0x7f, 0x7f);

/// Color returned by [`group_colors`] when at most one group exists.
pub const SINGLE_GROUP: Color = Color::from_rgb(0x1f, 0x77, 0xb4);

/// Ordered palette used for two to ten groups.
pub const GROUP_PALETTE: [Color; 10] = [
    Color::from_rgb(0x1f, 0x77, 0xb4),
    Color::from_rgb(0xff, 0x7f, 0x0e),
    Color::from_rgb(0x2c, 0xa0, 0x2c),
    Color::from_rgb(0xd6, 0x27, 0x28),
    Color::from_rgb(0x94, 0x67, 0xbd),
    Color::from_rgb(0x8c, 0x56, 0x4b),
    Color::from_rgb(0xe3, 0x77, 0xc2),
    Color::from_rgb(0x7f, 0x7f, 0x7f),
    Color::from_rgb(0xbc, 0xbd, 0x22),
    Color::from_rgb(0x17, 0xbe, 0xcf),
];

/// Green channel of the generated gradient used beyond ten groups.
const GRADIENT_GREEN: u8 = 100;

/// Returns the fixed color of a node or element type.
///
/// The lookup ignores ASCII case. Any name outside the table, including the
/// empty string, gets the gray [`UNKNOWN`] color.
pub fn color_for_type(type_name: &str) -> Color {
    match type_name.to_ascii_lowercase().as_str() {
        "conduit" => CONDUIT,
        "dummy" => DUMMY,
        "reservoir" => RESERVOIR,
        "junction" => JUNCTION,
        "node" => NODE,
        "storage" => STORAGE,
        "flowbalancing" => FLOW_BALANCING,
        "unknown" => UNKNOWN,
        other => {
            trace!(type_name = other; "No palette entry for type, using fallback");
            UNKNOWN
        }
    }
}

/// Returns `n` colors for `n` node groups.
///
/// - `n <= 1`: a single [`SINGLE_GROUP`] color.
/// - `2..=10`: the first `n` entries of [`GROUP_PALETTE`].
/// - `n > 10`: a blue-to-red gradient. Red rises from 0 to 255 and blue falls
///   from 255 to 0 linearly in `i / (n - 1)`; green is constant.
pub fn group_colors(n: usize) -> Vec<Color> {
    if n <= 1 {
        return vec![SINGLE_GROUP];
    }

    if n <= GROUP_PALETTE.len() {
        return GROUP_PALETTE[..n].to_vec();
    }

    let last = (n - 1) as f64;
    (0..n)
        .map(|i| {
            let t = i as f64 / last;
            // Truncation toward zero keeps both ends exact (0 and 255).
            let red = (255.0 * t) as u8;
            let blue = (255.0 * (1.0 - t)) as u8;
            Color::from_rgb(red, GRADIENT_GREEN, blue)
        })
        .collect()
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Every count yields exactly that many colors (at least one).
    fn check_group_color_count(n: usize) -> Result<(), TestCaseError> {
        let colors = group_colors(n);
        prop_assert_eq!(colors.len(), n.max(1));
        Ok(())
    }

    /// Beyond ten groups the gradient is monotonic in red and blue.
    fn check_gradient_monotonic(n: usize) -> Result<(), TestCaseError> {
        let colors = group_colors(n);
        for pair in colors.windows(2) {
            prop_assert!(pair[0].r() <= pair[1].r());
            prop_assert!(pair[0].b() >= pair[1].b());
        }
        Ok(())
    }

    /// Arbitrary strings never panic and resolve to a table color.
    fn check_color_for_type_total(name: &str) -> Result<(), TestCaseError> {
        let color = color_for_type(name);
        let table = [
            CONDUIT,
            DUMMY,
            RESERVOIR,
            JUNCTION,
            NODE,
            STORAGE,
            FLOW_BALANCING,
            UNKNOWN,
        ];
        prop_assert!(table.contains(&color));
        Ok(())
    }

    proptest! {
        #[test]
        fn group_color_count(n in 0usize..300) {
            check_group_color_count(n)?;
        }

        #[test]
        fn gradient_monotonic(n in 11usize..300) {
            check_gradient_monotonic(n)?;
        }

        #[test]
        fn color_for_type_total(name in ".*") {
            check_color_for_type_total(&name)?;
        }
    }
}
