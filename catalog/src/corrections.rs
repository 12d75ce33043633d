//! Some legacy sticker source files bake a non-square aspect ratio into a
//! square canvas. The factors below stretch those designs back to their
//! intended proportions when the decal's render scale is built.

pub const DECAL_WIDTH_FIX: f32 = 1.8;
pub const DECAL_HEIGHT_FIX: f32 = 1.65;

/// Design files whose art is wider than the canvas.
const WIDE_DESIGNS: &[&str] = &[
    "002.png", "005.png", "007.png", "012.png", "017.png", "018.png", "019.png", "020.png",
    "023.png", "025.png",
];

/// Design files whose art is taller than the canvas.
const TALL_DESIGNS: &[&str] = &["001.png", "009.png", "014.png"];

/// Width/height scale factors for a design file. Defaults to (1.0, 1.0)
/// for anything not in the known-exceptions tables.
pub fn correction_for(design_path: &str) -> (f32, f32) {
    let width = if WIDE_DESIGNS.contains(&design_path) {
        DECAL_WIDTH_FIX
    } else {
        1.0
    };
    let height = if TALL_DESIGNS.contains(&design_path) {
        DECAL_HEIGHT_FIX
    } else {
        1.0
    };
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_designs_are_uncorrected() {
        assert_eq!(correction_for("003.png"), (1.0, 1.0));
        assert_eq!(correction_for("nonexistent.png"), (1.0, 1.0));
    }

    #[test]
    fn wide_and_tall_tables_apply() {
        assert_eq!(correction_for("002.png"), (DECAL_WIDTH_FIX, 1.0));
        assert_eq!(correction_for("009.png"), (1.0, DECAL_HEIGHT_FIX));
    }

    #[test]
    fn no_design_is_in_both_tables() {
        for wide in WIDE_DESIGNS {
            assert!(!TALL_DESIGNS.contains(wide));
        }
    }
}
