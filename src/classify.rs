//! Page geometry classification
//!
//! Every page is sorted into one of eight categories built from three
//! independent facets:
//! - paper class (`A4` or `A3`), decided by the shorter side
//! - orientation (`Portrait` or `Landscape`), decided by width vs height
//! - an optional `Long` flag for unusually elongated sheets
//!
//! All sizes are in PDF points (1/72 inch).

use std::fmt;

/// Shorter sides strictly below this are A4, anything else is A3
pub const A4_SHORTER_SIDE_MAX: f64 = 700.0;

/// Longer/shorter ratios strictly above this get the `Long` flag
pub const LONG_RATIO: f64 = 1.5;

/// Paper size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaperClass {
    A4,
    A3,
}

impl PaperClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperClass::A4 => "A4",
            PaperClass::A3 => "A3",
        }
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
        }
    }
}

/// Category of a single page
///
/// Displays as `{paper}_{orientation}` with a `_Long` suffix when
/// [`long`](Self::long) is set, e.g. `A4_Portrait_Long`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryLabel {
    pub paper: PaperClass,
    pub orientation: Orientation,
    pub long: bool,
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.paper.as_str(), self.orientation.as_str())?;
        if self.long {
            f.write_str("_Long")?;
        }
        Ok(())
    }
}

/// Classify a page by its width and height
///
/// Callers must pass positive finite sizes; any such pair yields a label.
///
/// The paper class always looks at `min(width, height)`. An older variant
/// compared the width for portrait pages and the height for landscape
/// pages, which gives different answers for the same sheet depending on
/// how it is rotated. See [`legacy_paper_class`].
///
/// # Example
///
/// ```
/// use pdf_sizesplit::classify::classify;
///
/// assert_eq!(classify(500.0, 800.0).to_string(), "A4_Portrait_Long");
/// assert_eq!(classify(1000.0, 700.0).to_string(), "A3_Landscape");
/// ```
pub fn classify(width: f64, height: f64) -> CategoryLabel {
    let shorter = width.min(height);
    let longer = width.max(height);

    let orientation = if width < height {
        Orientation::Portrait
    } else {
        Orientation::Landscape
    };

    let paper = if shorter < A4_SHORTER_SIDE_MAX {
        PaperClass::A4
    } else {
        PaperClass::A3
    };

    CategoryLabel {
        paper,
        orientation,
        long: longer / shorter > LONG_RATIO,
    }
}

/// Paper class as computed by the older orientation-dependent rule
///
/// Measures the width of portrait pages and the height of landscape pages.
/// For positive sizes that is always the shorter side, so it must agree
/// with [`classify`]; the tests hold it to that.
pub fn legacy_paper_class(width: f64, height: f64) -> PaperClass {
    let measured = if width < height { width } else { height };
    if measured < A4_SHORTER_SIDE_MAX {
        PaperClass::A4
    } else {
        PaperClass::A3
    }
}
