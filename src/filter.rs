//! Size policy for candidate images.
//!
//! Only large, landscape-oriented images are worth downloading. Posts without
//! preview metadata never reach this predicate; the page crawler drops them
//! before classification.

/// Minimum accepted width in pixels.
pub const MIN_WIDTH: u32 = 1920;

/// Minimum accepted height in pixels.
pub const MIN_HEIGHT: u32 = 1080;

/// Returns true when an image of `width` x `height` should be downloaded.
///
/// Accepts images at least 1920x1080 that are strictly wider than tall.
#[must_use]
pub fn is_acceptable(width: u32, height: u32) -> bool {
    width >= MIN_WIDTH && height >= MIN_HEIGHT && width > height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_minimum_is_accepted() {
        assert!(is_acceptable(1920, 1080));
    }

    #[test]
    fn test_large_landscape_is_accepted() {
        assert!(is_acceptable(3840, 2160));
        assert!(is_acceptable(5000, 1081));
    }

    #[test]
    fn test_too_narrow_is_rejected() {
        assert!(!is_acceptable(1919, 1080));
    }

    #[test]
    fn test_too_short_is_rejected() {
        assert!(!is_acceptable(2560, 1079));
    }

    #[test]
    fn test_portrait_is_rejected() {
        assert!(!is_acceptable(1080, 1920));
        assert!(!is_acceptable(2160, 3840));
    }

    #[test]
    fn test_square_is_rejected() {
        assert!(!is_acceptable(2000, 2000));
    }

    #[test]
    fn test_just_above_minimum_height_still_landscape() {
        assert!(is_acceptable(1920, 1081));
    }
}
