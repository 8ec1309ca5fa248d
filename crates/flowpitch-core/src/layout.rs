//! Layout variables published for the stylesheet

/// CSS custom property holding the navigation bar height
pub const TOP_OFFSET_PROPERTY: &str = "--topOffset";

/// Property name and value to publish for a measured navigation bar height
pub fn top_offset(nav_height: f64) -> (&'static str, String) {
    (TOP_OFFSET_PROPERTY, format!("{}px", nav_height.max(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_offset() {
        assert_eq!(top_offset(64.0), ("--topOffset", "64px".to_string()));
        assert_eq!(top_offset(57.5).1, "57.5px");
        assert_eq!(top_offset(-3.0).1, "0px");
    }
}
