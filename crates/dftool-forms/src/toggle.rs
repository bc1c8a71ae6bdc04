//! Show/hide toggle for the meta-schema text.

use serde::Serialize;

pub const INITIAL_CAPTION: &str = "Display MetaSchema";
pub const HIDE_CAPTION: &str = "Hide MetaSchema";
/// Caption after hiding again. Differs in case from [`INITIAL_CAPTION`].
pub const DISPLAY_CAPTION: &str = "Display Metaschema";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaSchemaToggle {
    displayed: bool,
    caption: &'static str,
}

impl Default for MetaSchemaToggle {
    fn default() -> Self {
        Self {
            displayed: false,
            caption: INITIAL_CAPTION,
        }
    }
}

impl MetaSchemaToggle {
    /// Flip visibility and return the new caption.
    pub fn toggle(&mut self) -> &'static str {
        self.displayed = !self.displayed;
        self.caption = if self.displayed {
            HIDE_CAPTION
        } else {
            DISPLAY_CAPTION
        };
        self.caption
    }

    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    pub fn caption(&self) -> &'static str {
        self.caption
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        let toggle = MetaSchemaToggle::default();
        assert!(!toggle.is_displayed());
        assert_eq!(toggle.caption(), "Display MetaSchema");
    }

    #[test]
    fn alternates_captions() {
        let mut toggle = MetaSchemaToggle::default();
        assert_eq!(toggle.toggle(), "Hide MetaSchema");
        assert!(toggle.is_displayed());
        assert_eq!(toggle.toggle(), "Display Metaschema");
        assert!(!toggle.is_displayed());
        assert_eq!(toggle.toggle(), "Hide MetaSchema");
    }
}
