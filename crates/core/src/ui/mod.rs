//! The page the app is drawn on, and the modal alert.

pub mod render;

/// The page regions the app toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ElementId {
    Instructions,
    Directions,
    Map,
}

impl ElementId {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// One inline style mutation: `element.style.setProperty(property, value)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleChange {
    pub element: ElementId,
    pub property: &'static str,
    pub value: &'static str,
}

impl StyleChange {
    pub fn hide(element: ElementId) -> Self {
        Self {
            element,
            property: "visibility",
            value: "hidden",
        }
    }

    pub fn show(element: ElementId) -> Self {
        Self {
            element,
            property: "visibility",
            value: "visible",
        }
    }

    /// Removes the element from layout entirely, not just from view.
    pub fn collapse(element: ElementId) -> Self {
        Self {
            element,
            property: "display",
            value: "none",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StylesheetLink {
    pub rel: &'static str,
    pub mime_type: &'static str,
    pub href: String,
}

impl StylesheetLink {
    pub fn css(href: impl Into<String>) -> Self {
        Self {
            rel: "stylesheet",
            mime_type: "text/css",
            href: href.into(),
        }
    }
}

/// The host page.
///
/// Element lookups are not validated: writing to an element that does not
/// exist is the host's problem and must not fail the caller.
pub trait Page: Send + Sync {
    fn append_stylesheet(&self, link: &StylesheetLink);
    fn set_style(&self, element_id: &str, property: &str, value: &str);
    fn clear_content(&self, element_id: &str);
}

/// Modal alert with a single dismiss button.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}
