//! Render plans.
//!
//! Planning is pure: it decides which regions change and what map to draw.
//! Applying a plan is the only step that touches the page and the map.

use crate::{
    directions::Route,
    position::Coordinates,
    ui::{ElementId, Page, StyleChange},
};

#[derive(Clone, Debug, PartialEq)]
pub struct MapSpec {
    pub center: Coordinates,
    pub zoom: u8,
    pub marker: Option<Coordinates>,
}

/// The map region of the page.
pub trait MapView: Send + Sync {
    /// Replaces whatever map is shown with a new one.
    fn show_map(&self, spec: &MapSpec);

    /// Draws `route` on the current map and its turn-by-turn text into `panel`.
    fn render_route(&self, route: &Route, panel: ElementId);
}

/// Style changes happen in two batches: `before` runs ahead of the map being
/// built, `after` once it exists.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    pub before: Vec<StyleChange>,
    pub map: MapSpec,
    pub after: Vec<StyleChange>,
}

impl RenderPlan {
    /// The saved spot, pinned.
    pub fn location(center: Coordinates, zoom: u8) -> Self {
        Self {
            before: vec![
                StyleChange::collapse(ElementId::Instructions),
                StyleChange::hide(ElementId::Directions),
            ],
            map: MapSpec {
                center,
                zoom,
                marker: Some(center),
            },
            after: vec![StyleChange::show(ElementId::Map)],
        }
    }

    /// The user's position, with room for a route and its directions panel.
    pub fn directions(center: Coordinates, zoom: u8) -> Self {
        Self {
            before: vec![StyleChange::collapse(ElementId::Instructions)],
            map: MapSpec {
                center,
                zoom,
                marker: None,
            },
            after: vec![
                StyleChange::show(ElementId::Map),
                StyleChange::show(ElementId::Directions),
            ],
        }
    }

    pub fn apply(&self, page: &dyn Page, map: &dyn MapView) {
        apply_styles(page, &self.before);
        map.show_map(&self.map);
        apply_styles(page, &self.after);
    }
}

fn apply_styles(page: &dyn Page, changes: &[StyleChange]) {
    for change in changes {
        page.set_style(change.element.as_str(), change.property, change.value);
    }
}
