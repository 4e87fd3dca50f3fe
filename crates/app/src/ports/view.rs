//! View port: the display elements of the dashboard.

use std::sync::Arc;

use agridash_domain::stats::StatItem;
use agridash_domain::view::{ElementId, Rgb};

/// Write access to the dashboard's display elements.
///
/// Writes are synchronous and infallible: a view that cannot show something
/// simply drops it.
pub trait DashboardView: Send + Sync {
    /// Replace the text content of an element.
    fn set_text(&self, element: ElementId, text: &str);

    /// Add (`enabled = true`) or remove a class on an element.
    fn set_class(&self, element: ElementId, class: &'static str, enabled: bool);

    /// Set the foreground colour of an element.
    fn set_color(&self, element: ElementId, color: Rgb);

    /// Replace the content of the statistics block.
    fn set_stats(&self, items: &[StatItem]);

    /// Current value of an input element (e.g. the range selector).
    fn value(&self, element: ElementId) -> Option<String>;

    /// Set the value of an input element.
    fn set_value(&self, element: ElementId, value: &str);
}

impl<T: DashboardView> DashboardView for Arc<T> {
    fn set_text(&self, element: ElementId, text: &str) {
        (**self).set_text(element, text);
    }

    fn set_class(&self, element: ElementId, class: &'static str, enabled: bool) {
        (**self).set_class(element, class, enabled);
    }

    fn set_color(&self, element: ElementId, color: Rgb) {
        (**self).set_color(element, color);
    }

    fn set_stats(&self, items: &[StatItem]) {
        (**self).set_stats(items);
    }

    fn value(&self, element: ElementId) -> Option<String> {
        (**self).value(element)
    }

    fn set_value(&self, element: ElementId, value: &str) {
        (**self).set_value(element, value);
    }
}
