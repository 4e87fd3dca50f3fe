//! In-memory page model implementing the view port.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, PoisonError};

use agridash_app::ports::DashboardView;
use agridash_domain::connection::ConnectionState;
use agridash_domain::readings::PLACEHOLDER;
use agridash_domain::stats::StatItem;
use agridash_domain::view::{ElementId, Rgb};

#[derive(Debug, Default)]
struct Elements {
    texts: HashMap<ElementId, String>,
    classes: HashMap<ElementId, BTreeSet<&'static str>>,
    colors: HashMap<ElementId, Rgb>,
    values: HashMap<ElementId, String>,
    stats: Vec<StatItem>,
}

/// Latest state of every display element.
///
/// Services write into it from background tasks; page handlers read it.
#[derive(Debug)]
pub struct LivePage {
    elements: Mutex<Elements>,
}

impl Default for LivePage {
    fn default() -> Self {
        let page = Self {
            elements: Mutex::new(Elements::default()),
        };
        let initial = ConnectionState::default();
        page.set_text(ElementId::ConnectionStatus, initial.label());
        page.set_class(ElementId::ConnectionStatus, initial.css_class(), true);
        page
    }
}

impl LivePage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of an element, `--` until something was written.
    pub fn text(&self, element: ElementId) -> String {
        self.lock()
            .texts
            .get(&element)
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    /// Space-separated class list of an element.
    pub fn class_list(&self, element: ElementId) -> String {
        self.lock()
            .classes
            .get(&element)
            .map(|classes| classes.iter().copied().collect::<Vec<_>>().join(" "))
            .unwrap_or_default()
    }

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.lock()
            .classes
            .get(&element)
            .is_some_and(|classes| classes.contains(class))
    }

    pub fn color(&self, element: ElementId) -> Option<Rgb> {
        self.lock().colors.get(&element).copied()
    }

    pub fn stats(&self) -> Vec<StatItem> {
        self.lock().stats.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Elements> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DashboardView for LivePage {
    fn set_text(&self, element: ElementId, text: &str) {
        self.lock().texts.insert(element, text.to_string());
    }

    fn set_class(&self, element: ElementId, class: &'static str, enabled: bool) {
        let mut elements = self.lock();
        let classes = elements.classes.entry(element).or_default();
        if enabled {
            classes.insert(class);
        } else {
            classes.remove(class);
        }
    }

    fn set_color(&self, element: ElementId, color: Rgb) {
        self.lock().colors.insert(element, color);
    }

    fn set_stats(&self, items: &[StatItem]) {
        self.lock().stats = items.to_vec();
    }

    fn value(&self, element: ElementId) -> Option<String> {
        self.lock().values.get(&element).cloned()
    }

    fn set_value(&self, element: ElementId, value: &str) {
        self.lock().values.insert(element, value.to_string());
    }
}
