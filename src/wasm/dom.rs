//! Page bindings: text rects in, element offsets out, hover events in.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::config::PageConfig;
use crate::sim::{element_id, BoundsSource, ParticleField, Rect};

/// Title and portrait boxes, measured against the hero section so they share
/// the canvas coordinate space.
pub struct TextRegions {
    hero: Option<Element>,
    tracked: Vec<Element>,
}

impl TextRegions {
    pub fn lookup(document: &Document, page: &PageConfig) -> Self {
        let tracked = [&page.title_id, &page.portrait_id]
            .into_iter()
            .filter_map(|id| document.get_element_by_id(id))
            .collect();
        Self {
            hero: document.get_element_by_id(&page.hero_id),
            tracked,
        }
    }
}

impl BoundsSource for TextRegions {
    fn text_bounds(&self) -> Vec<Rect> {
        let Some(hero) = &self.hero else {
            return Vec::new();
        };
        let origin = hero.get_bounding_client_rect();
        self.tracked
            .iter()
            .map(|el| {
                let r = el.get_bounding_client_rect();
                Rect::new(
                    r.left() - origin.left(),
                    r.top() - origin.top(),
                    r.width(),
                    r.height(),
                )
            })
            .collect()
    }
}

/// Elements bound to particles by index. A missing element stays `None` and
/// its particle never gets measured, so it never moves.
pub struct Bubbles {
    elements: Vec<Option<HtmlElement>>,
}

impl Bubbles {
    pub fn lookup(document: &Document, labels: &[String]) -> Self {
        let elements = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let el = document
                    .get_element_by_id(&element_id(i))?
                    .dyn_into::<HtmlElement>()
                    .ok()?;
                if el.text_content().map_or(true, |t| t.trim().is_empty()) {
                    el.set_text_content(Some(label.as_str()));
                }
                Some(el)
            })
            .collect();
        Self { elements }
    }

    pub fn missing(&self) -> usize {
        self.elements.iter().filter(|e| e.is_none()).count()
    }

    /// Reads sizes for particles still waiting on layout.
    pub fn measure_pending(&self, field: &mut ParticleField) {
        for i in field.pending_measurements() {
            if let Some(Some(el)) = self.elements.get(i) {
                field.measure(i, el.offset_width() as f64, el.offset_height() as f64);
            }
        }
    }

    /// Moves every measured element to its particle. Stops at the first
    /// style write the browser rejects.
    pub fn place_all(&self, field: &ParticleField) -> Result<(), JsValue> {
        for (i, origin) in field.render_origins() {
            if let Some(Some(el)) = self.elements.get(i) {
                let style = el.style();
                style.set_property("left", &format!("{}px", origin.x))?;
                style.set_property("top", &format!("{}px", origin.y))?;
            }
        }
        Ok(())
    }

    pub fn attach_hover(&self, field: &Rc<RefCell<ParticleField>>) -> Result<(), JsValue> {
        for (i, el) in self.elements.iter().enumerate() {
            let Some(el) = el else { continue };
            for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
                let field = field.clone();
                let cb = Closure::wrap(Box::new(move || {
                    field.borrow_mut().set_hovered(i, hovered);
                }) as Box<dyn FnMut()>);
                el.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
                cb.forget();
            }
        }
        Ok(())
    }
}
