
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};

use super::dom::{Bubbles, TextRegions};
use super::{log, request_frame, warn};
use crate::config::{FieldConfig, PageConfig};
use crate::sim::{ParticleField, RandomSource};

struct MathRandom;

impl RandomSource for MathRandom {
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// Matches the backing store to the laid-out size of the canvas.
fn fit_canvas(canvas: &HtmlCanvasElement) {
    canvas.set_width(canvas.offset_width().max(0) as u32);
    canvas.set_height(canvas.offset_height().max(0) as u32);
}

/// Builds the field from the page and starts the frame loop.
pub fn start(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or("2D canvas not supported")?
        .dyn_into()?;
    let document = canvas.owner_document().ok_or("canvas is not in a document")?;

    let dataset = canvas.dataset();
    let (page, page_errors) = PageConfig::from_lookup(|key| dataset.get(key));
    let (config, field_errors) = FieldConfig::from_lookup(|key| dataset.get(key));
    for e in page_errors.iter().chain(&field_errors) {
        warn(&format!("bubbles: ignoring config value: {e}"));
    }

    fit_canvas(&canvas);
    let regions = TextRegions::lookup(&document, &page);
    let bubbles = Bubbles::lookup(&document, &page.labels);
    if bubbles.missing() > 0 {
        warn(&format!("bubbles: {} label elements not found", bubbles.missing()));
    }

    let mut rng = MathRandom;
    let field = ParticleField::new(
        config,
        canvas.width() as f64,
        canvas.height() as f64,
        page.labels.iter().cloned(),
        &regions,
        &mut rng,
    );
    if field.placement_fallbacks() > 0 {
        warn(&format!(
            "bubbles: {} particles placed closer than {}px to text",
            field.placement_fallbacks(),
            field.config().min_text_clearance
        ));
    }
    log(&format!(
        "bubbles: {} particles on a {}x{} canvas",
        field.len(),
        canvas.width(),
        canvas.height()
    ));

    let field = Rc::new(RefCell::new(field));
    bubbles.attach_hover(&field)?;

    // Resize canvas to its box; particles keep their positions
    let resize_closure = {
        let canvas = canvas.clone();
        let field = field.clone();
        Closure::wrap(Box::new(move || {
            fit_canvas(&canvas);
            field
                .borrow_mut()
                .resize(canvas.width() as f64, canvas.height() as f64);
        }) as Box<dyn FnMut()>)
    };
    window()
        .ok_or("no window")?
        .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut placement_warned = false;
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        {
            let mut field = field.borrow_mut();
            // first pass runs after initial layout, before the first tick
            bubbles.measure_pending(&mut field);
            field.tick(&regions, &mut rng);
            if let Err(e) = bubbles.place_all(&field) {
                if !placement_warned {
                    warn(&format!("bubbles: could not position elements: {e:?}"));
                    placement_warned = true;
                }
            }
        }

        // schedule next
        if let Some(cb) = f.borrow().as_ref() {
            if let Err(e) = request_frame(cb) {
                warn(&format!("bubbles: could not schedule frame: {e:?}"));
            }
        }
    }) as Box<dyn FnMut()>));

    let first = g.borrow();
    request_frame(first.as_ref().ok_or("frame callback missing")?)?;
    Ok(())
}
