use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, ImageData, MouseEvent};

use super::{log, request_frame, warn};
use crate::config::RevealConfig;
use crate::reveal::RevealMask;

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    Ok(canvas
        .get_context("2d")?
        .ok_or("2D canvas not supported")?
        .dyn_into()?)
}

/// Draws the portrait through the mask: mask pixels go to an offscreen
/// canvas, then the image is composited `source-in` on top of them.
struct Painter {
    ctx: CanvasRenderingContext2d,
    mask_canvas: HtmlCanvasElement,
    mask_ctx: CanvasRenderingContext2d,
    image: HtmlImageElement,
    rgba: Vec<u8>,
    size: u32,
}

impl Painter {
    fn draw(&mut self, mask: &RevealMask) -> Result<(), JsValue> {
        let side = self.size as f64;
        self.ctx.clear_rect(0.0, 0.0, side, side);
        // nothing to show until the image decodes
        if mask.is_clear() || !self.image.complete() || self.image.natural_width() == 0 {
            return Ok(());
        }

        mask.write_rgba(&mut self.rgba);
        let data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(self.rgba.as_slice()),
            self.size,
            self.size,
        )?;
        self.mask_ctx.put_image_data(&data, 0.0, 0.0)?;

        self.ctx.save();
        self.ctx
            .draw_image_with_html_canvas_element(&self.mask_canvas, 0.0, 0.0)?;
        self.ctx.set_global_composite_operation("source-in")?;
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(&self.image, 0.0, 0.0, side, side)?;
        self.ctx.restore();
        Ok(())
    }
}

/// Wires pointer moves on the container into the mask and starts the
/// reveal's own frame loop.
pub fn start(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    let dataset = canvas.dataset();
    let (config, errors) = RevealConfig::from_lookup(|key| dataset.get(key));
    for e in &errors {
        warn(&format!("reveal: ignoring config value: {e}"));
    }

    let document = canvas.owner_document().ok_or("canvas is not in a document")?;
    let container = document
        .get_element_by_id(&config.container_id)
        .ok_or("reveal container not found")?;

    let size = config.size;
    canvas.set_width(size);
    canvas.set_height(size);
    let mask_canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    mask_canvas.set_width(size);
    mask_canvas.set_height(size);

    let image = HtmlImageElement::new()?;
    image.set_src(&config.image_src);

    let mut painter = Painter {
        ctx: context_2d(&canvas)?,
        mask_ctx: context_2d(&mask_canvas)?,
        mask_canvas,
        image,
        rgba: vec![0; size as usize * size as usize * 4],
        size,
    };
    let mask = Rc::new(RefCell::new(RevealMask::new(size as usize, size as usize, &config)));

    // Pointer position in mask pixels, scaled if the container is not `size` wide
    let on_move = {
        let mask = mask.clone();
        let container = container.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            let rect = container.get_bounding_client_rect();
            let sx = if rect.width() > 0.0 { size as f64 / rect.width() } else { 1.0 };
            let sy = if rect.height() > 0.0 { size as f64 / rect.height() } else { 1.0 };
            mask.borrow_mut().stamp(
                (e.client_x() as f64 - rect.left()) * sx,
                (e.client_y() as f64 - rect.top()) * sy,
            );
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    container.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();

    log(&format!("reveal: {size}x{size} mask over {}", config.image_src));

    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut draw_warned = false;
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        {
            let mut mask = mask.borrow_mut();
            mask.fade();
            if let Err(e) = painter.draw(&mask) {
                if !draw_warned {
                    warn(&format!("reveal: could not draw: {e:?}"));
                    draw_warned = true;
                }
            }
        }

        if let Some(cb) = f.borrow().as_ref() {
            if let Err(e) = request_frame(cb) {
                warn(&format!("reveal: could not schedule frame: {e:?}"));
            }
        }
    }) as Box<dyn FnMut()>));

    let first = g.borrow();
    request_frame(first.as_ref().ok_or("frame callback missing")?)?;
    Ok(())
}
