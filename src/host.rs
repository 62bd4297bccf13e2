use chat_widget_core::style::POSITION_CHANGE_EVENT;
use chat_widget_core::{Corner, Point, Rect, Viewport};
use js_sys::{Object, Reflect};
use wasm_bindgen::JsValue;
use web_sys::{CustomEvent, CustomEventInit, Element, HtmlElement, MessageEvent, MouseEvent};

pub(crate) trait HasClientRect {
    fn client_rect(&self) -> Rect;
}

impl HasClientRect for Element {
    fn client_rect(&self) -> Rect {
        let rect = self.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }
}

pub(crate) fn viewport() -> Option<Viewport> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width, height))
}

pub(crate) fn pointer_point(event: &MouseEvent) -> Point {
    Point::new(event.client_x() as f64, event.client_y() as f64)
}

/// `type` field of a cross-frame message payload, if it has one.
pub(crate) fn message_kind(event: &MessageEvent) -> Option<String> {
    let data = event.data();
    if !data.is_object() {
        return None;
    }
    Reflect::get(&data, &JsValue::from_str("type"))
        .ok()?
        .as_string()
}

pub(crate) fn position_change_event(corner: Corner) -> Option<CustomEvent> {
    let detail = Object::new();
    Reflect::set(
        &detail,
        &JsValue::from_str("position"),
        &JsValue::from_str(corner.as_str()),
    )
    .ok()?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    init.set_bubbles(true);
    init.set_composed(true);
    CustomEvent::new_with_event_init_dict(POSITION_CHANGE_EVENT, &init).ok()
}

pub(crate) fn notify_position_change(host: &HtmlElement, corner: Corner) {
    let Some(event) = position_change_event(corner) else {
        gloo::console::warn!("chat widget: could not build position event");
        return;
    };
    let _ = host.dispatch_event(&event);
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo::events::EventListener;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::MessageEventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn detached_host() -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        document
            .create_element("div")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn position_event_carries_corner() {
        let host = detached_host();
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        let _listener = EventListener::new(&host, POSITION_CHANGE_EVENT, move |event| {
            let event = event.dyn_ref::<CustomEvent>().unwrap();
            let position = Reflect::get(&event.detail(), &JsValue::from_str("position"))
                .unwrap()
                .as_string();
            *sink.borrow_mut() = position;
        });
        notify_position_change(&host, Corner::TopLeft);
        assert_eq!(seen.borrow().as_deref(), Some("top-left"));
    }

    #[wasm_bindgen_test]
    fn message_kind_reads_type_field() {
        let payload = Object::new();
        Reflect::set(&payload, &"type".into(), &"minimize".into()).unwrap();
        let init = MessageEventInit::new();
        init.set_data(&payload);
        let event = MessageEvent::new_with_event_init_dict("message", &init).unwrap();
        assert_eq!(message_kind(&event).as_deref(), Some("minimize"));

        let init = MessageEventInit::new();
        init.set_data(&JsValue::from_str("minimize"));
        let event = MessageEvent::new_with_event_init_dict("message", &init).unwrap();
        assert_eq!(message_kind(&event), None);
    }

    #[wasm_bindgen_test]
    fn viewport_is_readable() {
        let viewport = viewport().unwrap();
        assert!(viewport.width >= 0.0);
        assert!(viewport.height >= 0.0);
    }
}
