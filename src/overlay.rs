use chat_widget_core::style::{ghost_icon_markup, ghost_style, placeholder_style};
use chat_widget_core::{DragOverlay, WidgetConfig};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Ghost button and dashed placeholder shown during a button drag. They live
/// in the page body, outside the shadow tree, and leave it when dropped.
pub(crate) struct OverlayNodes {
    ghost: HtmlElement,
    placeholder: HtmlElement,
}

impl OverlayNodes {
    pub(crate) fn show(config: &WidgetConfig, overlay: &DragOverlay) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let body = document.body()?;
        let ghost = document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let placeholder = document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        ghost.set_class_name("chat-widget-ghost");
        ghost.set_inner_html(&ghost_icon_markup(config));
        placeholder.set_class_name("chat-widget-placeholder");
        let nodes = Self { ghost, placeholder };
        nodes.update(config, overlay);
        body.append_child(&nodes.placeholder).ok()?;
        body.append_child(&nodes.ghost).ok()?;
        Some(nodes)
    }

    pub(crate) fn update(&self, config: &WidgetConfig, overlay: &DragOverlay) {
        let _ = self
            .ghost
            .set_attribute("style", &ghost_style(config, overlay));
        let _ = self
            .placeholder
            .set_attribute("style", &placeholder_style(config, overlay));
    }
}

impl Drop for OverlayNodes {
    fn drop(&mut self) {
        self.ghost.remove();
        self.placeholder.remove();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use chat_widget_core::Rect;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn overlay() -> DragOverlay {
        let rect = Rect::new(10.0, 10.0, 70.0, 70.0);
        DragOverlay {
            ghost: rect,
            placeholder: rect,
            placeholder_visible: false,
            settling: false,
        }
    }

    fn count(selector: &str) -> u32 {
        let document = web_sys::window().unwrap().document().unwrap();
        document.query_selector_all(selector).unwrap().length()
    }

    #[wasm_bindgen_test]
    fn nodes_leave_the_page_on_drop() {
        let config = WidgetConfig::default();
        let before = count(".chat-widget-ghost");
        let nodes = OverlayNodes::show(&config, &overlay()).unwrap();
        assert_eq!(count(".chat-widget-ghost"), before + 1);
        assert_eq!(count(".chat-widget-placeholder"), before + 1);
        drop(nodes);
        assert_eq!(count(".chat-widget-ghost"), before);
        assert_eq!(count(".chat-widget-placeholder"), before);
    }

    #[wasm_bindgen_test]
    fn removal_of_detached_nodes_is_harmless() {
        let config = WidgetConfig::default();
        let nodes = OverlayNodes::show(&config, &overlay()).unwrap();
        nodes.ghost.remove();
        drop(nodes);
        assert_eq!(count(".chat-widget-placeholder"), 0);
    }

    #[wasm_bindgen_test]
    fn update_moves_the_ghost() {
        let config = WidgetConfig::default();
        let nodes = OverlayNodes::show(&config, &overlay()).unwrap();
        let mut moved = overlay();
        moved.ghost.left = 300.0;
        nodes.update(&config, &moved);
        let style = nodes.ghost.get_attribute("style").unwrap();
        assert!(style.contains("left: 300px"));
    }
}
