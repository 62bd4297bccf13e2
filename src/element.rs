//! `<chat-widget>` custom element registration and lifecycle.

use std::cell::RefCell;
use std::rc::Rc;

use chat_widget_core::style::TAG_NAME;
use chat_widget_core::WidgetConfig;
use gloo::console;
use gloo::events::EventListener;
use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ShadowRoot, ShadowRootInit, ShadowRootMode};
use yew::AppHandle;

use crate::app::{WidgetApp, WidgetAppProps};

/// Per-element JSON overrides merged over the built-in defaults.
pub(crate) const CONFIG_ATTRIBUTE: &str = "data-config";

#[wasm_bindgen(inline_js = r#"
export function define_widget_element(tag, onConnect, onDisconnect) {
  if (customElements.get(tag)) {
    return false;
  }
  customElements.define(tag, class extends HTMLElement {
    connectedCallback() {
      onConnect(this);
    }
    disconnectedCallback() {
      onDisconnect(this);
    }
  });
  return true;
}
"#)]
extern "C" {
    fn define_widget_element(tag: &str, on_connect: &Function, on_disconnect: &Function) -> bool;
}

struct Mount {
    host: HtmlElement,
    app: AppHandle<WidgetApp>,
}

thread_local! {
    static MOUNTS: RefCell<Vec<Mount>> = RefCell::new(Vec::new());
}

/// Registers the element and inserts one instance into the page body once the
/// document is parsed.
pub(crate) fn install() {
    let on_connect = Closure::<dyn FnMut(HtmlElement)>::new(connect);
    let on_disconnect = Closure::<dyn FnMut(HtmlElement)>::new(disconnect);
    let defined = define_widget_element(
        TAG_NAME,
        on_connect.as_ref().unchecked_ref(),
        on_disconnect.as_ref().unchecked_ref(),
    );
    if !defined {
        console::warn!("chat widget: element already defined");
        return;
    }
    on_connect.forget();
    on_disconnect.forget();

    let Some(document) = document() else {
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| insert_once()).forget();
    } else {
        insert_once();
    }
}

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn insert_once() {
    let Some(document) = document() else {
        return;
    };
    if let Ok(Some(_)) = document.query_selector(TAG_NAME) {
        return;
    }
    let Some(body) = document.body() else {
        console::warn!("chat widget: no body to insert into");
        return;
    };
    let Ok(element) = document.create_element(TAG_NAME) else {
        return;
    };
    let _ = body.append_child(&element);
}

fn is_mounted(host: &HtmlElement) -> bool {
    MOUNTS.with(|mounts| {
        mounts
            .borrow()
            .iter()
            .any(|mount| mount.host.is_same_node(Some(host)))
    })
}

fn shadow_root(host: &HtmlElement) -> Option<ShadowRoot> {
    if let Some(root) = host.shadow_root() {
        root.set_inner_html("");
        return Some(root);
    }
    host.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
        .ok()
}

fn connect(host: HtmlElement) {
    if is_mounted(&host) {
        return;
    }
    let Some(root) = shadow_root(&host) else {
        console::warn!("chat widget: shadow root unavailable");
        return;
    };
    let Some(container) = document().and_then(|document| document.create_element("div").ok())
    else {
        return;
    };
    if root.append_child(&container).is_err() {
        return;
    }
    let props = WidgetAppProps {
        host: host.clone(),
        config: Rc::new(load_config(&host)),
    };
    let app = yew::Renderer::<WidgetApp>::with_root_and_props(container, props).render();
    MOUNTS.with(|mounts| mounts.borrow_mut().push(Mount { host, app }));
}

fn disconnect(host: HtmlElement) {
    let mount = MOUNTS.with(|mounts| {
        let mut mounts = mounts.borrow_mut();
        let index = mounts
            .iter()
            .position(|mount| mount.host.is_same_node(Some(&host)))?;
        Some(mounts.swap_remove(index))
    });
    if let Some(mount) = mount {
        mount.app.destroy();
    }
}

pub(crate) fn load_config(host: &Element) -> WidgetConfig {
    let Some(raw) = host.get_attribute(CONFIG_ATTRIBUTE) else {
        return WidgetConfig::default();
    };
    match WidgetConfig::from_overrides(&raw) {
        Ok(config) => config,
        Err(err) => {
            console::warn!(format!("chat widget: {err}, using defaults"));
            WidgetConfig::default()
        }
    }
}
