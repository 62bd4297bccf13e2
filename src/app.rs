use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use chat_widget_core::style::{
    hidden_style, stylesheet, CLOSE_ICON_PATH, ICON_VIEW_BOX, MESSAGE_ICON_PATH, STARS_PATH,
};
use chat_widget_core::{Deferred, Effect, PanelEdge, WidgetConfig, WidgetController, WidgetView};
use gloo::console;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, EventTarget, HtmlElement, MessageEvent, PointerEvent, ResizeObserver,
    ResizeObserverEntry,
};
use yew::prelude::*;

use crate::host::{self, HasClientRect};
use crate::listeners::ListenerRegistry;
use crate::overlay::OverlayNodes;

const GESTURE_OPTIONS: EventListenerOptions = EventListenerOptions {
    phase: EventListenerPhase::Bubble,
    passive: false,
};

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct WidgetAppProps {
    pub(crate) host: HtmlElement,
    pub(crate) config: Rc<WidgetConfig>,
}

/// DOM-side resources of one mounted widget. The controller decides, this
/// struct carries out its effects.
struct Runtime {
    controller: WidgetController,
    host: HtmlElement,
    config: Rc<WidgetConfig>,
    gesture: Vec<EventListener>,
    overlay: Option<OverlayNodes>,
    timers: HashMap<Deferred, Timeout>,
    globals: ListenerRegistry,
    observer: Option<PanelObserver>,
    rerender: UseForceUpdateHandle,
}

type SharedRuntime = Rc<RefCell<Runtime>>;

impl Runtime {
    fn new(props: &WidgetAppProps, rerender: UseForceUpdateHandle) -> Self {
        Self {
            controller: WidgetController::new(props.config.as_ref().clone()),
            host: props.host.clone(),
            config: props.config.clone(),
            gesture: Vec::new(),
            overlay: None,
            timers: HashMap::new(),
            globals: ListenerRegistry::default(),
            observer: None,
            rerender,
        }
    }
}

/// Runs one controller step, applies the effects it returned and re-renders.
/// No borrow of the runtime is held while effects run or while Yew renders.
fn dispatch<F>(runtime: &SharedRuntime, step: F)
where
    F: FnOnce(&mut WidgetController) -> Vec<Effect>,
{
    let effects = {
        let Ok(mut state) = runtime.try_borrow_mut() else {
            return;
        };
        step(&mut state.controller)
    };
    for effect in effects {
        apply(runtime, effect);
    }
    let rerender = runtime.borrow().rerender.clone();
    rerender.force_update();
}

/// Like [`dispatch`] for steps that only report whether anything changed.
fn update<F>(runtime: &SharedRuntime, step: F)
where
    F: FnOnce(&mut WidgetController) -> bool,
{
    let changed = {
        let Ok(mut state) = runtime.try_borrow_mut() else {
            return;
        };
        step(&mut state.controller)
    };
    if changed {
        let rerender = runtime.borrow().rerender.clone();
        rerender.force_update();
    }
}

fn apply(runtime: &SharedRuntime, effect: Effect) {
    match effect {
        Effect::CaptureGesture => {
            let listeners = gesture_listeners(runtime);
            runtime.borrow_mut().gesture = listeners;
        }
        Effect::ReleaseGesture => {
            let listeners = std::mem::take(&mut runtime.borrow_mut().gesture);
            drop(listeners);
        }
        Effect::OverlayShown(overlay) => {
            let config = runtime.borrow().config.clone();
            let nodes = OverlayNodes::show(&config, &overlay);
            if nodes.is_none() {
                console::warn!("chat widget: drag overlay unavailable");
            }
            runtime.borrow_mut().overlay = nodes;
        }
        Effect::OverlayMoved(overlay) => {
            let state = runtime.borrow();
            if let Some(nodes) = state.overlay.as_ref() {
                nodes.update(&state.config, &overlay);
            }
        }
        Effect::OverlayRemoved => {
            let nodes = runtime.borrow_mut().overlay.take();
            drop(nodes);
        }
        Effect::Schedule(kind) => {
            let weak = Rc::downgrade(runtime);
            let timeout = Timeout::new(kind.delay_ms(), move || {
                let Some(runtime) = weak.upgrade() else {
                    return;
                };
                let finished = runtime.borrow_mut().timers.remove(&kind);
                dispatch(&runtime, |controller| controller.deferred(kind));
                drop(finished);
            });
            runtime.borrow_mut().timers.insert(kind, timeout);
        }
        Effect::Cancel(kind) => {
            let timer = runtime.borrow_mut().timers.remove(&kind);
            drop(timer);
        }
        Effect::PositionChanged(corner) => {
            let host = runtime.borrow().host.clone();
            host::notify_position_change(&host, corner);
            console::log!(format!("chat widget: moved to {corner}"));
        }
    }
}

fn gesture_listeners(runtime: &SharedRuntime) -> Vec<EventListener> {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return Vec::new();
    };
    let weak = Rc::downgrade(runtime);
    let on_move = EventListener::new_with_options(
        &document,
        "pointermove",
        GESTURE_OPTIONS,
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let (Some(runtime), Some(viewport)) = (weak.upgrade(), host::viewport()) else {
                return;
            };
            event.prevent_default();
            let pointer = host::pointer_point(event);
            dispatch(&runtime, |controller| {
                controller.pointer_move(pointer, viewport)
            });
        },
    );
    let weak = Rc::downgrade(runtime);
    let on_up = EventListener::new_with_options(
        &document,
        "pointerup",
        GESTURE_OPTIONS,
        move |_event: &Event| {
            let (Some(runtime), Some(viewport)) = (weak.upgrade(), host::viewport()) else {
                return;
            };
            dispatch(&runtime, |controller| controller.pointer_up(viewport));
        },
    );
    let weak = Rc::downgrade(runtime);
    let on_cancel = EventListener::new_with_options(
        &document,
        "pointercancel",
        GESTURE_OPTIONS,
        move |_event: &Event| {
            let (Some(runtime), Some(viewport)) = (weak.upgrade(), host::viewport()) else {
                return;
            };
            dispatch(&runtime, |controller| controller.cancel_gesture(viewport));
        },
    );
    vec![on_move, on_up, on_cancel]
}

/// Watches the panel width so the handle chevrons follow it.
struct PanelObserver {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

impl PanelObserver {
    fn observe(panel: &Element, runtime: Weak<RefCell<Runtime>>) -> Option<Self> {
        let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
            let Some(runtime) = runtime.upgrade() else {
                return;
            };
            let Some(entry) = entries
                .iter()
                .last()
                .and_then(|entry| entry.dyn_into::<ResizeObserverEntry>().ok())
            else {
                return;
            };
            let Some(viewport) = host::viewport() else {
                return;
            };
            let width = entry.content_rect().width();
            update(&runtime, |controller| {
                controller.observe_panel_width(width, viewport)
            });
        });
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref()).ok()?;
        observer.observe(panel);
        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for PanelObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn attach(runtime: &SharedRuntime, panel: Option<Element>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let target: &EventTarget = window.as_ref();

    let weak = Rc::downgrade(runtime);
    let on_resize = EventListener::new(target, "resize", move |_event| {
        let Some(runtime) = weak.upgrade() else {
            return;
        };
        update(&runtime, |controller| {
            controller.reflow();
            true
        });
    });

    let weak = Rc::downgrade(runtime);
    let on_message = EventListener::new(target, "message", move |event| {
        let Some(event) = event.dyn_ref::<MessageEvent>() else {
            return;
        };
        let Some(runtime) = weak.upgrade() else {
            return;
        };
        let origin = event.origin();
        let kind = host::message_kind(event);
        update(&runtime, |controller| {
            controller.handle_message(&origin, kind.as_deref())
        });
    });

    let observer = panel.and_then(|panel| PanelObserver::observe(&panel, Rc::downgrade(runtime)));
    if observer.is_none() {
        console::warn!("chat widget: panel width is not observed");
    }

    let mut state = runtime.borrow_mut();
    state.globals.add(target, on_resize);
    state.globals.add(target, on_message);
    state.observer = observer;
}

fn detach(runtime: &SharedRuntime) {
    let effects = {
        let Ok(mut state) = runtime.try_borrow_mut() else {
            return;
        };
        state.controller.detach()
    };
    for effect in effects {
        apply(runtime, effect);
    }
    let mut state = runtime.borrow_mut();
    let listeners = state.globals.len();
    let targets = state.globals.target_count();
    state.globals.clear();
    drop(state.observer.take());
    console::log!(format!(
        "chat widget: detached ({listeners} listeners on {targets} targets)"
    ));
}

fn expand(runtime: &SharedRuntime, panel_ref: &NodeRef) {
    let Some(panel) = panel_ref.cast::<Element>() else {
        return;
    };
    let Some(viewport) = host::viewport() else {
        return;
    };
    let rect = panel.client_rect();
    dispatch(runtime, |controller| controller.expand_toggle(rect, viewport));
}

fn resize_side(
    edge: PanelEdge,
    view: &WidgetView,
    runtime: &SharedRuntime,
    panel_ref: &NodeRef,
) -> Html {
    let active = edge == view.active_edge;
    let on_press = {
        let runtime = runtime.clone();
        let panel_ref = panel_ref.clone();
        Callback::from(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            let Some(panel) = panel_ref.cast::<Element>() else {
                return;
            };
            event.prevent_default();
            let rect = panel.client_rect();
            let pointer_x = event.client_x() as f64;
            dispatch(&runtime, |controller| {
                controller.begin_resize(edge, pointer_x, rect)
            });
        })
    };
    let on_strip_dblclick = {
        let runtime = runtime.clone();
        let panel_ref = panel_ref.clone();
        Callback::from(move |_event: MouseEvent| expand(&runtime, &panel_ref))
    };
    let on_grip_click = {
        let runtime = runtime.clone();
        let panel_ref = panel_ref.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            expand(&runtime, &panel_ref);
        })
    };
    let on_grip_press = Callback::from(|event: PointerEvent| event.stop_propagation());
    let on_grip_dblclick = Callback::from(|event: MouseEvent| event.stop_propagation());
    let side = edge.as_str();
    let chevron = view.handles.for_edge(edge).class_name();

    html! {
        <div
            class={classes!("resize-side", side, (!active).then_some("inactive"))}
            onpointerdown={on_press}
            ondblclick={on_strip_dblclick}
        >
            <div class="resize-track"></div>
            <div
                class={classes!("side-handle-wrapper", side)}
                onpointerdown={on_grip_press}
                onclick={on_grip_click}
                ondblclick={on_grip_dblclick}
            >
                <div class={classes!("side-handle", chevron)}></div>
            </div>
        </div>
    }
}

#[function_component(WidgetApp)]
pub(crate) fn widget_app(props: &WidgetAppProps) -> Html {
    let force_update = use_force_update();
    let runtime = {
        let props = props.clone();
        use_mut_ref(move || Runtime::new(&props, force_update))
    };
    let panel_ref = use_node_ref();
    let button_ref = use_node_ref();

    {
        let runtime = runtime.clone();
        let panel_ref = panel_ref.clone();
        use_effect_with((), move |_| {
            attach(&runtime, panel_ref.cast::<Element>());
            console::log!("chat widget: attached");
            move || detach(&runtime)
        });
    }

    let view = runtime.borrow().controller.view();
    let css = stylesheet(&props.config);

    let on_button_press = {
        let runtime = runtime.clone();
        let button_ref = button_ref.clone();
        Callback::from(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            let Some(button) = button_ref.cast::<Element>() else {
                return;
            };
            event.prevent_default();
            let rect = button.client_rect();
            let pointer = host::pointer_point(&event);
            dispatch(&runtime, |controller| controller.press_button(pointer, rect));
        })
    };
    // Pointer clicks are resolved on release; only keyboard activation, which
    // reports a click count of zero, arrives here.
    let on_button_click = {
        let runtime = runtime.clone();
        Callback::from(move |event: MouseEvent| {
            if event.detail() != 0 {
                return;
            }
            update(&runtime, |controller| {
                controller.toggle();
                true
            });
        })
    };

    let visual = view.visual;
    let frame = props.config.frame_src.as_ref().map(|src| {
        html! {
            <iframe src={src.clone()} title="Chat" allow="clipboard-write"></iframe>
        }
    });

    html! {
        <>
            <style>{ css }</style>
            <div class="wrapper" style={view.wrapper_style.clone()}>
                <div class="button-wrapper" style={hidden_style(view.button_hidden)}>
                    <button
                        ref={button_ref}
                        type="button"
                        aria-label="Toggle chat"
                        class={classes!("chat-button", visual.open.then_some("open"))}
                        onpointerdown={on_button_press}
                        onclick={on_button_click}
                    >
                        <svg
                            viewBox={ICON_VIEW_BOX}
                            class={classes!("message-icon", visual.message_icon_scaled.then_some("scaled"))}
                        >
                            <path d={MESSAGE_ICON_PATH} />
                            <path class="stars" d={STARS_PATH} />
                        </svg>
                        <svg
                            viewBox={ICON_VIEW_BOX}
                            class={classes!("x-icon", visual.close_icon_scaled.then_some("scaled"))}
                            style={visual.close_icon_transform().map(|transform| format!("transform: {transform};"))}
                        >
                            <path d={CLOSE_ICON_PATH} />
                        </svg>
                    </button>
                </div>
            </div>
            <div class="resize-outline" style={view.outline_style.clone()}></div>
            <div
                ref={panel_ref.clone()}
                class={classes!(
                    "chat-container",
                    view.is_open.then_some("open"),
                    view.resizing.then_some("resizing")
                )}
                style={view.panel_style.clone()}
            >
                { resize_side(PanelEdge::Left, &view, &runtime, &panel_ref) }
                { resize_side(PanelEdge::Right, &view, &runtime, &panel_ref) }
                { for frame }
            </div>
        </>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::Cell;

    use chat_widget_core::style::POSITION_CHANGE_EVENT;
    use chat_widget_core::Corner;
    use js_sys::{Object, Reflect};
    use wasm_bindgen_test::*;
    use web_sys::{MessageEventInit, PointerEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(config: WidgetConfig) -> (HtmlElement, Element, yew::AppHandle<WidgetApp>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let host = document
            .create_element("div")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        let root = document.create_element("div").unwrap();
        host.append_child(&root).unwrap();
        document.body().unwrap().append_child(&host).unwrap();
        let props = WidgetAppProps {
            host: host.clone(),
            config: Rc::new(config),
        };
        let app = yew::Renderer::<WidgetApp>::with_root_and_props(root.clone(), props).render();
        (host, root, app)
    }

    async fn wait(ms: i32) {
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let _ = web_sys::window()
                .unwrap()
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        });
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }

    async fn settle() {
        wait(0).await;
    }

    fn count(selector: &str) -> u32 {
        let document = web_sys::window().unwrap().document().unwrap();
        document.query_selector_all(selector).unwrap().length()
    }

    fn pointer(kind: &str, x: f64, y: f64) -> PointerEvent {
        let init = PointerEventInit::new();
        init.set_bubbles(true);
        init.set_composed(true);
        init.set_cancelable(true);
        init.set_client_x(x as i32);
        init.set_client_y(y as i32);
        PointerEvent::new_with_event_init_dict(kind, &init).unwrap()
    }

    fn post_minimize(origin: &str) {
        let payload = Object::new();
        Reflect::set(&payload, &"type".into(), &"minimize".into()).unwrap();
        let init = MessageEventInit::new();
        init.set_data(&payload);
        init.set_origin(origin);
        let event = MessageEvent::new_with_event_init_dict("message", &init).unwrap();
        web_sys::window().unwrap().dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    async fn renders_closed_button_and_panel() {
        let (host, root, app) = mount(WidgetConfig::default());
        settle().await;
        let button = root.query_selector(".chat-button").unwrap().unwrap();
        assert!(!button.class_list().contains("open"));
        let panel = root.query_selector(".chat-container").unwrap().unwrap();
        assert!(!panel.class_list().contains("open"));
        let close = root.query_selector("svg.x-icon").unwrap().unwrap();
        assert!(close.class_list().contains("scaled"));
        app.destroy();
        host.remove();
    }

    #[wasm_bindgen_test]
    async fn only_the_edge_away_from_the_corner_is_active() {
        let config = WidgetConfig {
            default_position: Corner::BottomRight,
            ..WidgetConfig::default()
        };
        let (host, root, app) = mount(config);
        settle().await;
        let left = root.query_selector(".resize-side.left").unwrap().unwrap();
        let right = root.query_selector(".resize-side.right").unwrap().unwrap();
        assert!(!left.class_list().contains("inactive"));
        assert!(right.class_list().contains("inactive"));
        app.destroy();
        host.remove();
    }

    #[wasm_bindgen_test]
    async fn frame_is_rendered_when_configured() {
        let config = WidgetConfig {
            frame_src: Some("about:blank".to_string()),
            ..WidgetConfig::default()
        };
        let (host, root, app) = mount(config);
        settle().await;
        assert!(root.query_selector("iframe").unwrap().is_some());
        app.destroy();
        host.remove();
    }

    #[wasm_bindgen_test]
    async fn destroy_cancels_pending_work_and_listeners() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let origin = window.location().origin().unwrap();
        let config = WidgetConfig {
            default_position: Corner::BottomRight,
            trusted_origin: origin.clone(),
            ..WidgetConfig::default()
        };
        let ghosts = count(".chat-widget-ghost");
        let placeholders = count(".chat-widget-placeholder");
        let (host, root, app) = mount(config);
        settle().await;

        let moves = Rc::new(Cell::new(0));
        let _moves = {
            let moves = moves.clone();
            EventListener::new(&host, POSITION_CHANGE_EVENT, move |_| {
                moves.set(moves.get() + 1)
            })
        };

        post_minimize(&origin);
        settle().await;
        let panel = root.query_selector(".chat-container").unwrap().unwrap();
        assert!(panel.class_list().contains("open"));

        let button = root.query_selector(".chat-button").unwrap().unwrap();
        let rect = button.get_bounding_client_rect();
        let (x, y) = (
            rect.left() + rect.width() / 2.0,
            rect.top() + rect.height() / 2.0,
        );
        button.dispatch_event(&pointer("pointerdown", x, y)).unwrap();
        document.dispatch_event(&pointer("pointermove", 10.0, 10.0)).unwrap();
        document.dispatch_event(&pointer("pointerup", 10.0, 10.0)).unwrap();
        assert_eq!(moves.get(), 1);
        assert_eq!(count(".chat-widget-ghost"), ghosts + 1);
        assert_eq!(count(".chat-widget-placeholder"), placeholders + 1);

        app.destroy();
        settle().await;
        assert_eq!(count(".chat-widget-ghost"), ghosts);
        assert_eq!(count(".chat-widget-placeholder"), placeholders);

        wait(400).await;
        assert_eq!(count(".chat-widget-ghost"), ghosts);
        assert_eq!(count(".chat-widget-placeholder"), placeholders);
        assert_eq!(root.child_element_count(), 0);

        post_minimize(&origin);
        window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
        document.dispatch_event(&pointer("pointerup", 10.0, 10.0)).unwrap();
        settle().await;
        assert_eq!(root.child_element_count(), 0);
        assert_eq!(moves.get(), 1);
        host.remove();
    }
}
