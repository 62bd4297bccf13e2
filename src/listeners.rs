use gloo::events::EventListener;
use web_sys::EventTarget;

/// Long-lived listeners grouped by the target they are attached to. Dropping
/// an entry removes its listeners from the DOM.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: Vec<(EventTarget, Vec<EventListener>)>,
}

impl ListenerRegistry {
    pub(crate) fn add(&mut self, target: &EventTarget, listener: EventListener) {
        match self.entries.iter_mut().find(|(known, _)| known == target) {
            Some((_, listeners)) => listeners.push(listener),
            None => self.entries.push((target.clone(), vec![listener])),
        }
    }

    pub(crate) fn target_count(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.iter().map(|(_, listeners)| listeners.len()).sum()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
