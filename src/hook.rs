//! Single-Slot Hook
//!
//! Holds at most one handler. Registering again replaces the previous one.

use std::cell::RefCell;
use std::rc::Rc;

pub struct Hook<Args: ?Sized> {
    handler: RefCell<Option<Rc<dyn Fn(&Args)>>>,
}

impl<Args: ?Sized> Default for Hook<Args> {
    fn default() -> Self {
        Self {
            handler: RefCell::new(None),
        }
    }
}

impl<Args: ?Sized> Hook<Args> {
    /// Install `f`, returning true if it replaced an existing handler
    pub fn set(&self, f: impl Fn(&Args) + 'static) -> bool {
        let handler: Rc<dyn Fn(&Args)> = Rc::new(f);
        self.handler.replace(Some(handler)).is_some()
    }

    /// Call the handler if one is installed
    pub fn fire(&self, args: &Args) {
        // Clone out first: the handler may call `set` on this hook.
        let handler = self.handler.borrow().clone();
        if let Some(handler) = handler {
            handler(args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_fire_without_handler() {
        let hook: Hook<str> = Hook::default();
        hook.fire("nothing happens");
        assert!(!hook.set(|_| {}));
    }

    #[test]
    fn test_second_set_replaces_first() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let hook: Hook<i32> = Hook::default();

        assert!(!hook.set({
            let first = first.clone();
            move |v| first.set(first.get() + v)
        }));
        assert!(hook.set({
            let second = second.clone();
            move |v| second.set(second.get() + v)
        }));

        hook.fire(&5);
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 5);
    }

    #[test]
    fn test_handler_may_reregister() {
        let hook: Rc<Hook<()>> = Rc::new(Hook::default());
        let calls = Rc::new(Cell::new(0));
        hook.set({
            let hook = hook.clone();
            let calls = calls.clone();
            move |_| {
                calls.set(calls.get() + 1);
                hook.set(|_| {});
            }
        });
        hook.fire(&());
        hook.fire(&());
        assert_eq!(calls.get(), 1);
    }
}
