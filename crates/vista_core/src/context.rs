//! Ambient context injection
//!
//! A [`ContextProvider`] owns descendant content and hands each descendant a
//! shared reference to a context value whenever it renders. Descendants never
//! hold on to the value between renders, so the provider is free to swap in a
//! new one.

/// Descendant content rendered against a context value of type `T`
pub trait Consumer<T> {
    fn render(&mut self, context: &T);
}

impl<T, F> Consumer<T> for F
where
    F: FnMut(&T),
{
    fn render(&mut self, context: &T) {
        self(context)
    }
}

/// Supplies a context value to its descendants
pub struct ContextProvider<T> {
    children: Vec<Box<dyn Consumer<T>>>,
}

impl<T> ContextProvider<T> {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    pub fn with_children(children: Vec<Box<dyn Consumer<T>>>) -> Self {
        Self { children }
    }

    pub fn push(&mut self, child: impl Consumer<T> + 'static) {
        self.children.push(Box::new(child));
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Render every descendant with `value`
    pub fn provide(&mut self, value: &T) {
        for child in self.children.iter_mut() {
            child.render(value);
        }
    }
}

impl<T> Default for ContextProvider<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_provide_reaches_every_child() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut provider = ContextProvider::new();
        for _ in 0..3 {
            let seen = seen.clone();
            provider.push(move |value: &u32| seen.borrow_mut().push(*value));
        }

        provider.provide(&7);
        provider.provide(&9);
        assert_eq!(provider.len(), 3);
        assert_eq!(*seen.borrow(), vec![7, 7, 7, 9, 9, 9]);
    }

    #[test]
    fn test_struct_consumer() {
        struct Label {
            text: String,
        }

        impl Consumer<String> for Label {
            fn render(&mut self, context: &String) {
                self.text = format!("[{context}]");
            }
        }

        let label = Rc::new(RefCell::new(Label {
            text: String::new(),
        }));
        let label_clone = label.clone();
        let mut provider = ContextProvider::new();
        provider.push(move |context: &String| label_clone.borrow_mut().render(context));
        provider.provide(&"dark".to_string());

        assert_eq!(label.borrow().text, "[dark]");
    }
}
