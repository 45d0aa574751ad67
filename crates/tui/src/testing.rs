use crate::clipboard::{ClipboardError, ClipboardSink};
use crate::links::LinkOpener;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
pub(crate) struct RecordingLinks {
    opened: Rc<RefCell<Vec<String>>>,
}

impl RecordingLinks {
    pub(crate) fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl LinkOpener for RecordingLinks {
    fn open(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingClipboard {
    copied: Rc<RefCell<Vec<String>>>,
    fail: bool,
}

impl RecordingClipboard {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn copied(&self) -> Vec<String> {
        self.copied.borrow().clone()
    }
}

impl ClipboardSink for RecordingClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Unavailable("no display".to_string()));
        }
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}
