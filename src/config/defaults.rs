use crate::ui::{DEFAULT_CANCEL_TEXT, DEFAULT_CLASS, DEFAULT_OK_TEXT, DEFAULT_WRAPPER_CLASS};

pub(super) fn default_wrapper_class() -> String {
    DEFAULT_WRAPPER_CLASS.to_string()
}

pub(super) fn default_class() -> String {
    DEFAULT_CLASS.to_string()
}

pub(super) fn default_ok_text() -> String {
    DEFAULT_OK_TEXT.to_string()
}

pub(super) fn default_cancel_text() -> String {
    DEFAULT_CANCEL_TEXT.to_string()
}
