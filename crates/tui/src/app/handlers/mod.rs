mod keys;
mod mouse;

pub(crate) use keys::{handle_key, handle_paste};
pub(crate) use mouse::handle_mouse;
