pub(crate) mod background;
pub(crate) mod foreground;
pub(crate) mod message;
pub(crate) mod resize;
pub(crate) mod scheduler;
pub(crate) mod select;
