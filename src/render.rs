pub(crate) mod cpu;
pub(crate) mod recording;
pub(crate) mod renderer;
pub(crate) mod sink;
pub(crate) mod surface;
