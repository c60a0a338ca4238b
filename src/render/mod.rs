pub(crate) mod cpu;
pub(crate) mod frame;
pub(crate) mod glyph;
pub(crate) mod recording;
pub(crate) mod surface;
pub(crate) mod text;
