pub(crate) mod deque;
pub(crate) mod engine;
pub(crate) mod layer;
pub(crate) mod visual;
