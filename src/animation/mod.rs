pub(crate) mod animated;
pub(crate) mod curve;
pub(crate) mod script;
pub(crate) mod shared;
pub(crate) mod tween;
pub(crate) mod value;
