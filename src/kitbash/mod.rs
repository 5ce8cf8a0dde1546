pub(crate) mod flatten;
pub(crate) mod model;
pub(crate) mod planner;
pub(crate) mod presets;
