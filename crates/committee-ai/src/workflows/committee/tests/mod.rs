mod classifier;
mod common;
mod routing;
