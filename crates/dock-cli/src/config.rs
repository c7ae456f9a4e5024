mod builder;
mod file;

pub use builder::build_params;
