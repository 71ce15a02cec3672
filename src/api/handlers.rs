pub mod plots;
pub mod zones;

pub use plots::save_plot;
pub use zones::get_zone;
