pub mod app;
pub mod finder;

pub use app::App;
