pub mod generator;

pub use app::{TestApp, make_test_app};
pub use generator::ScriptedGenerator;
