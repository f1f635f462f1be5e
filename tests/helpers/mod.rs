pub mod factories;
pub mod factory;
pub mod logs;
pub mod stub_engine;

pub use factory::Factory;
pub use logs::capture_logs;
pub use stub_engine::StubEngine;
