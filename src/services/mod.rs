pub mod live_classes;

pub use live_classes::LiveClassService;
