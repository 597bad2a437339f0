pub mod live_classes;

pub use live_classes::configure_live_class_routes;
