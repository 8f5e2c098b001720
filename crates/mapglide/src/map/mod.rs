//! Map view collaborator fed by the viewport controller

mod view;

pub use view::MapView;
