//! wake-check adapters — filesystem, model, and detector implementations of
//! the core ports.

pub mod detector;
pub mod fs;
pub mod models;
pub mod store;

pub use detector::ScrfdDetector;
pub use fs::FsFrameSource;
pub use models::{detector_model_path, ensure_detector_model, models_dir, DETECTOR_MODEL};
pub use store::FsCalibrationStore;
