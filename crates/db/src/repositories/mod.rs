//! Repository layer: one zero-sized struct per table.

pub mod alert_repo;
pub mod camera_repo;
pub mod detection_repo;
pub mod entrance_repo;
pub mod user_repo;

pub use alert_repo::AlertRepo;
pub use camera_repo::CameraRepo;
pub use detection_repo::DetectionRepo;
pub use entrance_repo::EntranceRepo;
pub use user_repo::UserRepo;
