//! Общие утилиты для систем симуляции (yaw-only математика, сглаживание)

pub mod math;

pub use math::{move_towards, slerp_yaw_towards, yaw_rotation_towards};
