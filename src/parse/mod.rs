pub mod bullet;

pub use bullet::{BULLET_MARKER, BulletLine, ensure_bullet_line, normalize};
