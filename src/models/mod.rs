pub mod user;
pub mod course;
pub mod enrollment;
pub mod assignment;
pub mod submission;
pub mod integrity;

pub use user::*;
pub use course::*;
pub use enrollment::*;
pub use assignment::*;
pub use submission::*;
pub use integrity::*;
