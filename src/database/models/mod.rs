pub mod course;
pub mod user;

pub use course::{Course, CourseChanges, CourseOwnerRow, CourseWithOwner, NewCourse};
pub use user::{NewUser, User, UserSummary};
