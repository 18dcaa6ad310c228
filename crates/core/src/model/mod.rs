mod description;
mod ids;
mod image;
mod member;
mod question;
mod selections;

pub use ids::{QuestionId, StudentId};

pub use description::Description;
pub use image::{ImageAsset, ImageFormat, ImageHandle, ImageNameError};
pub use member::{Member, MemberError};
pub use question::{Choice, Question, QuestionError};
pub use selections::{Selections, SelectionsError};
