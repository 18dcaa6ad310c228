mod question_vm;
mod result_vm;

pub use question_vm::{QuestionCardVm, QuestionOutcome, QuizVm, start_quiz};
pub use result_vm::{ResultVm, image_data_url, load_image_data_url};
