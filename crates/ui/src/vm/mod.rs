mod question_form;
mod quiz_vm;
mod time_fmt;

pub use question_form::{QuestionFormVm, form_error_message};
pub use quiz_vm::{QuizVm, load_quiz};
pub use time_fmt::format_completed_at;
