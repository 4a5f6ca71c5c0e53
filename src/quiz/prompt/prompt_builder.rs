//! Prompt builder for quiz generation.

use crate::quiz::core::errors::QuizResult;
use crate::quiz::core::kinds::QuizType;
use crate::quiz::core::request::QuizRequest;
use crate::quiz::response::ANSWERS_DELIMITER;

const ROLE_PREAMBLE: &str = "You are an expert quiz maker for technical fields. \
Let's think step by step and\ncreate a quiz with ";

const FORMAT_GUIDE: &str = r"The format of the quiz could be one of the following:
- Multiple-choice:
    Questions:
        <Question1>: <a. Answer 1>, <b. Answer 2>, <c. Answer 3>, <d. Answer 4>
        <Question2>: <a. Answer 1>, <b. Answer 2>, <c. Answer 3>, <d. Answer 4>
        ....
    **Answers:**
        <Answer1>: <a|b|c|d>
        <Answer2>: <a|b|c|d>
        ....
    Example:
        Questions:
        1. What is the time complexity of searching a balanced binary search tree?
            a. O(n)
            b. O(log n)
            c. O(n^2)
            d. O(1)
        **Answers:**
        1. b
- True-false:
    Questions:
        <Question1>: <True|False>
        <Question2>: <True|False>
        ....
    **Answers:**
        <Answer1>: <True|False>
        <Answer2>: <True|False>
        ....
    Example:
        Questions:
        1. A binary search tree keeps its keys in sorted order.
        2. Binary search trees can only be implemented with arrays.
        **Answers:**
        1. True
        2. False
- Open-ended:
    Questions:
        <Question1>:
        <Question2>:
    **Answers:**
        <Answer1>:
        <Answer2>:
    Example:
        Questions:
        1. What is a binary search tree?
        2. How are binary search trees implemented?
        **Answers:**
        1. A binary search tree is a data structure that stores keys in sorted order.
        2. Binary search trees are usually implemented with linked nodes holding left and right children.
";

/// Build the quiz prompt from raw parameters.
///
/// `question_count` is not range-checked here; `context` is inserted verbatim.
///
/// # Errors
/// Returns `InvalidParameter` if `quiz_type` is not a known quiz type.
pub fn build_prompt(question_count: u32, quiz_type: &str, context: &str) -> QuizResult<String> {
    let quiz_type = quiz_type.parse::<QuizType>()?;
    Ok(render_prompt(question_count, quiz_type, context))
}

/// Build the quiz prompt for a validated request.
#[must_use]
pub fn build_quiz_prompt(request: &QuizRequest) -> String {
    render_prompt(request.question_count, request.quiz_type, &request.context)
}

fn render_prompt(question_count: u32, quiz_type: QuizType, context: &str) -> String {
    let mut out =
        String::with_capacity(ROLE_PREAMBLE.len() + FORMAT_GUIDE.len() + context.len() + 256);

    out.push_str(ROLE_PREAMBLE);
    out.push_str(&question_count.to_string());
    out.push(' ');
    out.push_str(quiz_type.as_str());
    out.push_str(" questions about the following concept/content: ");
    out.push_str(context);
    out.push_str(".\n\n");

    out.push_str(FORMAT_GUIDE);
    out.push('\n');

    out.push_str("Write only the ");
    out.push_str(quiz_type.as_str());
    out.push_str(" format. List every question first, then write the line ");
    out.push_str(ANSWERS_DELIMITER);
    out.push_str(" exactly once, followed by the answers.\n");

    out
}
