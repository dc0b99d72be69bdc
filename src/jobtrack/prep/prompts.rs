//! Prompt construction for the two generation flows.
//!
//! The wording is part of the contract with the text generator: the summary
//! ends up in a record's notes and is expected to be a short bullet list, the
//! interview prep is rendered as markdown.

pub fn summary_prompt(description: &str) -> String {
    format!(
        "Summarize the following job description in 2-3 bullet points, focusing on the most \
         critical required skills and responsibilities:\n\n{}",
        description.trim()
    )
}

pub fn interview_prep_prompt(role: &str, company: &str) -> String {
    format!(
        "I am preparing for an interview for the role of \"{}\" at \"{}\". Please generate the \
         following for me:\n\
         1. A list of 5-7 potential technical and behavioral interview questions tailored to this \
         role and company.\n\
         2. Three concise, actionable tips for success in the interview.\n\n\
         Format the output clearly with markdown headings.",
        role.trim(),
        company.trim()
    )
}
