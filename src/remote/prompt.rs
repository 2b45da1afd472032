use crate::constants::{PROMPT_CV_CHARS, PROMPT_JOB_CHARS};

/// First `max_chars` characters of `text` (characters, not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Builds the recruiter prompt asking for a single integer score.
///
/// The job text is cut to 1500 characters and the CV text to 2500.
pub fn build_scoring_prompt(cv_text: &str, job_text: &str) -> String {
    let job = truncate_chars(job_text, PROMPT_JOB_CHARS);
    let cv = truncate_chars(cv_text, PROMPT_CV_CHARS);

    format!(
        "You are an expert HR recruiter. Assess how well this CV matches this job offer.

JOB OFFER:
{job}

CANDIDATE CV:
{cv}

INSTRUCTIONS:
- Evaluate the match between the CV and the offer
- Consider technical skills, experience, education and industry
- Score from 0 to 100 where:
  * 90-100: perfect candidate, excellent match
  * 75-89: very good candidate, strong skills
  * 60-74: decent candidate, some missing skills
  * 40-59: average candidate, significant gap
  * 20-39: weak candidate, little overlap
  * 0-19: no match

ANSWER:
Reply ONLY with an integer between 0 and 100, without explanation."
    )
}
