use gemharvest_core::Submission;

/// Keywords marking a submission as a prompt/instruction candidate.
/// Substring match on purpose: recall beats precision here, a human
/// reviews the output directory anyway.
pub const GEM_KEYWORDS: [&str; 5] = ["gem", "prompt", "instruction", "system prompt", "shared gem"];

/// Case-insensitive keyword check over title and selftext together.
pub fn is_gem(submission: &Submission) -> bool {
    let content = format!("{} {}", submission.title, submission.selftext).to_lowercase();
    GEM_KEYWORDS.iter().any(|keyword| content.contains(keyword))
}
