use std::future::Future;

use tracing::{debug, error, info};

use super::clean::clean_ai_response;
use super::refine::refine_prompt;
use super::selection::UserSelection;
use crate::llm::GenerationError;
use crate::utils::trim_line;

pub const MISSING_THEME_MESSAGE: &str = "Please enter a prompt to generate lyrics.";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate content";
pub const GENERATION_SUCCEEDED_MESSAGE: &str = "Here are your generated lyrics:";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Banner {
    Validation(&'static str),
    Success(&'static str),
    Failure(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub refined_prompt: Option<String>,
    pub banner: Banner,
    /// Empty whenever generation failed.
    pub lyrics: String,
}

impl Submission {
    pub fn is_success(&self) -> bool {
        matches!(self.banner, Banner::Success(_))
    }
}

/// Runs one "Generate Lyrics" press.
///
/// `generate` is called at most once, and only when the theme is present.
/// Failures are logged with their classification and masked to an empty
/// result behind a generic message.
pub async fn submit<F, Fut>(selection: &UserSelection, generate: F) -> Submission
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<String, GenerationError>>,
{
    if trim_line(&selection.theme).is_none() {
        return Submission {
            refined_prompt: None,
            banner: Banner::Validation(MISSING_THEME_MESSAGE),
            lyrics: String::new(),
        };
    }

    let refined_prompt = refine_prompt(selection);
    debug!(
        creativity = %selection.creativity,
        "creativity level is collected but not sent with the generation request"
    );

    let lyrics = generate_lyrics(generate(refined_prompt.clone()).await);
    let banner = if lyrics.is_empty() {
        Banner::Failure(GENERATION_FAILED_MESSAGE)
    } else {
        Banner::Success(GENERATION_SUCCEEDED_MESSAGE)
    };

    Submission {
        refined_prompt: Some(refined_prompt),
        banner,
        lyrics,
    }
}

/// Cleans a completion, or reduces a failed call to an empty string.
pub fn generate_lyrics(result: Result<String, GenerationError>) -> String {
    match result {
        Ok(raw) => {
            let cleaned = clean_ai_response(&raw);
            info!(chars = cleaned.len(), "lyrics generated");
            cleaned
        }
        Err(err) => {
            error!(kind = err.kind(), error = %err, "lyrics generation failed");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::song::selection::{Creativity, Genre, Purpose};

    fn selection(theme: &str) -> UserSelection {
        UserSelection {
            genre: Genre::Rock,
            writer_style: "Bob Dylan".to_string(),
            theme: theme.to_string(),
            purpose: Purpose::Heartfelt,
            creativity: Creativity::default(),
        }
    }

    #[tokio::test]
    async fn empty_theme_skips_generation() {
        let calls = Cell::new(0);
        for theme in ["", "   \n"] {
            let submission = submit(&selection(theme), |_prompt| {
                calls.set(calls.get() + 1);
                async { Ok("never".to_string()) }
            })
            .await;

            assert_eq!(submission.banner, Banner::Validation(MISSING_THEME_MESSAGE));
            assert!(submission.refined_prompt.is_none());
            assert!(submission.lyrics.is_empty());
        }
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn failure_is_masked_to_empty_lyrics() {
        let submission = submit(&selection("rain on a tin roof"), |_prompt| async {
            Err(GenerationError::Network("connection refused".to_string()))
        })
        .await;

        assert_eq!(submission.banner, Banner::Failure(GENERATION_FAILED_MESSAGE));
        assert_eq!(submission.lyrics, "");
        assert!(submission.refined_prompt.is_some());
        assert!(!submission.is_success());
    }

    #[tokio::test]
    async fn success_cleans_completion_and_keeps_prompt() {
        let seen = Cell::new(None::<String>);
        let submission = submit(&selection("rain on a tin roof"), |prompt| {
            seen.set(Some(prompt));
            async { Ok("```\nTin roof singing\n```".to_string()) }
        })
        .await;

        assert!(submission.is_success());
        assert_eq!(submission.lyrics, "Tin roof singing");
        let prompt = seen.take().expect("generator should receive the prompt");
        assert_eq!(submission.refined_prompt.as_deref(), Some(prompt.as_str()));
        for label in ["Genre", "Lyrics Writer Style", "Purpose", "Theme/Prompt"] {
            assert!(prompt.contains(label));
        }
        assert!(prompt.contains("Soulful and deep"));
        assert!(prompt.contains("timeless and poetic"));
    }

    #[tokio::test]
    async fn fence_only_completion_counts_as_failure() {
        let submission = submit(&selection("rain"), |_prompt| async {
            Ok("```json\n```".to_string())
        })
        .await;
        assert_eq!(submission.banner, Banner::Failure(GENERATION_FAILED_MESSAGE));
    }

    #[test]
    fn every_error_kind_yields_empty_string() {
        let errors = [
            GenerationError::MissingApiKey,
            GenerationError::Authentication("bad key".into()),
            GenerationError::RateLimited,
            GenerationError::ContentBlocked("SAFETY".into()),
            GenerationError::EmptyCompletion,
        ];
        for err in errors {
            assert_eq!(generate_lyrics(Err(err)), "");
        }
    }
}
