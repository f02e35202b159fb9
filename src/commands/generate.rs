use anyhow::Result;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use tracing::info;

use crate::llm::GeminiClient;
use crate::palette::Palette;
use crate::song::selection::parse_creativity;
use crate::song::{Banner, Creativity, Genre, Purpose, Submission, UserSelection, submit};
use crate::utils::{ask_yn, strip_controls_and_escapes, trim_line};

const TITLE: &str = "\u{1F3B6} Song Lyrics Maker";
const DESCRIPTION: &str = "Create custom song lyrics tailored to your preferences!";
const RULE_WIDTH: usize = 48;

/// Values given on the command line. They seed the form, or replace it
/// entirely when a theme is present.
#[derive(Clone, Debug, Default)]
pub struct FormDefaults {
    pub genre: Option<Genre>,
    pub writer_style: Option<String>,
    pub theme: Option<String>,
    pub purpose: Option<Purpose>,
    pub creativity: Option<Creativity>,
}

impl FormDefaults {
    fn into_selection(self, theme: String) -> UserSelection {
        UserSelection {
            genre: self.genre.unwrap_or(Genre::Pop),
            writer_style: strip_controls_and_escapes(&self.writer_style.unwrap_or_default()),
            theme: strip_controls_and_escapes(&theme),
            purpose: self.purpose.unwrap_or(Purpose::Fun),
            creativity: self.creativity.unwrap_or_default(),
        }
    }
}

pub async fn run(client: &GeminiClient, defaults: FormDefaults) -> Result<()> {
    if let Some(theme) = defaults.theme.clone() {
        let selection = defaults.into_selection(theme);
        generate_and_render(client, &selection).await;
        return Ok(());
    }

    println!("\n{}", Palette::bold(TITLE));
    println!("{}\n", Palette::dim(DESCRIPTION));

    let mut seed = defaults;
    loop {
        let selection = collect_user_inputs(&seed)?;

        if ask_yn("Generate Lyrics?")? {
            generate_and_render(client, &selection).await;
        }

        if !ask_yn("Write another song?")? {
            return Ok(());
        }
        seed = FormDefaults {
            genre: Some(selection.genre),
            writer_style: Some(selection.writer_style),
            theme: None,
            purpose: Some(selection.purpose),
            creativity: Some(selection.creativity),
        };
    }
}

async fn generate_and_render(client: &GeminiClient, selection: &UserSelection) {
    info!(genre = %selection.genre, purpose = %selection.purpose, "lyrics requested");
    if trim_line(&selection.theme).is_some() {
        println!("{}", Palette::dim("Generating lyrics..."));
    }

    let submission =
        submit(selection, |prompt| async move { client.generate(&prompt).await }).await;
    println!("{}", render_submission(&submission));
}

fn collect_user_inputs(seed: &FormDefaults) -> Result<UserSelection> {
    let theme = ColorfulTheme::default();

    let genre_labels: Vec<&str> = Genre::ALL.iter().map(|g| g.label()).collect();
    let genre_default = seed
        .genre
        .and_then(|genre| Genre::ALL.iter().position(|g| *g == genre))
        .unwrap_or(0);
    let genre_idx = Select::with_theme(&theme)
        .with_prompt("Select Genre")
        .items(&genre_labels[..])
        .default(genre_default)
        .interact()?;

    let writer_style: String = Input::with_theme(&theme)
        .with_prompt("Lyrics Writer Style (e.g., Bob Dylan, Taylor Swift, Eminem)")
        .with_initial_text(seed.writer_style.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let song_theme: String = Input::with_theme(&theme)
        .with_prompt("Prompt (a brief description or theme for the song)")
        .with_initial_text(seed.theme.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let purpose_labels: Vec<&str> = Purpose::ALL.iter().map(|p| p.label()).collect();
    let purpose_default = seed
        .purpose
        .and_then(|purpose| Purpose::ALL.iter().position(|p| *p == purpose))
        .unwrap_or(0);
    let purpose_idx = Select::with_theme(&theme)
        .with_prompt("Purpose of the Song")
        .items(&purpose_labels[..])
        .default(purpose_default)
        .interact()?;

    let creativity_raw: String = Input::with_theme(&theme)
        .with_prompt("Creativity Level (0.1 - 1.0)")
        .default(seed.creativity.unwrap_or_default().to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            parse_creativity(input).map(|_| ())
        })
        .interact_text()?;
    let creativity = parse_creativity(&creativity_raw).map_err(anyhow::Error::msg)?;

    Ok(UserSelection {
        genre: Genre::ALL[genre_idx],
        writer_style: strip_controls_and_escapes(&writer_style),
        theme: strip_controls_and_escapes(&song_theme),
        purpose: Purpose::ALL[purpose_idx],
        creativity,
    })
}

fn section(title: &str) -> String {
    let fill = RULE_WIDTH.saturating_sub(title.chars().count() + 4);
    Palette::paint(Palette::BORDER, format!("── {title} {}", "─".repeat(fill)))
}

/// Prompt preview, status banner and lyrics, in that order. Regions that
/// don't apply to the outcome are left out.
pub fn render_submission(submission: &Submission) -> String {
    let mut out = String::new();

    if let Some(prompt) = &submission.refined_prompt {
        out.push_str(&format!(
            "\n{}\n{}\n{}\n",
            Palette::bold("Refined Prompt for Generation:"),
            section("Prompt Preview"),
            prompt.trim_end()
        ));
    }

    let banner = match &submission.banner {
        Banner::Validation(message) => Palette::paint(Palette::WARNING, message),
        Banner::Failure(message) => Palette::paint(Palette::DANGER, message),
        Banner::Success(message) => Palette::paint(Palette::SUCCESS, message),
    };
    out.push_str(&format!("\n{banner}\n"));

    if submission.is_success() {
        out.push_str(&format!(
            "{}\n{}\n",
            section("Generated Lyrics"),
            submission.lyrics
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::pipeline::{
        GENERATION_FAILED_MESSAGE, GENERATION_SUCCEEDED_MESSAGE, MISSING_THEME_MESSAGE,
    };

    #[test]
    fn flags_fill_missing_fields_with_form_defaults() {
        let selection = FormDefaults {
            genre: Some(Genre::Jazz),
            ..FormDefaults::default()
        }
        .into_selection("late trains".to_string());

        assert_eq!(selection.genre, Genre::Jazz);
        assert_eq!(selection.purpose, Purpose::Fun);
        assert_eq!(selection.writer_style, "");
        assert_eq!(selection.creativity, Creativity::default());
    }

    #[test]
    fn flag_values_are_sanitized_like_form_input() {
        let selection = FormDefaults {
            writer_style: Some("  \x1b[31mBob Dylan\x1b[0m\x07".to_string()),
            ..FormDefaults::default()
        }
        .into_selection(" rain\r on a \x1b[1mtin\x1b[0m roof ".to_string());

        assert_eq!(selection.writer_style, "Bob Dylan");
        assert_eq!(selection.theme, "rain on a tin roof");
    }

    #[test]
    fn validation_renders_only_banner() {
        let rendered = strip_controls_and_escapes(&render_submission(&Submission {
            refined_prompt: None,
            banner: Banner::Validation(MISSING_THEME_MESSAGE),
            lyrics: String::new(),
        }));
        assert_eq!(rendered, MISSING_THEME_MESSAGE);
    }

    #[test]
    fn success_renders_three_regions_in_order() {
        let rendered = strip_controls_and_escapes(&render_submission(&Submission {
            refined_prompt: Some("Create song lyrics\n".to_string()),
            banner: Banner::Success(GENERATION_SUCCEEDED_MESSAGE),
            lyrics: "Tin roof singing".to_string(),
        }));

        let preview = rendered.find("Prompt Preview").unwrap();
        let banner = rendered.find(GENERATION_SUCCEEDED_MESSAGE).unwrap();
        let lyrics = rendered.find("Tin roof singing").unwrap();
        assert!(preview < banner && banner < lyrics);
        assert!(rendered.starts_with("Refined Prompt for Generation:"));
    }

    #[test]
    fn failure_keeps_prompt_and_hides_lyrics() {
        let rendered = strip_controls_and_escapes(&render_submission(&Submission {
            refined_prompt: Some("Create song lyrics".to_string()),
            banner: Banner::Failure(GENERATION_FAILED_MESSAGE),
            lyrics: String::new(),
        }));
        assert!(rendered.contains("Create song lyrics"));
        assert!(rendered.ends_with(GENERATION_FAILED_MESSAGE));
        assert!(!rendered.contains("Generated Lyrics"));
    }

    #[test]
    fn section_rule_has_fixed_width() {
        let rule = strip_controls_and_escapes(&section("Prompt Preview"));
        assert_eq!(rule.chars().count(), RULE_WIDTH);
    }
}
