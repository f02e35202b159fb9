use super::selection::{Genre, UserSelection};

pub const ENERGETIC_TONE: &str = "Energetic and upbeat";
pub const SOULFUL_TONE: &str = "Soulful and deep";
pub const MODERN_LANGUAGE: &str = "modern and conversational";
pub const TIMELESS_LANGUAGE: &str = "timeless and poetic";

pub fn tone_for(genre: Genre) -> &'static str {
    match genre {
        Genre::Pop | Genre::Electronic => ENERGETIC_TONE,
        _ => SOULFUL_TONE,
    }
}

pub fn language_style_for(genre: Genre) -> &'static str {
    match genre {
        Genre::HipHop | Genre::Pop => MODERN_LANGUAGE,
        _ => TIMELESS_LANGUAGE,
    }
}

/// Builds the instruction sent to the model. Creativity is not part of it.
pub fn refine_prompt(selection: &UserSelection) -> String {
    let tone = tone_for(selection.genre);
    let language_style = language_style_for(selection.genre);

    format!(
        "Create song lyrics with the following characteristics:\n\
         - **Genre**: {genre}\n\
         - **Lyrics Writer Style**: {style}\n\
         - **Purpose**: {purpose}\n\
         - **Theme/Prompt**: {theme}\n\
         \nAdditional Details:\n\
         1. Tone: {tone}.\n\
         2. Include imagery and metaphors matching the genre.\n\
         3. Keep the language {language_style}.\n",
        genre = selection.genre,
        style = selection.writer_style,
        purpose = selection.purpose,
        theme = selection.theme,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::selection::{Creativity, Purpose};

    fn selection(genre: Genre) -> UserSelection {
        UserSelection {
            genre,
            writer_style: "Bob Dylan".to_string(),
            theme: "rain on a tin roof".to_string(),
            purpose: Purpose::Heartfelt,
            creativity: Creativity::default(),
        }
    }

    #[test]
    fn tone_follows_genre() {
        for genre in Genre::ALL {
            let prompt = refine_prompt(&selection(genre));
            if matches!(genre, Genre::Pop | Genre::Electronic) {
                assert!(prompt.contains("Tone: Energetic and upbeat."), "{genre}");
                assert!(!prompt.contains(SOULFUL_TONE));
            } else {
                assert!(prompt.contains("Tone: Soulful and deep."), "{genre}");
                assert!(!prompt.contains(ENERGETIC_TONE));
            }
        }
    }

    #[test]
    fn language_style_follows_genre() {
        for genre in Genre::ALL {
            let prompt = refine_prompt(&selection(genre));
            let expected = if matches!(genre, Genre::HipHop | Genre::Pop) {
                "Keep the language modern and conversational."
            } else {
                "Keep the language timeless and poetic."
            };
            assert!(prompt.contains(expected), "{genre}");
        }
    }

    #[test]
    fn other_genre_takes_default_branches() {
        assert_eq!(tone_for(Genre::Other), SOULFUL_TONE);
        assert_eq!(language_style_for(Genre::Other), TIMELESS_LANGUAGE);
    }

    #[test]
    fn rock_prompt_is_rendered_in_full() {
        let prompt = refine_prompt(&selection(Genre::Rock));
        assert_eq!(
            prompt,
            "Create song lyrics with the following characteristics:\n\
             - **Genre**: Rock\n\
             - **Lyrics Writer Style**: Bob Dylan\n\
             - **Purpose**: Heartfelt\n\
             - **Theme/Prompt**: rain on a tin roof\n\
             \n\
             Additional Details:\n\
             1. Tone: Soulful and deep.\n\
             2. Include imagery and metaphors matching the genre.\n\
             3. Keep the language timeless and poetic.\n"
        );
        for label in ["Genre", "Lyrics Writer Style", "Purpose", "Theme/Prompt"] {
            assert!(prompt.contains(&format!("**{label}**")));
        }
    }

    #[test]
    fn hip_hop_uses_display_label() {
        let prompt = refine_prompt(&selection(Genre::HipHop));
        assert!(prompt.contains("- **Genre**: Hip Hop\n"));
    }

    #[test]
    fn creativity_does_not_change_prompt() {
        let mut low = selection(Genre::Jazz);
        low.creativity = Creativity::new(0.1).unwrap();
        let mut high = selection(Genre::Jazz);
        high.creativity = Creativity::new(1.0).unwrap();
        assert_eq!(refine_prompt(&low), refine_prompt(&high));
    }
}
