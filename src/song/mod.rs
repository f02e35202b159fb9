pub mod clean;
pub mod pipeline;
pub mod refine;
pub mod selection;

pub use clean::clean_ai_response;
pub use pipeline::{Banner, Submission, generate_lyrics, submit};
pub use refine::refine_prompt;
pub use selection::{Creativity, Genre, Purpose, UserSelection};
