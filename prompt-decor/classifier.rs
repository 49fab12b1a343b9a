use url::Url;

/// Decides whether a document resource is a prompt file and therefore gets
/// prompt syntax decorations.
pub trait PromptFileClassifier: Send + Sync {
  fn is_prompt_file(&self, uri: &Url) -> bool;
}

/// File name suffix of reusable prompt files.
pub const PROMPT_FILE_SUFFIX: &str = ".prompt.md";

/// Default classifier: a case-insensitive check of the resource path suffix.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuffixClassifier;

impl PromptFileClassifier for SuffixClassifier {
  fn is_prompt_file(&self, uri: &Url) -> bool {
    uri
      .path()
      .to_ascii_lowercase()
      .ends_with(PROMPT_FILE_SUFFIX)
  }
}
