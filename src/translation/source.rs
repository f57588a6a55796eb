use anyhow::Result;
use async_trait::async_trait;

/// Text to translate together with the language it is written in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    pub language: String,
}

impl Description {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
        }
    }
}

/// Supplier of the text to translate
///
/// `Ok(None)` means there is no description; the manager treats it as an
/// empty request. Choosing a placeholder string is up to the caller.
#[async_trait]
pub trait DescriptionSource: Send + Sync {
    async fn fetch(&self) -> Result<Option<Description>>;
}

/// A description already in hand, e.g. from the command line
#[derive(Debug, Clone)]
pub struct StaticDescription(Option<Description>);

impl StaticDescription {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self(Some(Description::new(text, language)))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

#[async_trait]
impl DescriptionSource for StaticDescription {
    async fn fetch(&self) -> Result<Option<Description>> {
        Ok(self.0.clone())
    }
}
