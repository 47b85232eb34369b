//! Change categories, their conventional commit tags, and the `Action` unit.

use std::fmt;

/// Conventional commit types used in rendered messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Feat,
    Refactor,
    Test,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Refactor => "refactor",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of change an action describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    AddType,
    RemoveType,
    AddFunction,
    RemoveFunction,
    AddMethod,
    RemoveMethod,
    AddModule,
    RemoveModule,
    AddTest,
    RemoveTest,
    UpdateTest,
    ModifyCode,
    AddCode,
    RemoveCode,
}

impl Category {
    /// The tag this category renders under.
    pub fn commit_type(&self) -> CommitType {
        match self {
            Self::AddType | Self::AddFunction | Self::AddMethod | Self::AddModule | Self::AddCode => {
                CommitType::Feat
            }
            Self::RemoveType
            | Self::RemoveFunction
            | Self::RemoveMethod
            | Self::RemoveModule
            | Self::RemoveCode
            | Self::ModifyCode => CommitType::Refactor,
            Self::AddTest | Self::RemoveTest | Self::UpdateTest => CommitType::Test,
        }
    }
}

/// A single described change, before dedup and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub category: Category,
    /// Human-readable clause, no trailing punctuation.
    pub text: String,
}

impl Action {
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }

    pub fn commit_type(&self) -> CommitType {
        self.category.commit_type()
    }

    /// Text with one trailing period removed.
    pub fn normalized_text(&self) -> &str {
        self.text.strip_suffix('.').unwrap_or(&self.text)
    }
}
