use super::SpecStyle;
use crate::error::{Error, Result};

/// The ordered set of styles recognition runs against
///
/// Built once, then only read. Order matters: when a class could match more
/// than one style, the earlier one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRegistry {
    styles: Vec<SpecStyle>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleRegistry {
    /// A registry holding every supported style
    pub fn new() -> Self {
        Self {
            styles: SpecStyle::ALL.to_vec(),
        }
    }

    /// A registry narrowed to the named styles, kept in registration order
    pub fn with_styles<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut selected = Vec::new();
        for name in names {
            let style = Self::lookup_in(&SpecStyle::ALL, name.as_ref())
                .ok_or_else(|| Error::UnknownStyle(name.as_ref().to_string()))?;
            selected.push(style);
        }
        let styles = SpecStyle::ALL
            .into_iter()
            .filter(|style| selected.contains(style))
            .collect();
        Ok(Self { styles })
    }

    pub fn styles(&self) -> &[SpecStyle] {
        &self.styles
    }

    pub fn iter(&self) -> impl Iterator<Item = SpecStyle> + '_ {
        self.styles.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn contains(&self, style: SpecStyle) -> bool {
        self.styles.contains(&style)
    }

    pub fn find_by_fq_name(&self, fq_name: &str) -> Option<SpecStyle> {
        self.iter().find(|style| style.fq_name() == fq_name)
    }

    pub fn find_by_short_name(&self, short_name: &str) -> Option<SpecStyle> {
        self.iter().find(|style| style.short_name() == short_name)
    }

    /// True if `fq_name` is the base class of a registered style
    pub fn is_spec_base(&self, fq_name: &str) -> bool {
        self.find_by_fq_name(fq_name).is_some()
    }

    /// Finds a style by fully-qualified name, short name or style name
    ///
    /// Short and style names are compared ignoring case, spaces, `_` and `-`,
    /// so `StringSpec`, `string_spec` and `String Spec` are the same style.
    pub fn lookup(&self, name: &str) -> Option<SpecStyle> {
        Self::lookup_in(&self.styles, name)
    }

    fn lookup_in(styles: &[SpecStyle], name: &str) -> Option<SpecStyle> {
        if let Some(style) = styles.iter().find(|style| style.fq_name() == name) {
            return Some(*style);
        }
        let wanted = normalize(name);
        styles.iter().copied().find(|style| {
            normalize(style.short_name()) == wanted || normalize(style.style_name()) == wanted
        })
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}
