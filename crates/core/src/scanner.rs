//! Scanner that coordinates parsing, classification and recognition

use crate::{
    classifier::{Classification, Classifier, Confidence},
    command::{GradleCommand, TestTarget, find_gradle_root},
    config::Config,
    error::{Error, Result},
    parser::KotlinParser,
    specs,
    styles::{SpecStyle, StyleRegistry},
    symbols::{IndexOverlay, ProjectIndex, class_fq_name, class_name},
    syntax::{Node, SyntaxTree},
    types::{Callback, RecognizedTest, Span},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything recognized in one spec class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecAnalysis {
    pub name: String,
    pub fq_name: String,
    pub style: SpecStyle,
    pub style_name: String,
    pub confidence: Confidence,
    pub span: Span,
    pub tests: Vec<RecognizedTest>,
    pub callbacks: Vec<Callback>,
}

impl SpecAnalysis {
    /// The most specific test or container whose span contains `line`
    pub fn test_at_line(&self, line: u32) -> Option<&RecognizedTest> {
        self.tests
            .iter()
            .filter(|test| test.span.contains_line(line))
            .min_by_key(|test| test.span.line_count())
    }
}

/// Result of scanning one Kotlin file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub specs: Vec<SpecAnalysis>,
}

impl FileAnalysis {
    /// The innermost spec whose span contains `line`
    pub fn spec_at_line(&self, line: u32) -> Option<&SpecAnalysis> {
        self.specs
            .iter()
            .filter(|spec| spec.span.contains_line(line))
            .min_by_key(|spec| spec.span.line_count())
    }

    pub fn test_at_line(&self, line: u32) -> Option<&RecognizedTest> {
        self.spec_at_line(line)?.test_at_line(line)
    }

    /// The test at `line`, or its whole spec when the line holds no test
    pub fn target_at_line(&self, line: u32) -> Option<TestTarget> {
        let spec = self.spec_at_line(line)?;
        Some(match spec.test_at_line(line) {
            Some(test) => TestTarget::test(&spec.fq_name, &test.path),
            None => TestTarget::spec(&spec.fq_name),
        })
    }

    pub fn test_count(&self) -> usize {
        self.specs.iter().map(|spec| spec.tests.len()).sum()
    }
}

pub struct SpecScanner {
    parser: KotlinParser,
    config: Config,
    registry: StyleRegistry,
    index: Option<ProjectIndex>,
}

impl SpecScanner {
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let registry = config.registry()?;
        Ok(Self {
            parser: KotlinParser::new()?,
            config,
            registry,
            index: None,
        })
    }

    pub fn with_index(mut self, index: ProjectIndex) -> Self {
        self.index = Some(index);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn index(&self) -> Option<&ProjectIndex> {
        self.index.as_ref()
    }

    pub fn parser_mut(&mut self) -> &mut KotlinParser {
        &mut self.parser
    }

    /// Classifier over the configured styles, resolving through the shared
    /// index when symbol resolution is enabled
    pub fn classifier(&self) -> Classifier<'_> {
        let classifier = Classifier::new(&self.registry);
        match (&self.index, self.config.resolve_symbols) {
            (Some(index), true) => classifier.with_resolver(index),
            _ => classifier,
        }
    }

    /// Runs `query` with a classifier that also sees the declarations of
    /// `tree`; the shared index is left as it was
    fn with_file_classifier<R>(&self, tree: &SyntaxTree, query: impl FnOnce(&Classifier) -> R) -> R {
        if !self.config.resolve_symbols {
            return query(&Classifier::new(&self.registry));
        }
        let overlay = IndexOverlay::new(self.index.as_ref(), tree);
        query(&Classifier::new(&self.registry).with_resolver(&overlay))
    }

    pub fn parse(&mut self, source: &str) -> Result<SyntaxTree> {
        self.parser.parse(source)
    }

    pub fn list_specifications<'t>(&self, tree: &'t SyntaxTree) -> Vec<(Node<'t>, Classification)> {
        self.with_file_classifier(tree, |classifier| {
            specs::list_specifications(tree.root(), classifier)
        })
    }

    pub fn list_tests(&self, class: Node, style: SpecStyle) -> Vec<RecognizedTest> {
        self.with_file_classifier(class.tree(), |classifier| {
            specs::list_tests(class, style, classifier)
        })
    }

    pub fn list_callbacks(&self, class: Node) -> Vec<Callback> {
        specs::list_callbacks(class)
    }

    pub fn generate_stub(&self, style: SpecStyle, test_name: &str) -> String {
        specs::generate_stub(style, test_name)
    }

    pub fn analyze_source(&mut self, source: &str) -> Result<FileAnalysis> {
        let tree = self.parse(source)?;
        let analysis = self.with_file_classifier(&tree, |classifier| {
            let mut analysis = FileAnalysis::default();
            for (class, classification) in specs::list_specifications(tree.root(), classifier) {
                let style = classification.style;
                analysis.specs.push(SpecAnalysis {
                    name: class_name(class).unwrap_or_default().into_owned(),
                    fq_name: class_fq_name(class).unwrap_or_default(),
                    style,
                    style_name: style.style_name().to_string(),
                    confidence: classification.confidence,
                    span: class.span(),
                    tests: specs::list_tests(class, style, classifier),
                    callbacks: specs::list_callbacks(class),
                });
            }
            analysis
        });
        debug!(
            "Found {} specs with {} tests",
            analysis.specs.len(),
            analysis.test_count()
        );
        Ok(analysis)
    }

    pub fn analyze_file(&mut self, file_path: &Path) -> Result<FileAnalysis> {
        debug!("analyze_file: {:?}", file_path);
        let source = std::fs::read_to_string(file_path)?;
        let mut analysis = self.analyze_source(&source)?;
        analysis.file = Some(file_path.to_path_buf());
        Ok(analysis)
    }

    /// The Gradle command running whatever sits at `line` (0-based) of a file
    pub fn build_command(&mut self, file_path: &Path, line: u32) -> Result<GradleCommand> {
        let analysis = self.analyze_file(file_path)?;
        let target = analysis.target_at_line(line).ok_or(Error::NoTestFound)?;
        debug!("Target at line {}: {}", line, target.label());

        let mut command = GradleCommand::for_target(&target, &self.config.gradle);
        if let Some(root) = find_gradle_root(file_path) {
            command = command.with_working_dir(root.to_string_lossy());
        }
        Ok(command)
    }
}
