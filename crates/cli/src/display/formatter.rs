use kospec_core::command::FRAMEWORK_NAME;
use kospec_core::{Confidence, FileAnalysis, GradleCommand, SpecAnalysis, TestKind, TestTarget};

pub fn print_analysis(filepath: &str, analysis: &FileAnalysis) {
    println!("🔍 Analyzing: {}", filepath);
    println!("{}", "=".repeat(80));

    if analysis.specs.is_empty() {
        println!("\n📭 No specs found");
        return;
    }
    for spec in &analysis.specs {
        print_spec(spec);
    }
}

fn print_spec(spec: &SpecAnalysis) {
    println!("\n📦 {} ({})", spec.name, spec.fq_name);
    println!("   🎨 Style: {}{}", spec.style_name, confidence_note(spec.confidence));
    println!(
        "   📏 Scope: lines {}-{}",
        spec.span.start.line + 1,
        spec.span.end.line + 1
    );

    if !spec.callbacks.is_empty() {
        let keywords: Vec<_> = spec.callbacks.iter().map(|c| c.kind.keyword()).collect();
        println!("   🪝 Callbacks: {}", keywords.join(", "));
    }

    if spec.tests.is_empty() {
        println!("   (no tests)");
        return;
    }
    for test in &spec.tests {
        let depth = test.depth();
        let icon = match test.kind {
            TestKind::Container => "📂",
            TestKind::Test => "🧪",
        };
        println!(
            "   {}{} {} (line {})",
            "  ".repeat(depth),
            icon,
            test.name,
            test.span.start.line + 1
        );
    }
}

fn confidence_note(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::Resolved => "",
        Confidence::Textual => " (matched by name only)",
    }
}

pub fn print_target(line: u32, target: &TestTarget, command: &GradleCommand) {
    println!("\n🎯 Target at line {}: {}", line + 1, target.label());
    println!("   🧰 Framework: {}", FRAMEWORK_NAME);
    println!("   🔧 Command: {}", command.to_shell_command());
}
